//! Integration tests for database bootstrap and the sighting store
//!
//! Covers:
//! - Automatic database creation on first run
//! - Storage-order retrieval by type (drives first-seen-wins aggregation)
//! - Report and user bookkeeping
//! - Sighting and contribution writes commit together

use tempfile::TempDir;
use wildwatch_common::db::{self, reports, sessions, users, SightingStore, SqliteSightingStore};
use wildwatch_common::models::{NewSighting, SightingType};
use wildwatch_common::{aggregate_by_proximity, ProximityQuery};

fn new_sighting(species: &str, sighting_type: SightingType, lat: &str, lon: &str) -> NewSighting {
    NewSighting {
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        image: format!("https://img.example/{}.jpg", species.replace(' ', "_")),
        sighting_type,
        species: species.to_string(),
        description: format!("{} seen", species),
        email: "watcher@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("wildwatch.db");
    assert!(!db_path.exists());

    let pool = db::init_database(&db_path).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("wildwatch.db");

    {
        let pool = db::init_database(&db_path).await.unwrap();
        let store = SqliteSightingStore::new(pool.clone());
        store
            .insert(new_sighting("Red Fox", SightingType::Animal, "40.0", "-73.0"))
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = db::init_database(&db_path).await.unwrap();
    let store = SqliteSightingStore::new(pool);
    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].species, "Red Fox");
}

#[tokio::test]
async fn test_find_by_type_filters_and_keeps_insertion_order() {
    let pool = db::init_memory_database().await.unwrap();
    let store = SqliteSightingStore::new(pool);

    for (species, t) in [
        ("Robin", SightingType::Bird),
        ("Monarch", SightingType::Insect),
        ("Heron", SightingType::Bird),
        ("Oak", SightingType::Plant),
        ("Finch", SightingType::Bird),
    ] {
        store.insert(new_sighting(species, t, "40.0", "-73.0")).await.unwrap();
    }

    let birds = store.find_by_type(SightingType::Bird).await.unwrap();
    let names: Vec<&str> = birds.iter().map(|s| s.species.as_str()).collect();
    assert_eq!(names, vec!["Robin", "Heron", "Finch"]);
    assert!(birds.iter().all(|s| s.sighting_type == SightingType::Bird));

    assert!(store.find_by_type(SightingType::Animal).await.unwrap().is_empty());
    assert_eq!(store.list_all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_insert_assigns_id_and_round_trips_fields() {
    let pool = db::init_memory_database().await.unwrap();
    let store = SqliteSightingStore::new(pool);

    let stored = store
        .insert(new_sighting("Luna Moth", SightingType::Insect, "35.5", "-80.25"))
        .await
        .unwrap();
    assert!(!stored.id.is_empty());

    let fetched = store.find_by_type(SightingType::Insect).await.unwrap();
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, stored.id);
    assert_eq!(fetched[0].latitude, "35.5");
    assert_eq!(fetched[0].longitude, "-80.25");
    assert_eq!(fetched[0].description, "Luna Moth seen");
    assert_eq!(fetched[0].created_at.timestamp(), stored.created_at.timestamp());
}

#[tokio::test]
async fn test_insert_credits_the_reporter() {
    let pool = db::init_memory_database().await.unwrap();
    let store = SqliteSightingStore::new(pool.clone());

    store
        .insert(new_sighting("Robin", SightingType::Bird, "40.0", "-73.0"))
        .await
        .unwrap();
    store
        .insert(new_sighting("Heron", SightingType::Bird, "40.0", "-73.0"))
        .await
        .unwrap();

    let user = users::get_user(&pool, "watcher@example.com").await.unwrap().unwrap();
    assert_eq!(user.contribution_number, 2);
}

#[tokio::test]
async fn test_insert_rolls_back_when_contribution_fails() {
    let pool = db::init_memory_database().await.unwrap();
    let store = SqliteSightingStore::new(pool.clone());

    // Make the second write of the upload fail
    sqlx::query("DROP TABLE sessions").execute(&pool).await.unwrap();
    sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

    let result = store
        .insert(new_sighting("Robin", SightingType::Bird, "40.0", "-73.0"))
        .await;
    assert!(matches!(result, Err(wildwatch_common::Error::Database(_))));

    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_insert_rejects_blank_species() {
    let pool = db::init_memory_database().await.unwrap();
    let store = SqliteSightingStore::new(pool);

    let result = store
        .insert(new_sighting("", SightingType::Plant, "1.0", "2.0"))
        .await;
    assert!(matches!(result, Err(wildwatch_common::Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_stored_malformed_coordinates_do_not_break_aggregation() {
    let pool = db::init_memory_database().await.unwrap();

    // Bypass the store's validation to simulate legacy data
    sqlx::query(
        "INSERT INTO sightings (id, latitude, longitude, image, type, species, description, email)
         VALUES ('legacy', 'abc', '-73.0', '', 'bird', 'Bald Eagle', '', 'old@example.com')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = SqliteSightingStore::new(pool);
    store
        .insert(new_sighting("Bald Eagle", SightingType::Bird, "40.001", "-73.0"))
        .await
        .unwrap();

    let candidates = store.find_by_type(SightingType::Bird).await.unwrap();
    assert_eq!(candidates.len(), 2);

    let query = ProximityQuery::parse(Some("bird"), Some("40.0"), Some("-73.0")).unwrap();
    let result = aggregate_by_proximity(&query, &candidates);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].frequency, 1);
    assert_ne!(result[0].id, "legacy");
}

#[tokio::test]
async fn test_reports_are_stored_in_order() {
    let pool = db::init_memory_database().await.unwrap();

    let first = reports::insert_report(&pool, "bear", 40.0, -73.0, "a@example.com")
        .await
        .unwrap();
    reports::insert_report(&pool, "snake", 41.5, -72.25, "b@example.com")
        .await
        .unwrap();

    let all = sqlx::query_as::<_, (String, String, f64, f64)>(
        "SELECT id, report_type, latitude, longitude FROM reports ORDER BY rowid ASC",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, first.id);
    assert_eq!(all[0].1, "bear");
    assert_eq!(all[1].2, 41.5);
    assert_eq!(all[1].3, -72.25);
}

#[tokio::test]
async fn test_sessions_are_unique_per_sign_in() {
    let pool = db::init_memory_database().await.unwrap();
    users::upsert_user(&pool, "jo@example.com", "Jo").await.unwrap();

    let first = sessions::create_session(&pool, "jo@example.com").await.unwrap();
    let second = sessions::create_session(&pool, "jo@example.com").await.unwrap();
    assert_ne!(first, second);

    let count = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM sessions WHERE email = ?")
        .bind("jo@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 2);

    // Sessions belong to known users
    assert!(sessions::create_session(&pool, "nobody@example.com").await.is_err());
}

#[tokio::test]
async fn test_user_upsert_and_contributions() {
    let pool = db::init_memory_database().await.unwrap();

    let user = users::upsert_user(&pool, "jo@example.com", "Jo").await.unwrap();
    assert_eq!(user.contribution_number, 0);

    users::record_contribution(&pool, "jo@example.com").await.unwrap();
    users::record_contribution(&pool, "jo@example.com").await.unwrap();

    let renamed = users::upsert_user(&pool, "jo@example.com", "Jo B").await.unwrap();
    assert_eq!(renamed.name, "Jo B");
    assert_eq!(renamed.contribution_number, 2);

    users::record_contribution(&pool, "new@example.com").await.unwrap();
    let created = users::get_user(&pool, "new@example.com").await.unwrap().unwrap();
    assert_eq!(created.contribution_number, 1);
    assert_eq!(created.name, "new@example.com");

    assert!(users::get_user(&pool, "nobody@example.com").await.unwrap().is_none());
}
