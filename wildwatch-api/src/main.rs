//! wildwatch-api - Wildlife sighting reporting service
//!
//! Serves sighting submission, listing and the proximity species summary
//! over HTTP. Default port 9874.

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wildwatch_api::api::BuildInfo;
use wildwatch_api::cli::Args;
use wildwatch_api::{build_router, AppState};
use wildwatch_common::config::{ServiceConfig, TomlConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so its log_level can seed the filter
    let config_path = args.config_path();
    let file_config = match &config_path {
        Some(path) => TomlConfig::load(path)?,
        None => None,
    };
    let config_found = file_config.is_some();
    let config = ServiceConfig::resolve(args.overrides(), file_config);

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = &config.log_level;
            EnvFilter::new(format!(
                "wildwatch_api={level},wildwatch_common={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting WildWatch API (wildwatch-api) v{} {}",
        env!("CARGO_PKG_VERSION"),
        BuildInfo::CURRENT
    );

    match (&config_path, config_found) {
        (Some(path), true) => info!("Loaded config: {}", path.display()),
        (Some(path), false) => warn!("Config file not found: {} (using defaults)", path.display()),
        (None, _) => warn!("No config directory on this platform (using defaults)"),
    }

    config
        .ensure_root_folder()
        .context("Failed to create root folder")?;

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = wildwatch_common::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;
    info!("✓ Connected to database");

    let state = AppState::new(pool);
    warn!("Identity provider, image classifier and image hosting are not configured; /auth/google and /upload-image will answer 503");

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wildwatch-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
