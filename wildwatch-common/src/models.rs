//! Sighting, report and user models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Category tag carried by every sighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SightingType {
    Animal,
    Bird,
    Insect,
    Plant,
}

impl SightingType {
    pub const ALL: [SightingType; 4] = [
        SightingType::Animal,
        SightingType::Bird,
        SightingType::Insect,
        SightingType::Plant,
    ];

    /// Stored and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SightingType::Animal => "animal",
            SightingType::Bird => "bird",
            SightingType::Insect => "insect",
            SightingType::Plant => "plant",
        }
    }
}

impl fmt::Display for SightingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SightingType {
    type Err = Error;

    /// Exact, lowercase match only; the stored enumeration is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SightingType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown sighting type: {}", s)))
    }
}

/// A recorded wildlife observation
///
/// Coordinates stay as the text that was submitted; readers parse them on
/// demand and must tolerate values that do not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: String,
    pub latitude: String,
    pub longitude: String,
    pub image: String,
    #[serde(rename = "type")]
    pub sighting_type: SightingType,
    pub species: String,
    pub description: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when a sighting is submitted; the store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewSighting {
    pub latitude: String,
    pub longitude: String,
    pub image: String,
    pub sighting_type: SightingType,
    pub species: String,
    pub description: String,
    pub email: String,
}

impl NewSighting {
    /// Check the persisted-sighting invariant before anything is written
    pub fn validate(&self) -> crate::Result<()> {
        let required = [
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("species", &self.species),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("Sighting {} must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// Hazard or nuisance report dropped at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub report_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Account created on first sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub contribution_number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sighting_type_parses_every_member() {
        for t in SightingType::ALL {
            assert_eq!(t.as_str().parse::<SightingType>().unwrap(), t);
        }
    }

    #[test]
    fn test_sighting_type_rejects_unknown_and_mixed_case() {
        assert!("fish".parse::<SightingType>().is_err());
        assert!("Bird".parse::<SightingType>().is_err());
        assert!("".parse::<SightingType>().is_err());
    }

    #[test]
    fn test_sighting_serializes_type_field() {
        let sighting = Sighting {
            id: "abc".to_string(),
            latitude: "40.0".to_string(),
            longitude: "-73.0".to_string(),
            image: "https://img.example/1.jpg".to_string(),
            sighting_type: SightingType::Bird,
            species: "Bald Eagle".to_string(),
            description: "Perched".to_string(),
            email: "a@example.com".to_string(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&sighting).unwrap();
        assert_eq!(value["type"], "bird");
        assert!(value.get("sighting_type").is_none());
    }

    #[test]
    fn test_new_sighting_requires_coordinates_and_species() {
        let mut new = NewSighting {
            latitude: "40.0".to_string(),
            longitude: "-73.0".to_string(),
            image: String::new(),
            sighting_type: SightingType::Plant,
            species: "Trillium".to_string(),
            description: String::new(),
            email: "a@example.com".to_string(),
        };
        assert!(new.validate().is_ok());

        new.species = "  ".to_string();
        assert!(matches!(new.validate(), Err(Error::InvalidInput(_))));
    }
}
