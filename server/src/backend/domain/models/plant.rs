//! Domain model for a plant.
use chrono::{DateTime, Utc};

use super::chore::ScheduledChore;

#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub planted_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    pub fn generate_id() -> String {
        shared::Plant::generate_id()
    }
}

/// A plant with its chores, ordered by next due date
#[derive(Debug, Clone, PartialEq)]
pub struct PlantWithChores {
    pub plant: Plant,
    pub chores: Vec<ScheduledChore>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlantValidationError {
    #[error("Plant name cannot be empty")]
    EmptyName,
    #[error("Plant name cannot exceed 256 characters")]
    NameTooLong,
}

/// Trimmed, bounded plant name
pub fn validate_plant_name(name: &str) -> Result<String, PlantValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PlantValidationError::EmptyName);
    }
    if name.chars().count() > 256 {
        return Err(PlantValidationError::NameTooLong);
    }
    Ok(name.to_string())
}
