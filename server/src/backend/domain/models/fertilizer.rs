//! Domain model for a fertilizer.
use chrono::{DateTime, Utc};
use shared::FertilizerType;

#[derive(Debug, Clone, PartialEq)]
pub struct Fertilizer {
    pub id: String,
    pub name: String,
    pub fertilizer_type: FertilizerType,
    pub is_organic: bool,
    pub notes: Option<String>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fertilizer {
    pub fn generate_id() -> String {
        shared::Fertilizer::generate_id()
    }

    /// Name must be non-empty after trimming; N-P-K values must be finite and >= 0
    pub fn validate(
        name: &str,
        nutrients: [(&'static str, Option<f64>); 3],
    ) -> Result<String, FertilizerValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FertilizerValidationError::EmptyName);
        }
        if name.chars().count() > 256 {
            return Err(FertilizerValidationError::NameTooLong);
        }
        for (label, value) in nutrients {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(FertilizerValidationError::InvalidNutrient(label));
                }
            }
        }
        Ok(name.to_string())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FertilizerValidationError {
    #[error("Fertilizer name cannot be empty")]
    EmptyName,
    #[error("Fertilizer name cannot exceed 256 characters")]
    NameTooLong,
    #[error("{0} must be a non-negative number")]
    InvalidNutrient(&'static str),
}
