use thiserror::Error;

use crate::backend::domain::time_normalizer::TimeError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    InvalidDate(#[from] TimeError),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

macro_rules! validation_error_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for DomainError {
                fn from(err: $source) -> Self {
                    DomainError::Validation(err.to_string())
                }
            }
        )*
    };
}

validation_error_from!(
    crate::backend::domain::models::plant::PlantValidationError,
    crate::backend::domain::models::fertilizer::FertilizerValidationError,
    crate::backend::domain::models::chore::ChoreValidationError,
);
