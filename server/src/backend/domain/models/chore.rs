//! Domain model for a chore and its schedule.
use chrono::{DateTime, Utc};
use shared::RecurUnit;

use super::{chore_log::ChoreLog, fertilizer::Fertilizer, plant::Plant};

/// Largest accepted recurrence amount (ten years of days)
pub const MAX_RECUR_AMOUNT: u32 = 3650;

#[derive(Debug, Clone, PartialEq)]
pub struct Chore {
    pub id: String,
    pub plant_id: String,
    pub description: Option<String>,
    pub fertilizer_id: Option<String>,
    pub fertilizer_amount: Option<String>,
    pub recur_amount: Option<u32>,
    pub recur_unit: Option<RecurUnit>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chore {
    pub fn generate_id() -> String {
        shared::Chore::generate_id()
    }
}

/// A chore with its associations and computed next due date
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledChore {
    pub chore: Chore,
    pub fertilizer: Option<Fertilizer>,
    /// Completion order, oldest first
    pub logs: Vec<ChoreLog>,
    pub plant: Option<Plant>,
    pub next_date: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChoreValidationError {
    #[error("Recurrence amount must be between 1 and {max}")]
    RecurAmountOutOfRange { max: u32 },
}

pub fn validate_recur_amount(amount: Option<u32>) -> Result<(), ChoreValidationError> {
    match amount {
        Some(amount) if amount == 0 || amount > MAX_RECUR_AMOUNT => {
            Err(ChoreValidationError::RecurAmountOutOfRange {
                max: MAX_RECUR_AMOUNT,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recur_amount() {
        assert!(validate_recur_amount(None).is_ok());
        assert!(validate_recur_amount(Some(1)).is_ok());
        assert!(validate_recur_amount(Some(MAX_RECUR_AMOUNT)).is_ok());
        assert_eq!(
            validate_recur_amount(Some(0)),
            Err(ChoreValidationError::RecurAmountOutOfRange { max: 3650 })
        );
        assert!(validate_recur_amount(Some(3651)).is_err());
    }
}
