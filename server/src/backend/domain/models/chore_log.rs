//! Domain model for a chore completion record.
use chrono::{DateTime, Utc};

use super::{chore::Chore, fertilizer::Fertilizer, plant::Plant};
use crate::backend::domain::recurrence::Completion;

#[derive(Debug, Clone, PartialEq)]
pub struct ChoreLog {
    pub id: String,
    pub chore_id: String,
    pub fertilizer_amount: Option<String>,
    /// Always UTC; client dates are normalized before they get here
    pub done_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChoreLog {
    pub fn generate_id() -> String {
        shared::ChoreLog::generate_id()
    }
}

impl Completion for ChoreLog {
    fn done_at(&self) -> DateTime<Utc> {
        self.done_at
    }
}

/// A log with the chore it belongs to and that chore's associations
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreLogDetails {
    pub log: ChoreLog,
    pub chore: Option<Chore>,
    pub fertilizer: Option<Fertilizer>,
    pub plant: Option<Plant>,
}
