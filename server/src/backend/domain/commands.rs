//! Domain-level command and query types.
//! Services take these instead of the public DTOs from the `shared` crate;
//! the REST layer does the translation.

/// Free-text filter shared by every listing
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn new(search: Option<String>) -> Self {
        Self { search }
    }

    /// Trimmed search text, `None` when blank
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

pub mod plant {
    use crate::backend::domain::time_normalizer::ClientDate;

    /// Input for creating a plant or replacing its editable fields.
    #[derive(Debug, Clone)]
    pub struct PlantCommand {
        pub name: String,
        pub planted_at: ClientDate,
        pub notes: Option<String>,
        pub client_timezone_offset: Option<i32>,
    }
}

pub mod fertilizer {
    use shared::FertilizerType;

    #[derive(Debug, Clone)]
    pub struct FertilizerCommand {
        pub name: String,
        pub fertilizer_type: FertilizerType,
        pub is_organic: bool,
        pub notes: Option<String>,
        pub nitrogen: Option<f64>,
        pub phosphorus: Option<f64>,
        pub potassium: Option<f64>,
    }
}

pub mod chore {
    use shared::RecurUnit;

    #[derive(Debug, Clone)]
    pub struct CreateChoreCommand {
        pub plant_id: String,
        pub description: Option<String>,
        pub fertilizer_id: Option<String>,
        pub fertilizer_amount: Option<String>,
        pub recur_amount: Option<u32>,
        pub recur_unit: Option<RecurUnit>,
        pub notes: Option<String>,
    }

    /// Partial update: `None` leaves a field alone, `Some(None)` clears it.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateChoreCommand {
        pub description: Option<Option<String>>,
        pub fertilizer_id: Option<Option<String>>,
        pub fertilizer_amount: Option<Option<String>>,
        pub recur_amount: Option<Option<u32>>,
        pub recur_unit: Option<Option<RecurUnit>>,
        pub notes: Option<Option<String>>,
    }
}

pub mod chore_log {
    use crate::backend::domain::time_normalizer::ClientDate;

    #[derive(Debug, Clone)]
    pub struct CreateChoreLogCommand {
        pub chore_id: String,
        pub fertilizer_amount: Option<String>,
        pub notes: Option<String>,
        /// Defaults to the current instant when absent
        pub done_at: Option<ClientDate>,
        pub client_timezone_offset: Option<i32>,
    }
}
