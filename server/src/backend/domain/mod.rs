//! # Domain Module
//!
//! Business logic for the gardening tracker.
//!
//! ## Module Organization
//!
//! - **time_normalizer**: client-local dates (with a minute offset) to UTC
//! - **recurrence**: next due date of a recurring chore from its history
//! - **chore_query**: joins chores with their associations and schedules them
//! - **\*_service**: CRUD for plants, fertilizers, chores and chore logs
//! - **clock**: injectable source of "now"
//!
//! ## Business Rules
//!
//! - Every stored instant is UTC; client dates are normalized on the way in
//! - A chore recurs only when it has both a positive amount and a unit
//! - The next due date is derived on every read and never stored
//! - Chore listings are ordered by next due date, undated chores last,
//!   newest first on ties

pub mod chore_log_service;
pub mod chore_query;
pub mod chore_service;
pub mod clock;
pub mod commands;
pub mod error;
pub mod fertilizer_service;
pub mod health_service;
pub mod models;
pub mod plant_service;
pub mod recurrence;
pub mod time_normalizer;

pub use chore_log_service::ChoreLogService;
pub use chore_query::ChoreQueryAssembler;
pub use chore_service::ChoreService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use fertilizer_service::FertilizerService;
pub use health_service::{HealthReport, HealthService};
pub use plant_service::PlantService;
pub use recurrence::RecurrenceCalculator;
pub use time_normalizer::{ClientDate, OffsetPolicy, TimeError, TimeNormalizer};
