use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unit of a chore's recurrence interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurUnit {
    Day,
    Week,
}

impl RecurUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurUnit::Day => "day",
            RecurUnit::Week => "week",
        }
    }

    /// Number of calendar days one unit spans
    pub fn days(&self) -> u64 {
        match self {
            RecurUnit::Day => 1,
            RecurUnit::Week => 7,
        }
    }
}

impl fmt::Display for RecurUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurUnit {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(RecurUnit::Day),
            "week" => Ok(RecurUnit::Week),
            other => Err(UnknownVariantError {
                kind: "recurrence unit",
                value: other.to_string(),
            }),
        }
    }
}

/// Physical form of a fertilizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FertilizerType {
    Liquid,
    Granules,
}

impl FertilizerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerType::Liquid => "liquid",
            FertilizerType::Granules => "granules",
        }
    }
}

impl fmt::Display for FertilizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FertilizerType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liquid" => Ok(FertilizerType::Liquid),
            "granules" => Ok(FertilizerType::Granules),
            other => Err(UnknownVariantError {
                kind: "fertilizer type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariantError {}

/// A plant being tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// UTC instant the plant went into the ground
    pub planted_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A plant together with its scheduled chores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantWithChores {
    #[serde(flatten)]
    pub plant: Plant,
    pub chores: Vec<ChoreDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlantRequest {
    pub name: String,
    /// Client-local date, either `YYYY-MM-DD` or a full timestamp
    pub planted_at: String,
    pub notes: Option<String>,
    /// Minutes the client's local time is behind UTC
    pub client_timezone_offset: Option<i32>,
}

/// Plants are updated by full replacement of their editable fields
pub type UpdatePlantRequest = CreatePlantRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantListResponse {
    pub plants: Vec<PlantWithChores>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fertilizer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub fertilizer_type: FertilizerType,
    pub is_organic: bool,
    pub notes: Option<String>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFertilizerRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub fertilizer_type: FertilizerType,
    pub is_organic: bool,
    pub notes: Option<String>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
}

pub type UpdateFertilizerRequest = CreateFertilizerRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerListResponse {
    pub fertilizers: Vec<Fertilizer>,
}

/// A plant-care task definition, optionally recurring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
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

/// A chore with its associations and its computed next due date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDetails {
    #[serde(flatten)]
    pub chore: Chore,
    pub fertilizer: Option<Fertilizer>,
    /// Completion history, oldest first
    pub logs: Vec<ChoreLog>,
    pub plant: Option<Plant>,
    /// Next UTC instant the chore is due; absent for non-recurring chores
    pub next_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreRequest {
    pub plant_id: String,
    pub description: Option<String>,
    #[serde(alias = "fertilizer")]
    pub fertilizer_id: Option<String>,
    pub fertilizer_amount: Option<String>,
    pub recur_amount: Option<u32>,
    pub recur_unit: Option<RecurUnit>,
    pub notes: Option<String>,
    pub client_timezone_offset: Option<i32>,
}

/// Partial chore update.
///
/// Each patchable field distinguishes an absent key (`None`, leave unchanged)
/// from an explicit `null` (`Some(None)`, clear the value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChoreRequest {
    #[serde(default, deserialize_with = "patch::deserialize_some", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        alias = "fertilizer",
        deserialize_with = "patch::deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub fertilizer_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::deserialize_some", skip_serializing_if = "Option::is_none")]
    pub fertilizer_amount: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::deserialize_some", skip_serializing_if = "Option::is_none")]
    pub recur_amount: Option<Option<u32>>,
    #[serde(default, deserialize_with = "patch::deserialize_some", skip_serializing_if = "Option::is_none")]
    pub recur_unit: Option<Option<RecurUnit>>,
    #[serde(default, deserialize_with = "patch::deserialize_some", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_timezone_offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreListResponse {
    pub chores: Vec<ChoreDetails>,
}

/// Record of a chore having been performed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreLog {
    pub id: String,
    pub chore_id: String,
    pub fertilizer_amount: Option<String>,
    /// UTC instant the chore was performed
    pub done_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreLogDetails {
    #[serde(flatten)]
    pub log: ChoreLog,
    pub chore: Option<Chore>,
    pub fertilizer: Option<Fertilizer>,
    pub plant: Option<Plant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoreLogRequest {
    pub chore_id: String,
    pub fertilizer_amount: Option<String>,
    pub notes: Option<String>,
    /// Client-local completion date; the server uses "now" when absent
    pub done_at: Option<String>,
    pub client_timezone_offset: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreLogListResponse {
    pub chore_logs: Vec<ChoreLogDetails>,
}

/// Optional free-text filter accepted by every list procedure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: DatabaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub db: DatabaseHealth,
    pub timestamp: DateTime<Utc>,
}

/// JSON body returned for every failed procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub mod patch {
    use serde::{Deserialize, Deserializer};

    /// Maps a present field, `null` included, to `Some(..)`.
    /// Paired with `#[serde(default)]` an absent field stays `None`.
    pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Some)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdError {
    InvalidFormat,
    InvalidPrefix { expected: &'static str },
    InvalidUuid,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::InvalidFormat => write!(f, "Invalid ID format"),
            IdError::InvalidPrefix { expected } => write!(f, "ID must start with '{}::'", expected),
            IdError::InvalidUuid => write!(f, "Invalid UUID in ID"),
        }
    }
}

impl std::error::Error for IdError {}

fn generate_prefixed_id(prefix: &str) -> String {
    format!("{}::{}", prefix, Uuid::new_v4().simple())
}

fn parse_prefixed_id(expected: &'static str, id: &str) -> Result<Uuid, IdError> {
    let (prefix, raw) = id.split_once("::").ok_or(IdError::InvalidFormat)?;
    if prefix != expected {
        return Err(IdError::InvalidPrefix { expected });
    }
    Uuid::parse_str(raw).map_err(|_| IdError::InvalidUuid)
}

impl Plant {
    pub const ID_PREFIX: &'static str = "plant";

    /// Generate a plant ID in format "plant::<uuid>"
    pub fn generate_id() -> String {
        generate_prefixed_id(Self::ID_PREFIX)
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(Self::ID_PREFIX, id)
    }
}

impl Fertilizer {
    pub const ID_PREFIX: &'static str = "fertilizer";

    pub fn generate_id() -> String {
        generate_prefixed_id(Self::ID_PREFIX)
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(Self::ID_PREFIX, id)
    }
}

impl Chore {
    pub const ID_PREFIX: &'static str = "chore";

    pub fn generate_id() -> String {
        generate_prefixed_id(Self::ID_PREFIX)
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(Self::ID_PREFIX, id)
    }
}

impl ChoreLog {
    pub const ID_PREFIX: &'static str = "chore_log";

    pub fn generate_id() -> String {
        generate_prefixed_id(Self::ID_PREFIX)
    }

    pub fn parse_id(id: &str) -> Result<Uuid, IdError> {
        parse_prefixed_id(Self::ID_PREFIX, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_generate_and_parse_ids() {
        let plant_id = Plant::generate_id();
        assert!(plant_id.starts_with("plant::"));
        assert!(Plant::parse_id(&plant_id).is_ok());

        let log_id = ChoreLog::generate_id();
        assert!(log_id.starts_with("chore_log::"));
        assert!(ChoreLog::parse_id(&log_id).is_ok());

        // Two IDs generated back to back never collide
        assert_ne!(Chore::generate_id(), Chore::generate_id());
    }

    #[test]
    fn test_parse_id_errors() {
        assert_eq!(Plant::parse_id("plant-123"), Err(IdError::InvalidFormat));
        assert_eq!(
            Plant::parse_id(&Chore::generate_id()),
            Err(IdError::InvalidPrefix { expected: "plant" })
        );
        assert_eq!(Fertilizer::parse_id("fertilizer::not-a-uuid"), Err(IdError::InvalidUuid));
    }

    #[test]
    fn test_recur_unit_wire_format() {
        assert_eq!(serde_json::to_value(RecurUnit::Week).unwrap(), json!("week"));
        assert_eq!(serde_json::from_value::<RecurUnit>(json!("day")).unwrap(), RecurUnit::Day);
        assert!(serde_json::from_value::<RecurUnit>(json!("month")).is_err());

        assert_eq!("week".parse::<RecurUnit>().unwrap().days(), 7);
        let err = "fortnight".parse::<RecurUnit>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown recurrence unit: fortnight");
    }

    #[test]
    fn test_fertilizer_uses_type_key() {
        let request: CreateFertilizerRequest = serde_json::from_value(json!({
            "name": "Fish emulsion",
            "type": "liquid",
            "isOrganic": true,
            "nitrogen": 5.0
        }))
        .unwrap();

        assert_eq!(request.fertilizer_type, FertilizerType::Liquid);
        assert!(request.is_organic);
        assert_eq!(request.phosphorus, None);
    }

    #[test]
    fn test_update_chore_request_distinguishes_null_from_absent() {
        let request: UpdateChoreRequest = serde_json::from_value(json!({
            "recurAmount": null,
            "notes": "water deeply"
        }))
        .unwrap();

        assert_eq!(request.recur_amount, Some(None));
        assert_eq!(request.notes, Some(Some("water deeply".to_string())));
        assert_eq!(request.recur_unit, None);
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_create_chore_request_accepts_fertilizer_alias() {
        let request: CreateChoreRequest = serde_json::from_value(json!({
            "plantId": "plant::abc",
            "fertilizer": "fertilizer::def",
            "recurAmount": 2,
            "recurUnit": "week"
        }))
        .unwrap();

        assert_eq!(request.fertilizer_id.as_deref(), Some("fertilizer::def"));
        assert_eq!(request.recur_unit, Some(RecurUnit::Week));
        assert_eq!(request.client_timezone_offset, None);
    }

    #[test]
    fn test_chore_details_flattens_chore_fields() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let details = ChoreDetails {
            chore: Chore {
                id: "chore::1".to_string(),
                plant_id: "plant::1".to_string(),
                description: None,
                fertilizer_id: None,
                fertilizer_amount: None,
                recur_amount: Some(2),
                recur_unit: Some(RecurUnit::Week),
                notes: None,
                created_at: at,
                updated_at: at,
            },
            fertilizer: None,
            logs: Vec::new(),
            plant: None,
            next_date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["id"], "chore::1");
        assert_eq!(value["recurUnit"], "week");
        assert_eq!(value["nextDate"], "2024-01-15T00:00:00Z");

        let round_tripped: ChoreDetails = serde_json::from_value(value).unwrap();
        assert_eq!(round_tripped, details);
    }
}
