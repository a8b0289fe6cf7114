//! SQLite storage backend.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    ChoreLogRepository, ChoreRepository, FertilizerRepository, PlantRepository,
};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// `2024-01-15T08:00:00.000Z`
pub(crate) fn encode_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn decode_instant(text: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("Stored timestamp is not RFC 3339: {}", text))?;
    Ok(parsed.with_timezone(&Utc))
}

/// `%term%` with LIKE wildcards escaped; pair with `ESCAPE '\'`
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
