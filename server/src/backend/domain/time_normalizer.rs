//! Client-local date to UTC normalization.
//!
//! Clients send dates either as a bare calendar date (`YYYY-MM-DD`, meaning
//! local midnight) or as a full timestamp, together with an optional
//! `clientTimezoneOffset`: the minutes their local time is behind UTC
//! (positive west of Greenwich, negative east of it). Every date is
//! normalized through [`TimeNormalizer::to_utc`] before it is persisted.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Years with a four-digit RFC 3339 rendering
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Zone-less timestamp layouts accepted in addition to RFC 3339
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Client timezone offset is required to interpret local date: {0}")]
    MissingClientOffset(String),
    #[error("Date is out of range: {0}")]
    OutOfRange(String),
}

/// A date as received from a client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientDate {
    /// An already structured instant, for in-process callers that parsed the
    /// date themselves. The REST mappers always send [`ClientDate::Text`].
    Instant(DateTime<Utc>),
    /// A `YYYY-MM-DD` date or a full timestamp string
    Text(String),
}

impl From<DateTime<Utc>> for ClientDate {
    fn from(instant: DateTime<Utc>) -> Self {
        ClientDate::Instant(instant)
    }
}

impl From<String> for ClientDate {
    fn from(text: String) -> Self {
        ClientDate::Text(text)
    }
}

impl From<&str> for ClientDate {
    fn from(text: &str) -> Self {
        ClientDate::Text(text.to_string())
    }
}

/// How to treat a local date that arrives without a client offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPolicy {
    pub assume_utc_when_offset_missing: bool,
}

impl Default for OffsetPolicy {
    fn default() -> Self {
        Self {
            assume_utc_when_offset_missing: true,
        }
    }
}

/// Converts client-supplied dates to canonical UTC instants
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeNormalizer {
    policy: OffsetPolicy,
}

impl TimeNormalizer {
    pub fn new(policy: OffsetPolicy) -> Self {
        Self { policy }
    }

    /// Normalize `input` to UTC.
    ///
    /// - `YYYY-MM-DD`: local midnight of that date, i.e. UTC midnight minus
    ///   `client_offset_minutes`. Without an offset the date is taken as UTC
    ///   midnight when the policy allows it.
    /// - Anything else is parsed as a timestamp and then shifted back by
    ///   `client_offset_minutes` when one is given.
    ///
    /// Results outside years 0000..=9999 are `OutOfRange`.
    pub fn to_utc(
        &self,
        input: &ClientDate,
        client_offset_minutes: Option<i32>,
    ) -> Result<DateTime<Utc>, TimeError> {
        let instant = match input {
            ClientDate::Instant(instant) => shift_by_offset(*instant, client_offset_minutes),
            ClientDate::Text(text) => {
                let text = text.trim();
                if is_date_only(text) {
                    self.date_only_to_utc(text, client_offset_minutes)
                } else {
                    self.timestamp_to_utc(text, client_offset_minutes)
                }
            }
        }?;

        if STORABLE_YEARS.contains(&instant.year()) {
            Ok(instant)
        } else {
            Err(TimeError::OutOfRange(instant.to_rfc3339()))
        }
    }

    fn date_only_to_utc(
        &self,
        text: &str,
        client_offset_minutes: Option<i32>,
    ) -> Result<DateTime<Utc>, TimeError> {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|_| TimeError::InvalidDateFormat(text.to_string()))?;
        let midnight = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));

        match client_offset_minutes {
            Some(_) => shift_by_offset(midnight, client_offset_minutes),
            None if self.policy.assume_utc_when_offset_missing => Ok(midnight),
            None => Err(TimeError::MissingClientOffset(text.to_string())),
        }
    }

    fn timestamp_to_utc(
        &self,
        text: &str,
        client_offset_minutes: Option<i32>,
    ) -> Result<DateTime<Utc>, TimeError> {
        if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
            return shift_by_offset(zoned.with_timezone(&Utc), client_offset_minutes);
        }

        let naive = parse_naive_timestamp(text)
            .ok_or_else(|| TimeError::InvalidDateFormat(text.to_string()))?;

        if client_offset_minutes.is_none() && !self.policy.assume_utc_when_offset_missing {
            return Err(TimeError::MissingClientOffset(text.to_string()));
        }

        shift_by_offset(Utc.from_utc_datetime(&naive), client_offset_minutes)
    }
}

/// Strict `^\d{4}-\d{2}-\d{2}$` check
fn is_date_only(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_naive_timestamp(text: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// UTC = local - offset
fn shift_by_offset(
    instant: DateTime<Utc>,
    client_offset_minutes: Option<i32>,
) -> Result<DateTime<Utc>, TimeError> {
    match client_offset_minutes {
        None | Some(0) => Ok(instant),
        Some(minutes) => instant
            .checked_sub_signed(Duration::minutes(i64::from(minutes)))
            .ok_or_else(|| TimeError::OutOfRange(instant.to_rfc3339())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_date_only_with_pst_offset() {
        let normalizer = TimeNormalizer::default();

        let result = normalizer.to_utc(&"2024-01-15".into(), Some(480)).unwrap();

        assert_eq!(result, utc(2024, 1, 15, 8, 0));
    }

    #[test]
    fn test_date_only_with_offset_ahead_of_utc() {
        let normalizer = TimeNormalizer::default();

        // UTC+5:30 reports -330; local midnight is the previous UTC evening
        let result = normalizer.to_utc(&"2024-01-15".into(), Some(-330)).unwrap();

        assert_eq!(result, utc(2024, 1, 14, 18, 30));
    }

    #[test]
    fn test_date_only_without_offset_falls_back_to_utc_midnight() {
        let normalizer = TimeNormalizer::default();

        let result = normalizer.to_utc(&"2024-01-15".into(), None).unwrap();

        assert_eq!(result, utc(2024, 1, 15, 0, 0));
    }

    #[test]
    fn test_date_only_without_offset_rejected_when_fallback_disabled() {
        let normalizer = TimeNormalizer::new(OffsetPolicy {
            assume_utc_when_offset_missing: false,
        });

        let result = normalizer.to_utc(&"2024-01-15".into(), None);

        assert_eq!(
            result,
            Err(TimeError::MissingClientOffset("2024-01-15".to_string()))
        );
        // An offset makes the date unambiguous again
        assert!(normalizer.to_utc(&"2024-01-15".into(), Some(0)).is_ok());
    }

    #[test]
    fn test_impossible_calendar_date_is_invalid() {
        let normalizer = TimeNormalizer::default();

        let result = normalizer.to_utc(&"2024-02-30".into(), Some(60));

        assert_eq!(result, Err(TimeError::InvalidDateFormat("2024-02-30".to_string())));
    }

    #[test]
    fn test_full_timestamp_with_zero_offset_is_unchanged() {
        let normalizer = TimeNormalizer::default();

        let result = normalizer
            .to_utc(&"2024-03-10T14:25:00Z".into(), Some(0))
            .unwrap();

        assert_eq!(result, utc(2024, 3, 10, 14, 25));
    }

    #[test]
    fn test_full_timestamp_is_shifted_by_offset() {
        let normalizer = TimeNormalizer::default();

        let result = normalizer
            .to_utc(&"2024-03-10T14:25:00Z".into(), Some(300))
            .unwrap();

        assert_eq!(result, utc(2024, 3, 10, 9, 25));
    }

    #[test]
    fn test_full_timestamp_without_offset_keeps_its_zone() {
        let normalizer = TimeNormalizer::new(OffsetPolicy {
            assume_utc_when_offset_missing: false,
        });

        let result = normalizer
            .to_utc(&"2024-03-10T09:00:00-05:00".into(), None)
            .unwrap();

        assert_eq!(result, utc(2024, 3, 10, 14, 0));
    }

    #[test]
    fn test_zoneless_timestamp() {
        let normalizer = TimeNormalizer::default();

        assert_eq!(
            normalizer.to_utc(&"2024-03-10T07:15".into(), None).unwrap(),
            utc(2024, 3, 10, 7, 15)
        );
        assert_eq!(
            normalizer
                .to_utc(&"2024-03-10 07:15:00.250".into(), Some(60))
                .unwrap(),
            utc(2024, 3, 10, 6, 15) + Duration::milliseconds(250)
        );

        let strict = TimeNormalizer::new(OffsetPolicy {
            assume_utc_when_offset_missing: false,
        });
        assert!(matches!(
            strict.to_utc(&"2024-03-10T07:15".into(), None),
            Err(TimeError::MissingClientOffset(_))
        ));
    }

    #[test]
    fn test_structured_instant() {
        let normalizer = TimeNormalizer::default();
        let instant = utc(2024, 6, 1, 12, 0);

        assert_eq!(normalizer.to_utc(&instant.into(), None).unwrap(), instant);
        assert_eq!(
            normalizer.to_utc(&instant.into(), Some(-120)).unwrap(),
            utc(2024, 6, 1, 14, 0)
        );
    }

    #[test]
    fn test_utc_instant_with_zero_offset_round_trips() {
        let normalizer = TimeNormalizer::default();
        let instant = Utc.timestamp_millis_opt(1_718_000_123_456).unwrap();

        let once = normalizer.to_utc(&instant.into(), Some(0)).unwrap();
        let twice = normalizer
            .to_utc(&ClientDate::Text(once.to_rfc3339()), Some(0))
            .unwrap();

        assert_eq!(once, instant);
        assert_eq!(twice, instant);
    }

    #[test]
    fn test_malformed_strings() {
        let normalizer = TimeNormalizer::default();

        for input in ["", "yesterday", "2024/01/15", "2024-1-5", "15-01-2024"] {
            assert!(
                matches!(
                    normalizer.to_utc(&input.into(), Some(0)),
                    Err(TimeError::InvalidDateFormat(_))
                ),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_shift_past_four_digit_years_is_out_of_range() {
        let normalizer = TimeNormalizer::default();

        assert!(matches!(
            normalizer.to_utc(&"0000-01-01".into(), Some(480)),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            normalizer.to_utc(&"9999-12-31".into(), Some(-60)),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            normalizer.to_utc(&"9999-12-31T23:30:00Z".into(), Some(-60)),
            Err(TimeError::OutOfRange(_))
        ));

        // The edges themselves are fine
        assert_eq!(
            normalizer.to_utc(&"0000-01-01".into(), Some(-60)).unwrap(),
            Utc.with_ymd_and_hms(0, 1, 1, 1, 0, 0).unwrap()
        );
        assert_eq!(
            normalizer.to_utc(&"9999-12-31".into(), Some(480)).unwrap(),
            utc(9999, 12, 31, 8, 0)
        );
    }

    #[test]
    fn test_is_date_only() {
        assert!(is_date_only("2024-01-15"));
        assert!(!is_date_only("2024-01-15T00:00:00Z"));
        assert!(!is_date_only("2024-1-15"));
        assert!(!is_date_only("20240-1-15"));
    }
}
