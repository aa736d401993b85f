use chrono::{DateTime, Datelike, Utc};
use std::cmp::Ordering;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseTimeError {
    #[error("'{0}' is not a numeric epoch value")]
    NotNumeric(String),
    #[error("'{0}' is outside the supported date range")]
    OutOfRange(String),
}

/// A Unix epoch timestamp in seconds together with its UTC calendar date.
///
/// Fractional seconds are kept so that ordering follows the raw input values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochTime {
    secs: f64,
    datetime: DateTime<Utc>,
}

impl EpochTime {
    pub fn from_secs(secs: f64) -> Result<Self, ParseTimeError> {
        if !secs.is_finite() {
            return Err(ParseTimeError::NotNumeric(secs.to_string()));
        }
        let whole = secs.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return Err(ParseTimeError::OutOfRange(secs.to_string()));
        }
        let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
        let datetime = DateTime::from_timestamp(whole as i64, nanos)
            .ok_or_else(|| ParseTimeError::OutOfRange(secs.to_string()))?;
        Ok(Self { secs, datetime })
    }

    /// Parses a textual epoch such as `1700000000` or `1700000000.5`.
    pub fn parse(value: &str) -> Result<Self, ParseTimeError> {
        let trimmed = value.trim();
        let secs = trimmed
            .parse::<f64>()
            .map_err(|_| ParseTimeError::NotNumeric(trimmed.to_owned()))?;
        if !secs.is_finite() {
            return Err(ParseTimeError::NotNumeric(trimmed.to_owned()));
        }
        Self::from_secs(secs).map_err(|err| match err {
            ParseTimeError::OutOfRange(_) => ParseTimeError::OutOfRange(trimmed.to_owned()),
            other => other,
        })
    }

    pub fn secs(&self) -> f64 {
        self.secs
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    /// `YYYY-MM-DD HH:MM:SS` in UTC. Fractional seconds are appended only when present.
    pub fn to_utc_string(&self) -> String {
        self.datetime.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }

    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    pub fn month(&self) -> u32 {
        self.datetime.month()
    }
}

impl Eq for EpochTime {}

impl PartialOrd for EpochTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EpochTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.secs.total_cmp(&other.secs)
    }
}
