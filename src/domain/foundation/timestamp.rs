//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string (e.g. `2024-01-15T10:30:00Z`).
    pub fn parse_rfc3339(value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| ValidationError::invalid_format("timestamp", e.to_string()))
    }

    /// Creates a timestamp from Unix milliseconds.
    ///
    /// Out-of-range values saturate to the Unix epoch.
    pub fn from_unix_millis(millis: i64) -> Self {
        Self(Utc.timestamp_millis_opt(millis).single().unwrap_or_default())
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the timestamp as Unix milliseconds.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Whole days elapsed from `other` to `self`, truncated toward zero.
    ///
    /// Negative when `other` lies in the future relative to `self`.
    pub fn whole_days_since(&self, other: &Timestamp) -> i64 {
        self.duration_since(other).num_days()
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(
            Duration::try_days(days)
                .and_then(|delta| self.0.checked_sub_signed(delta))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Saturates at the latest representable instant.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(
            Duration::try_days(days)
                .and_then(|delta| self.0.checked_add_signed(delta))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    /// Creates a new timestamp by subtracting the specified number of hours.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_hours(&self, hours: i64) -> Self {
        Self(
            Duration::try_hours(hours)
                .and_then(|delta| self.0.checked_sub_signed(delta))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }

    /// Formats as RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}
