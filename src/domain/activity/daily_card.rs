//! Daily check-in card and its optional midday pulse check.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Lowest (worst) mood on the pulse-check scale.
pub const MOOD_MIN: u8 = 1;
/// Highest (best) mood on the pulse-check scale.
pub const MOOD_MAX: u8 = 5;
/// Highest craving on the pulse-check scale (0 = none).
pub const CRAVING_MAX: u8 = 10;

/// Quick mood/craving reading taken during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddayPulseCheck {
    /// 1 (worst) to 5 (best).
    pub mood: u8,
    /// 0 (none) to 10 (overwhelming).
    pub craving: u8,
    pub timestamp: Timestamp,
}

impl MiddayPulseCheck {
    /// Creates a validated pulse check.
    pub fn new(mood: u8, craving: u8, timestamp: Timestamp) -> Result<Self, ValidationError> {
        if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
            return Err(ValidationError::out_of_range(
                "mood",
                MOOD_MIN.into(),
                MOOD_MAX.into(),
                mood.into(),
            ));
        }
        if craving > CRAVING_MAX {
            return Err(ValidationError::out_of_range(
                "craving",
                0,
                CRAVING_MAX.into(),
                craving.into(),
            ));
        }
        Ok(Self {
            mood,
            craving,
            timestamp,
        })
    }
}

/// One card per calendar date. Cards are amended, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCard {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midday_pulse_check: Option<MiddayPulseCheck>,
}

impl DailyCard {
    /// Creates a card with no pulse check yet.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            midday_pulse_check: None,
        }
    }

    /// Creates a card for the pulse check's calendar date.
    pub fn with_pulse_check(check: MiddayPulseCheck) -> Self {
        Self {
            date: check.timestamp.as_datetime().date_naive(),
            midday_pulse_check: Some(check),
        }
    }
}
