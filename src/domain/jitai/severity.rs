//! Severity Scorer - maps recent activity to a 0-100 risk score.
//!
//! Four independently capped contributions are summed, rounded and clamped:
//!
//! | Factor        | Cap | Raw contribution            |
//! |---------------|-----|-----------------------------|
//! | Cravings      | 40  | `avg / 10 * 40`             |
//! | Mood          | 30  | `(6 - avg) / 5 * 30`        |
//! | Meeting gap   | 20  | `gap_days / 7 * 20`         |
//! | Scene usage   | 10  | `count / 3 * 10`            |
//!
//! Empty, negative or NaN inputs contribute zero for that factor.

/// Maximum points from craving levels.
pub const CRAVING_CAP: f64 = 40.0;
/// Maximum points from low mood.
pub const MOOD_CAP: f64 = 30.0;
/// Maximum points from days since the last meeting.
pub const MEETING_GAP_CAP: f64 = 20.0;
/// Maximum points from recovery-scene activations.
pub const SCENE_USAGE_CAP: f64 = 10.0;

/// Highest possible severity.
pub const MAX_SEVERITY: u8 = 100;

/// Stateless severity calculator.
pub struct SeverityScorer;

impl SeverityScorer {
    /// Combined score over all four factors.
    pub fn score(
        recent_cravings: &[f64],
        recent_moods: &[f64],
        meeting_gap_days: f64,
        scene_usage_count: usize,
    ) -> u8 {
        let total = Self::craving_term(recent_cravings)
            + Self::mood_term(recent_moods)
            + Self::meeting_gap_term(meeting_gap_days)
            + Self::scene_usage_term(scene_usage_count);

        to_severity(total)
    }

    /// Score with every factor at zero. Built-in boosts and rule priorities
    /// are added on top of this.
    pub fn base() -> u8 {
        Self::score(&[], &[], 0.0, 0)
    }

    /// Craving contribution in `[0, 40]`; zero for no samples.
    pub fn craving_term(recent_cravings: &[f64]) -> f64 {
        mean(recent_cravings)
            .map(|avg| capped(avg / 10.0 * CRAVING_CAP, CRAVING_CAP))
            .unwrap_or(0.0)
    }

    /// Mood contribution in `[0, 30]`; lower mood scores higher.
    pub fn mood_term(recent_moods: &[f64]) -> f64 {
        mean(recent_moods)
            .map(|avg| capped((6.0 - avg) / 5.0 * MOOD_CAP, MOOD_CAP))
            .unwrap_or(0.0)
    }

    /// Meeting-gap contribution in `[0, 20]`.
    pub fn meeting_gap_term(meeting_gap_days: f64) -> f64 {
        capped(meeting_gap_days / 7.0 * MEETING_GAP_CAP, MEETING_GAP_CAP)
    }

    /// Scene-usage contribution in `[0, 10]`.
    pub fn scene_usage_term(scene_usage_count: usize) -> f64 {
        capped(scene_usage_count as f64 / 3.0 * SCENE_USAGE_CAP, SCENE_USAGE_CAP)
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rounds a raw point total to an integer severity in `[0, 100]`.
pub(crate) fn to_severity(points: f64) -> u8 {
    capped(points.round(), f64::from(MAX_SEVERITY)) as u8
}

// f64::max drops NaN, so NaN lands on 0.
fn capped(raw: f64, cap: f64) -> f64 {
    raw.max(0.0).min(cap)
}
