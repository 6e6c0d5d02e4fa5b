//! Detection thresholds configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::jitai::DetectionSettings;

/// Thresholds and windows for the built-in risk checks.
///
/// Every field defaults to the value the detector ships with.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    #[serde(default = "default_craving_high_threshold")]
    pub craving_high_threshold: u8,

    #[serde(default = "default_mood_low_threshold")]
    pub mood_low_threshold: u8,

    #[serde(default = "default_meeting_gap_days")]
    pub meeting_gap_days: i64,

    #[serde(default = "default_isolation_days")]
    pub isolation_days: u32,

    #[serde(default = "default_isolation_boost")]
    pub isolation_boost: u8,

    #[serde(default = "default_scene_window_days")]
    pub scene_window_days: u32,

    #[serde(default = "default_scene_usage_min")]
    pub scene_usage_min: usize,

    #[serde(default = "default_rule_priority_weight")]
    pub rule_priority_weight: u8,
}

impl DetectionConfig {
    pub fn to_settings(&self) -> DetectionSettings {
        DetectionSettings {
            lookback_days: self.lookback_days,
            min_samples: self.min_samples,
            craving_high_threshold: self.craving_high_threshold,
            mood_low_threshold: self.mood_low_threshold,
            meeting_gap_days: self.meeting_gap_days,
            isolation_days: self.isolation_days,
            isolation_boost: self.isolation_boost,
            scene_window_days: self.scene_window_days,
            scene_usage_min: self.scene_usage_min,
            rule_priority_weight: self.rule_priority_weight,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check("lookback_days", self.lookback_days as u64, 1, 30)?;
        check("min_samples", self.min_samples as u64, 1, 100)?;
        check("craving_high_threshold", self.craving_high_threshold as u64, 1, 10)?;
        check("mood_low_threshold", self.mood_low_threshold as u64, 1, 10)?;
        check("meeting_gap_days", self.meeting_gap_days.max(0) as u64, 1, 365)?;
        check("isolation_days", self.isolation_days as u64, 1, 30)?;
        check("isolation_boost", self.isolation_boost as u64, 0, 100)?;
        check("scene_window_days", self.scene_window_days as u64, 1, 30)?;
        check("scene_usage_min", self.scene_usage_min as u64, 1, 100)?;
        check("rule_priority_weight", self.rule_priority_weight as u64, 0, 10)?;
        Ok(())
    }
}

fn check(field: &'static str, value: u64, min: u32, max: u32) -> Result<(), ValidationError> {
    if value < min as u64 || value > max as u64 {
        return Err(ValidationError::DetectionOutOfRange { field, min, max });
    }
    Ok(())
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            min_samples: default_min_samples(),
            craving_high_threshold: default_craving_high_threshold(),
            mood_low_threshold: default_mood_low_threshold(),
            meeting_gap_days: default_meeting_gap_days(),
            isolation_days: default_isolation_days(),
            isolation_boost: default_isolation_boost(),
            scene_window_days: default_scene_window_days(),
            scene_usage_min: default_scene_usage_min(),
            rule_priority_weight: default_rule_priority_weight(),
        }
    }
}

fn default_lookback_days() -> u32 {
    DetectionSettings::default().lookback_days
}

fn default_min_samples() -> usize {
    DetectionSettings::default().min_samples
}

fn default_craving_high_threshold() -> u8 {
    DetectionSettings::default().craving_high_threshold
}

fn default_mood_low_threshold() -> u8 {
    DetectionSettings::default().mood_low_threshold
}

fn default_meeting_gap_days() -> i64 {
    DetectionSettings::default().meeting_gap_days
}

fn default_isolation_days() -> u32 {
    DetectionSettings::default().isolation_days
}

fn default_isolation_boost() -> u8 {
    DetectionSettings::default().isolation_boost
}

fn default_scene_window_days() -> u32 {
    DetectionSettings::default().scene_window_days
}

fn default_scene_usage_min() -> usize {
    DetectionSettings::default().scene_usage_min
}

fn default_rule_priority_weight() -> u8 {
    DetectionSettings::default().rule_priority_weight
}
