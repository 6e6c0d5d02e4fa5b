//! Explanation Generator - turns a signal and its evidence into a sentence.

use super::{SignalInputs, SignalType};

const CUSTOM_DEFAULT: &str = "One of your custom check-in rules was triggered.";
const GENERIC: &str = "We noticed a pattern that may be worth checking in on.";

/// Stateless sentence builder for suggestion sheets.
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Explains a known signal type. Missing evidence reads as zero.
    pub fn explain(signal_type: SignalType, inputs: &SignalInputs) -> String {
        match signal_type {
            SignalType::HighCravings => {
                let days = inputs.count("days").unwrap_or(0);
                format!(
                    "Your cravings have averaged {}/10 for {} {} in a row.",
                    format_level(inputs.number("avgCraving").unwrap_or(0.0)),
                    days,
                    plural(days, "night", "nights"),
                )
            }
            SignalType::LowMood => {
                let days = inputs.count("days").unwrap_or(0);
                format!(
                    "Your mood has been low (averaging {}/5) for {} {} in a row.",
                    format_level(inputs.number("avgMood").unwrap_or(0.0)),
                    days,
                    plural(days, "day", "days"),
                )
            }
            SignalType::SkippedMeetings => {
                let gap = inputs.count("gapDays").unwrap_or(0);
                format!(
                    "It's been {} {} since your last meeting.",
                    gap,
                    plural(gap, "day", "days"),
                )
            }
            SignalType::Isolation => {
                let days = inputs.count("days").unwrap_or(0);
                format!(
                    "You haven't written in your journal for {} {}.",
                    days,
                    plural(days, "day", "days"),
                )
            }
            SignalType::TriggerScene => {
                let count = inputs.count("count").unwrap_or(0);
                let days = inputs.count("days").unwrap_or(0);
                format!(
                    "You've opened a recovery scene {} {} in the last {} {}.",
                    count,
                    plural(count, "time", "times"),
                    days,
                    plural(days, "day", "days"),
                )
            }
            SignalType::Custom => inputs
                .text("explanation")
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or(CUSTOM_DEFAULT)
                .to_string(),
        }
    }

    /// Explains a raw wire tag; unrecognized tags get a generic sentence.
    pub fn explain_tag(tag: &str, inputs: &SignalInputs) -> String {
        match SignalType::from_tag(tag) {
            Some(signal_type) => Self::explain(signal_type, inputs),
            None => GENERIC.to_string(),
        }
    }
}

fn plural(n: u64, singular: &'static str, plural: &'static str) -> &'static str {
    if n == 1 {
        singular
    } else {
        plural
    }
}

/// `8.0` -> `"8"`, `7.25` -> `"7.3"`.
fn format_level(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}
