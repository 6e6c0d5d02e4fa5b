//! Activity records owned by the client store and read by risk detection.
//!
//! Nothing here is mutated by the detector; a snapshot is read once per pass.

mod daily_card;
mod records;
mod snapshot;

pub use daily_card::{DailyCard, MiddayPulseCheck, CRAVING_MAX, MOOD_MAX, MOOD_MIN};
pub use records::{JournalEntry, Meeting, RecoveryScene, SceneUsage};
pub use snapshot::ActivitySnapshot;
