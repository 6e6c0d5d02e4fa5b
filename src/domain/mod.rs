//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `activity` - The user's recent recovery activity, as a read-only snapshot
//! - `jitai` - Risk-signal detection, severity scoring, rules and explanations

pub mod activity;
pub mod foundation;
pub mod jitai;
