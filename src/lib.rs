//! Recovery Companion - just-in-time risk signals for addiction recovery.
//!
//! Detects risk patterns (high cravings, low mood, skipped meetings,
//! isolation, frequent trigger scenes, user-authored rules) over a snapshot
//! of recent activity, scores each one, and explains it in plain language.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
