//! In-memory storage adapters.
//!
//! Persistence format is out of scope for this service; these adapters keep
//! everything in process and are what the composition root wires up.

mod activity_store;
mod signal_store;

pub use activity_store::InMemoryActivityStore;
pub use signal_store::{InMemorySignalStore, DEFAULT_SIGNALS_PER_USER};
