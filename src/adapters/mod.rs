//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `events` - In-memory event bus
//! - `http` - REST API (axum)
//! - `memory` - In-memory activity, rule and signal stores
//! - `notifications` - Intervention notifier, dispatcher and sinks

pub mod clock;
pub mod events;
pub mod http;
pub mod memory;
pub mod notifications;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use memory::{InMemoryActivityStore, InMemorySignalStore};
pub use notifications::{
    InterventionNotifier, NotificationDispatcher, NotifierError, NotifierSettings, NotifierState,
    TracingNotificationSink,
};
