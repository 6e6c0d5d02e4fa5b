//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Activity Ports
//!
//! - `ActivitySnapshotReader` / `ActivitySnapshotWriter` - Per-user activity snapshot
//! - `JitaiRuleRepository` - User-authored rules
//! - `RiskSignalRepository` - Emitted signals and their feedback
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Notifications
//!
//! - `NotificationSink` - Delivery target for intervention notifications
//!
//! ## Time
//!
//! - `Clock` - Source of "now" for the application layer

mod activity_snapshot;
mod clock;
mod event_publisher;
mod event_subscriber;
mod jitai_rule_repository;
mod notification_sink;
mod risk_signal_repository;

pub use activity_snapshot::{ActivitySnapshotReader, ActivitySnapshotWriter};
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use jitai_rule_repository::JitaiRuleRepository;
pub use notification_sink::{Notification, NotificationSink};
pub use risk_signal_repository::RiskSignalRepository;
