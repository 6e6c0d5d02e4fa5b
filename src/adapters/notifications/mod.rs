//! Intervention notifications.
//!
//! - `InterventionNotifier` - Event handler with an explicit init/dispose lifecycle
//! - `NotificationDispatcher` - Background loop draining the notifier into a sink
//! - `TracingNotificationSink` - Sink that logs each notification

mod dispatcher;
mod intervention_notifier;

pub use dispatcher::{NotificationDispatcher, TracingNotificationSink, DEFAULT_DISPATCH_INTERVAL};
pub use intervention_notifier::{
    InterventionNotifier, NotifierError, NotifierSettings, NotifierState, RISK_SIGNALS_DETECTED,
};
