//! NotificationDispatcher - background loop that drains the notifier into a sink.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 1s | How often pending notifications are flushed |
//!
//! ## Graceful Shutdown
//!
//! On shutdown the dispatcher flushes once more before returning.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;
use tracing::{info, warn};

use super::InterventionNotifier;
use crate::domain::foundation::DomainError;
use crate::ports::{Notification, NotificationSink};

pub const DEFAULT_DISPATCH_INTERVAL: Duration = Duration::from_secs(1);

pub struct NotificationDispatcher {
    notifier: Arc<InterventionNotifier>,
    sink: Arc<dyn NotificationSink>,
    interval: Duration,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<InterventionNotifier>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            notifier,
            sink,
            interval: DEFAULT_DISPATCH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run until `shutdown` flips to true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.dispatch_once().await;
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.dispatch_once().await;
                }
            }
        }
    }

    /// Deliver everything pending. Returns how many were delivered.
    ///
    /// Failed deliveries are logged and not retried.
    pub async fn dispatch_once(&self) -> usize {
        let mut delivered = 0;
        for notification in self.notifier.take_pending() {
            match self.sink.deliver(&notification).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(
                    signal_id = %notification.signal_id,
                    error = %e,
                    "Failed to deliver notification"
                ),
            }
        }
        delivered
    }
}

/// Sink that records each notification in the service log.
///
/// Used until a push provider is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DomainError> {
        info!(
            user_id = %notification.user_id,
            signal_id = %notification.signal_id,
            signal_type = notification.signal_type.as_str(),
            severity = notification.severity,
            title = %notification.title,
            "Intervention notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifications::NotifierSettings;
    use crate::domain::foundation::{ErrorCode, Timestamp, UserId};
    use crate::domain::jitai::{RiskSignal, RiskSignalsDetected, SignalInputs, SignalType};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<Notification>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn deliver(&self, notification: &Notification) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::InternalError, "push down"));
            }
            self.delivered.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn notifier_with_pending(count: usize) -> Arc<InterventionNotifier> {
        let notifier = Arc::new(InterventionNotifier::new(NotifierSettings {
            min_severity: 0,
            max_pending: 100,
        }));
        notifier.init().unwrap();
        let signals = (0..count)
            .map(|_| {
                RiskSignal::new(
                    SignalType::Isolation,
                    20,
                    Timestamp::now(),
                    SignalInputs::new().with("days", 3u64),
                    vec![],
                )
            })
            .collect();
        notifier.accept(&RiskSignalsDetected::new(
            UserId::new("user-1").unwrap(),
            signals,
            Timestamp::now(),
        ));
        notifier
    }

    #[tokio::test]
    async fn dispatch_once_drains_into_sink() {
        let notifier = notifier_with_pending(2);
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = NotificationDispatcher::new(notifier.clone(), sink.clone());

        assert_eq!(dispatcher.dispatch_once().await, 2);
        assert_eq!(sink.delivered.lock().unwrap().len(), 2);
        assert_eq!(notifier.pending_count(), 0);
    }

    #[tokio::test]
    async fn failed_delivery_is_dropped() {
        let notifier = notifier_with_pending(1);
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::new(notifier.clone(), sink);

        assert_eq!(dispatcher.dispatch_once().await, 0);
        assert_eq!(notifier.pending_count(), 0);
    }

    #[tokio::test]
    async fn run_flushes_on_shutdown() {
        let notifier = notifier_with_pending(3);
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = NotificationDispatcher::new(notifier, sink.clone())
            .with_interval(Duration::from_secs(3600));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { dispatcher.run(rx).await });
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(sink.delivered.lock().unwrap().len(), 3);
    }
}
