//! Composition root.
//!
//! Wires the in-memory adapters, event bus, detector and notifier into the
//! HTTP application state. The binary and the HTTP integration tests both
//! start from `AppServices`.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::adapters::http::{app_router, JitaiAppState};
use crate::adapters::notifications::RISK_SIGNALS_DETECTED;
use crate::adapters::{
    InMemoryActivityStore, InMemoryEventBus, InMemorySignalStore, InterventionNotifier,
    NotifierError, SystemClock,
};
use crate::config::AppConfig;
use crate::domain::jitai::SignalDetector;
use crate::ports::{Clock, EventSubscriber};

pub struct AppServices {
    pub activity_store: Arc<InMemoryActivityStore>,
    pub signal_store: Arc<InMemorySignalStore>,
    pub event_bus: Arc<InMemoryEventBus>,
    pub notifier: Arc<InterventionNotifier>,
    pub clock: Arc<dyn Clock>,
    pub detector: SignalDetector,
}

impl AppServices {
    pub fn build(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            activity_store: Arc::new(InMemoryActivityStore::new()),
            signal_store: Arc::new(InMemorySignalStore::new()),
            event_bus: Arc::new(InMemoryEventBus::new()),
            notifier: Arc::new(InterventionNotifier::new(
                config.notifications.notifier_settings(),
            )),
            clock,
            detector: SignalDetector::with_settings(config.detection.to_settings()),
        }
    }

    /// Activates the notifier and subscribes it to detection events.
    pub fn start_notifier(&self) -> Result<(), NotifierError> {
        self.notifier.init()?;
        self.event_bus
            .subscribe(RISK_SIGNALS_DETECTED, self.notifier.clone());
        info!(event_type = RISK_SIGNALS_DETECTED, "Notifier subscribed");
        Ok(())
    }

    pub fn app_state(&self) -> JitaiAppState {
        JitaiAppState {
            snapshot_reader: self.activity_store.clone(),
            snapshot_writer: self.activity_store.clone(),
            rule_repository: self.activity_store.clone(),
            signal_repository: self.signal_store.clone(),
            event_publisher: self.event_bus.clone(),
            clock: self.clock.clone(),
            detector: self.detector.clone(),
        }
    }

    pub fn router(&self, config: &AppConfig) -> Router {
        app_router(self.app_state(), &config.server, &config.features)
    }
}
