//! InterventionNotifier - turns detected risk signals into pending notifications.
//!
//! Explicit lifecycle: `Idle --init()--> Active --dispose()--> Disposed`.
//! Only an active notifier queues anything; a disposed one cannot be revived.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::jitai::{RiskSignal, RiskSignalsDetected, SignalType};
use crate::ports::{EventHandler, Notification};

/// Event type the notifier subscribes to.
pub const RISK_SIGNALS_DETECTED: &str = "jitai.risk_signals_detected.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierState {
    Idle,
    Active,
    Disposed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    #[error("Notifier is already active")]
    AlreadyActive,

    #[error("Notifier has been disposed")]
    Disposed,
}

/// Tunables for the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierSettings {
    /// Signals below this severity never notify.
    pub min_severity: u8,
    /// Oldest pending notifications are dropped beyond this.
    pub max_pending: usize,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            min_severity: 40,
            max_pending: 256,
        }
    }
}

struct Inner {
    state: NotifierState,
    pending: VecDeque<Notification>,
}

pub struct InterventionNotifier {
    settings: NotifierSettings,
    inner: Mutex<Inner>,
}

impl InterventionNotifier {
    pub fn new(settings: NotifierSettings) -> Self {
        Self {
            settings,
            inner: Mutex::new(Inner {
                state: NotifierState::Idle,
                pending: VecDeque::new(),
            }),
        }
    }

    pub fn settings(&self) -> &NotifierSettings {
        &self.settings
    }

    pub fn state(&self) -> NotifierState {
        self.lock().state
    }

    /// Idle -> Active.
    pub fn init(&self) -> Result<(), NotifierError> {
        let mut inner = self.lock();
        match inner.state {
            NotifierState::Idle => {
                inner.state = NotifierState::Active;
                info!(
                    min_severity = self.settings.min_severity,
                    "Intervention notifier active"
                );
                Ok(())
            }
            NotifierState::Active => Err(NotifierError::AlreadyActive),
            NotifierState::Disposed => Err(NotifierError::Disposed),
        }
    }

    /// Moves to Disposed and drops anything still pending. Returns the
    /// number of notifications dropped. Safe to call more than once.
    pub fn dispose(&self) -> usize {
        let mut inner = self.lock();
        let dropped = inner.pending.len();
        inner.pending.clear();
        if inner.state != NotifierState::Disposed {
            inner.state = NotifierState::Disposed;
            info!(dropped, "Intervention notifier disposed");
        }
        dropped
    }

    /// Removes and returns everything pending, oldest first.
    pub fn take_pending(&self) -> Vec<Notification> {
        self.lock().pending.drain(..).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    /// Queues notifications for a detection batch. Returns how many of the
    /// batch are still pending afterwards.
    pub fn accept(&self, detected: &RiskSignalsDetected) -> usize {
        let notifications: Vec<Notification> = detected
            .signals
            .iter()
            .filter(|signal| signal.severity >= self.settings.min_severity)
            .map(|signal| notification_for(detected, signal))
            .collect();

        let mut inner = self.lock();
        if inner.state != NotifierState::Active {
            warn!(
                state = ?inner.state,
                user_id = %detected.user_id,
                "Notifier not active, dropping risk signals"
            );
            return 0;
        }

        let batch = notifications.len();
        for notification in notifications {
            if inner.pending.len() >= self.settings.max_pending {
                if let Some(dropped) = inner.pending.pop_front() {
                    warn!(signal_id = %dropped.signal_id, "Notification queue full, dropping oldest");
                }
            }
            inner.pending.push_back(notification);
        }

        // The batch sits at the tail of the queue.
        let queued = batch.min(inner.pending.len());
        debug!(
            user_id = %detected.user_id,
            queued,
            pending = inner.pending.len(),
            "Queued intervention notifications"
        );
        queued
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InterventionNotifier {
    fn default() -> Self {
        Self::new(NotifierSettings::default())
    }
}

#[async_trait]
impl EventHandler for InterventionNotifier {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let detected: RiskSignalsDetected = event.payload_as().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Malformed {} payload: {}", RISK_SIGNALS_DETECTED, e),
            )
        })?;
        self.accept(&detected);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InterventionNotifier"
    }
}

fn notification_for(detected: &RiskSignalsDetected, signal: &RiskSignal) -> Notification {
    Notification {
        user_id: detected.user_id.clone(),
        signal_id: signal.id.clone(),
        signal_type: signal.signal_type,
        severity: signal.severity,
        title: title_for(signal),
        body: signal.explanation(),
        created_at: detected.detected_at,
    }
}

fn title_for(signal: &RiskSignal) -> String {
    match signal.signal_type {
        SignalType::HighCravings => "Cravings have been strong".to_string(),
        SignalType::LowMood => "Checking in on your mood".to_string(),
        SignalType::SkippedMeetings => "It's been a while since a meeting".to_string(),
        SignalType::Isolation => "How are you doing?".to_string(),
        SignalType::TriggerScene => "You've been reaching for your scenes".to_string(),
        SignalType::Custom => signal
            .inputs
            .text("ruleName")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Your check-in rule")
            .to_string(),
    }
}
