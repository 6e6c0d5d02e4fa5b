//! Intervention notification configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::NotifierSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Subscribe the notifier and run the dispatcher
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Signals below this severity are not pushed
    #[serde(default = "default_min_severity")]
    pub min_severity: u8,

    /// Queue bound before the oldest notification is dropped
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Dispatcher flush interval in milliseconds
    #[serde(default = "default_dispatch_interval_ms")]
    pub dispatch_interval_ms: u64,
}

impl NotificationConfig {
    pub fn notifier_settings(&self) -> NotifierSettings {
        NotifierSettings {
            min_severity: self.min_severity,
            max_pending: self.max_pending,
        }
    }

    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_severity > 100 {
            return Err(ValidationError::InvalidMinSeverity);
        }
        if self.max_pending == 0 {
            return Err(ValidationError::InvalidMaxPending);
        }
        if self.dispatch_interval_ms == 0 {
            return Err(ValidationError::InvalidDispatchInterval);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_severity: default_min_severity(),
            max_pending: default_max_pending(),
            dispatch_interval_ms: default_dispatch_interval_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_min_severity() -> u8 {
    NotifierSettings::default().min_severity
}

fn default_max_pending() -> usize {
    NotifierSettings::default().max_pending
}

fn default_dispatch_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotificationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.notifier_settings(), NotifierSettings::default());
        assert_eq!(config.dispatch_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = NotificationConfig {
            min_severity: 101,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMinSeverity));

        let config = NotificationConfig {
            max_pending: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxPending));

        let config = NotificationConfig {
            dispatch_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidDispatchInterval)
        );
    }
}
