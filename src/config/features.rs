//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,

    /// Wrap the router in a request tracing layer
    #[serde(default = "default_enable_tracing")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            json_logs: false,
            enable_tracing: default_enable_tracing(),
        }
    }
}

fn default_enable_tracing() -> bool {
    true
}
