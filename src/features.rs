//! Feature flag lookup
//!
//! Flags are provided by the host application at composition time. The wizard
//! planner only ever asks whether a named flag is enabled; it never mutates
//! flag state.

use std::collections::HashSet;
use std::env;

use crate::config::Config;

/// Flag gating the permissions step of the connection wizard
pub const CONNECT_APP_WITH_PERMISSIONS: &str = "connect_app_with_permissions";

/// Synchronous feature flag lookup
pub trait FeatureFlags: Send + Sync {
    /// Check whether a named flag is enabled
    fn is_enabled(&self, flag: &str) -> bool;
}

/// Feature flags backed by a fixed set, built once at composition time
#[derive(Debug, Clone, Default)]
pub struct StaticFeatureFlags {
    enabled: HashSet<String>,
}

impl StaticFeatureFlags {
    /// Create from an explicit list of enabled flags
    pub fn new(enabled: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }

    /// Create from the `[features]` section of the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.features.enabled.iter().cloned())
    }

    /// Create from the APPCONNECT_FEATURES environment variable
    /// (comma-separated flag names)
    pub fn from_env() -> Self {
        match env::var("APPCONNECT_FEATURES") {
            Ok(value) => Self::new(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string),
            ),
            Err(_) => Self::default(),
        }
    }
}

impl FeatureFlags for StaticFeatureFlags {
    fn is_enabled(&self, flag: &str) -> bool {
        self.enabled.contains(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_flags() {
        let flags = StaticFeatureFlags::new([CONNECT_APP_WITH_PERMISSIONS]);
        assert!(flags.is_enabled(CONNECT_APP_WITH_PERMISSIONS));
        assert!(!flags.is_enabled("unknown_flag"));
    }

    #[test]
    fn test_default_is_all_disabled() {
        let flags = StaticFeatureFlags::default();
        assert!(!flags.is_enabled(CONNECT_APP_WITH_PERMISSIONS));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config
            .features
            .enabled
            .push(CONNECT_APP_WITH_PERMISSIONS.to_string());

        let flags = StaticFeatureFlags::from_config(&config);
        assert!(flags.is_enabled(CONNECT_APP_WITH_PERMISSIONS));
    }
}
