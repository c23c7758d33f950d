// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the readiness gate config and its defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::RetryPolicy;

/// Whether the gate runs at startup by default.
pub const DEFAULT_ENABLED: bool = true;
/// The default polling interval.
pub const DEFAULT_INTERVAL: &str = "300ms";
/// The default per-attempt connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: &str = "1s";
/// The default number of attempts per dependency.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// The readiness gate config.
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartupConfig {
    /// Whether to wait for dependencies before serving.
    pub enabled: bool,
    /// The time that has to pass until a new connection attempt is made.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// The timeout applied to each connection attempt.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// The number of attempts before a dependency is reported unreachable.
    pub max_attempts: usize,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLED,
            // Panic: the defaults are valid constant expressions.
            interval: DEFAULT_INTERVAL.parse::<humantime::Duration>().unwrap().into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT.parse::<humantime::Duration>().unwrap().into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<&StartupConfig> for RetryPolicy {
    fn from(config: &StartupConfig) -> Self {
        Self {
            interval: config.interval,
            connect_timeout: config.connect_timeout,
            max_attempts: config.max_attempts,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = StartupConfig::default();
        assert!(config.enabled);
        assert_eq!(config.interval, Duration::from_millis(300));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.max_attempts, 100);
    }
}
