// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the `RedisCache` config and its defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// The default connection string of the cache.
pub const DEFAULT_CONN_STR: &str = "redis://localhost:6379";
/// The default number of requests allowed per window and route.
pub const DEFAULT_RATE_LIMIT: u64 = 10;
/// The default rate limit window.
pub const DEFAULT_RATE_LIMIT_WINDOW: &str = "60s";
/// The port assumed when the connection string does not carry one.
pub const DEFAULT_PORT: u16 = 6379;

/// The [`RedisCache`](super::RedisCache) config.
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedisConfig {
    /// The connection string of the cache.
    pub conn_str: String,
    /// The number of requests allowed per window and route.
    pub rate_limit: u64,
    /// The length of the rate limit window.
    #[serde(with = "humantime_serde")]
    pub rate_limit_window: Duration,
}

impl RedisConfig {
    /// Gets the `(host, port)` pair named by the connection string.
    pub fn host(&self) -> Result<(String, u16), url::ParseError> {
        let url = Url::parse(&self.conn_str)?;
        let host = url.host_str().ok_or(url::ParseError::EmptyHost)?.to_string();
        Ok((host, url.port().unwrap_or(DEFAULT_PORT)))
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            conn_str: DEFAULT_CONN_STR.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            // Panic: the default is a valid constant expression.
            rate_limit_window: DEFAULT_RATE_LIMIT_WINDOW.parse::<humantime::Duration>().unwrap().into(),
        }
    }
}
