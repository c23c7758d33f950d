// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the upstream explorer config and its defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The default explorer API to fetch from.
pub const DEFAULT_BASE_URL: &str = "https://api.blockcypher.com/v1/btc/main";
/// The default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// The [`ExplorerClient`](super::ExplorerClient) config.
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    /// The base URL of the explorer API.
    pub base_url: String,
    /// The timeout applied to each upstream request.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            // Panic: the default is a valid constant expression.
            request_timeout: DEFAULT_REQUEST_TIMEOUT.parse::<humantime::Duration>().unwrap().into(),
        }
    }
}
