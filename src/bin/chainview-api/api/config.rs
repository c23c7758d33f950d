// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the API config and its defaults.

use hyper::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tower_http::cors::AllowOrigin;

use super::error::ConfigError;
use crate::config::ChainviewConfig;

/// The default port to serve the API on.
pub const DEFAULT_PORT: u16 = 8000;
/// The default allowed origins.
pub const DEFAULT_ALLOW_ORIGINS: &str = "*";

/// The API config.
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// The port to serve the API on.
    pub port: u16,
    /// The origins the API allows cross-origin requests from.
    pub allow_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allow_origins: vec![DEFAULT_ALLOW_ORIGINS.to_string()],
        }
    }
}

/// The API config in a runtime-usable form.
#[derive(Clone, Debug)]
pub struct ApiConfigData {
    pub port: u16,
    pub allow_origins: AllowOrigin,
    pub environment: String,
}

impl TryFrom<&ChainviewConfig> for ApiConfigData {
    type Error = ConfigError;

    fn try_from(config: &ChainviewConfig) -> Result<Self, Self::Error> {
        let allow_origins = if config.api.allow_origins.iter().any(|origin| origin == "*") {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                config
                    .api
                    .allow_origins
                    .iter()
                    .map(|origin| HeaderValue::from_str(origin))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        };

        Ok(Self {
            port: config.api.port,
            allow_origins,
            environment: config.environment.clone(),
        })
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn origins_parsed() {
        let mut config = ChainviewConfig::default();
        config.api.allow_origins = vec!["https://example.com".to_string()];
        let data = ApiConfigData::try_from(&config).unwrap();
        assert_eq!(data.port, DEFAULT_PORT);

        config.api.allow_origins = vec!["not a header\n".to_string()];
        assert!(ApiConfigData::try_from(&config).is_err());
    }
}
