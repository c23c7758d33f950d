// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::Path};

use chainview::{
    cache::config::RedisConfig,
    db::MongoDbConfig,
    readiness::{config::StartupConfig, Dependency},
    upstream::config::UpstreamConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The default environment name.
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at '{0}': {1}")]
    FileRead(String, std::io::Error),
    #[error("toml deserialization failed: {0}")]
    TomlDeserialization(toml::de::Error),
}

/// Configuration of Chainview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainviewConfig {
    pub environment: String,
    pub mongodb: MongoDbConfig,
    pub redis: RedisConfig,
    pub api: crate::api::ApiConfig,
    pub upstream: UpstreamConfig,
    pub startup: StartupConfig,
}

impl Default for ChainviewConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            mongodb: Default::default(),
            redis: Default::default(),
            api: Default::default(),
            upstream: Default::default(),
            startup: Default::default(),
        }
    }
}

impl ChainviewConfig {
    /// Reads the config from the file located at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        fs::read_to_string(&path)
            .map_err(|e| ConfigError::FileRead(path.as_ref().display().to_string(), e))
            .and_then(|contents| toml::from_str::<Self>(&contents).map_err(ConfigError::TomlDeserialization))
    }

    /// Applies command line arguments to the config.
    pub fn apply_cl_args(&mut self, args: &super::cli::ClArgs) {
        if let Some(environment) = &args.environment {
            self.environment = environment.clone();
        }
        if let Some(conn_str) = &args.mongodb.mongodb_conn_str {
            self.mongodb.conn_str = conn_str.clone();
        }
        if let Some(database_name) = &args.mongodb.mongodb_database_name {
            self.mongodb.database_name = database_name.clone();
        }
        if let Some(conn_str) = &args.redis.redis_conn_str {
            self.redis.conn_str = conn_str.clone();
        }
        if let Some(port) = args.api.api_port {
            self.api.port = port;
        }
        if let Some(base_url) = &args.upstream.upstream_base_url {
            self.upstream.base_url = base_url.clone();
        }
        if args.startup.skip_readiness_gate {
            self.startup.enabled = false;
        }
    }

    /// The dependencies the readiness gate waits for: the document store
    /// first, then the cache.
    pub fn startup_dependencies(&self) -> Result<Vec<Dependency>, super::error::Error> {
        let mut dependencies = Vec::new();
        for (host, port) in self.mongodb.hosts()? {
            dependencies.push(Dependency::new("mongodb", host, port));
        }
        let (host, port) = self.redis.host()?;
        dependencies.push(Dependency::new("redis", host, port));
        Ok(dependencies)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_file_conformity() -> Result<(), ConfigError> {
        let _ = ChainviewConfig::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/config.template.toml"))?;

        Ok(())
    }

    #[test]
    fn startup_dependency_order() {
        let config = ChainviewConfig::default();
        let dependencies = config.startup_dependencies().unwrap();
        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies[0].name, "mongodb");
        assert_eq!(dependencies[1].name, "redis");
    }
}
