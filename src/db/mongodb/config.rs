// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the `MongoDb` config and its defaults.

use mongodb::{
    error::Error,
    options::{ConnectionString, HostInfo},
};
use serde::{Deserialize, Serialize};

/// The default connection string of the database.
pub const DEFAULT_CONN_STR: &str = "mongodb://localhost:27017";
/// The default name of the database to connect to.
pub const DEFAULT_DATABASE_NAME: &str = "chainview";
/// The default minimum amount of connections in the pool.
pub const DEFAULT_MIN_POOL_SIZE: u32 = 2;
/// The port assumed when the connection string does not carry one.
pub const DEFAULT_PORT: u16 = 27017;

/// The [`MongoDb`](super::MongoDb) config.
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MongoDbConfig {
    /// The connection string of the database.
    pub conn_str: String,
    /// The MongoDB username.
    pub username: Option<String>,
    /// The MongoDB password.
    pub password: Option<String>,
    /// The name of the database to connect to.
    pub database_name: String,
    /// The minimum amount of connections in the pool.
    pub min_pool_size: u32,
}

impl MongoDbConfig {
    /// Gets the `(host, port)` pairs named by the connection string.
    pub fn hosts(&self) -> Result<Vec<(String, u16)>, Error> {
        let host_info = ConnectionString::parse(&self.conn_str)?.host_info;
        Ok(match host_info {
            HostInfo::HostIdentifiers(hosts) => hosts
                .iter()
                .filter_map(|address| match address {
                    mongodb::options::ServerAddress::Tcp { host, port } => {
                        Some((host.clone(), port.unwrap_or(DEFAULT_PORT)))
                    }
                    _ => None,
                })
                .collect(),
            HostInfo::DnsRecord(hostname) => vec![(hostname, DEFAULT_PORT)],
            _ => Vec::new(),
        })
    }
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            conn_str: DEFAULT_CONN_STR.to_string(),
            username: None,
            password: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            min_pool_size: DEFAULT_MIN_POOL_SIZE,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn hosts_from_conn_str() {
        let config = MongoDbConfig {
            conn_str: "mongodb://mongodb:27017".to_string(),
            ..Default::default()
        };
        assert_eq!(config.hosts().unwrap(), vec![("mongodb".to_string(), 27017)]);

        let config = MongoDbConfig {
            conn_str: "mongodb://db1:27017,db2:27018".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.hosts().unwrap(),
            vec![("db1".to_string(), 27017), ("db2".to_string(), 27018)]
        );
    }

    #[test]
    fn hosts_default_port() {
        let config = MongoDbConfig {
            conn_str: "mongodb://mongodb".to_string(),
            ..Default::default()
        };
        assert_eq!(config.hosts().unwrap(), vec![("mongodb".to_string(), DEFAULT_PORT)]);
    }
}
