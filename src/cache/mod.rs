// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the `RedisCache` type.

pub mod config;
mod rate_limit;

use redis::{aio::ConnectionManager, Client, RedisError};

use self::config::RedisConfig;
pub use self::rate_limit::RateLimiter;

/// A handle to the underlying Redis instance.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Constructs a [`RedisCache`] by connecting to a Redis instance.
    pub async fn connect(config: &RedisConfig) -> Result<Self, RedisError> {
        let client = Client::open(config.conn_str.as_str())?;
        let manager = client.get_tokio_connection_manager().await?;

        Ok(Self { manager })
    }

    /// Issues a `PING` command to check that the cache is reachable.
    pub async fn ping(&self) -> Result<(), RedisError> {
        let mut conn = self.manager.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    pub(crate) fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}
