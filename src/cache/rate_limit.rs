// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! A fixed-window rate limiter backed by Redis.

use std::time::Duration;

use redis::{AsyncCommands, RedisError};
use tracing::debug;

use super::{config::RedisConfig, RedisCache};

const KEY_PREFIX: &str = "rate_limit";

/// Counts requests per identifier in fixed windows.
///
/// The window is keyed by identifier (here: the request path), so the limit
/// applies per resource rather than per client. The counter key is created
/// on first use and expires with the window.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    cache: RedisCache,
    limit: u64,
    window: Duration,
}

impl RateLimiter {
    /// Creates a rate limiter over the given cache with the configured
    /// limit and window.
    pub fn new(cache: RedisCache, config: &RedisConfig) -> Self {
        Self {
            cache,
            limit: config.rate_limit,
            window: config.rate_limit_window,
        }
    }

    /// Records a hit for `identifier` and reports whether the limit for the
    /// current window is now exceeded.
    pub async fn is_limited(&self, identifier: &str) -> Result<bool, RedisError> {
        let key = Self::key(identifier);
        let mut conn = self.cache.connection();

        let count: u64 = conn.incr(&key, 1u64).await?;
        debug!("rate limit counter for `{identifier}` is now {count}");

        if count == 1 {
            let _: () = conn.expire(&key, self.window.as_secs() as usize).await?;
        }

        Ok(count > self.limit)
    }

    fn key(identifier: &str) -> String {
        format!("{KEY_PREFIX}:{identifier}")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn key_namespacing() {
        assert_eq!(RateLimiter::key("/transaction/abc"), "rate_limit:/transaction/abc");
    }
}
