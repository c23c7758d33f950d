// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! The startup readiness gate.
//!
//! In a multi-container deployment the database and the cache may come up
//! after the service itself. The gate polls each dependency's TCP port,
//! strictly one after the other, and only then does startup proceed to
//! serving. Once it returns, the gate holds no state and plays no further
//! role in the life of the process.
//!
//! Polling is bounded: a dependency that stays unreachable for the whole
//! retry budget fails startup with [`ReadinessError::Unreachable`] instead
//! of blocking forever.

pub mod config;

use std::time::Duration;

use thiserror::Error;
use tokio::{net::TcpStream, time::timeout};
use tracing::{info, warn};

/// The errors that can happen while waiting for dependencies.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ReadinessError {
    #[error("dependency `{name}` at {addr} did not become reachable after {attempts} attempts")]
    Unreachable {
        name: String,
        addr: String,
        attempts: usize,
    },
}

/// A network dependency the service cannot start without.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Dependency {
    /// A human-readable name used in log output.
    pub name: String,
    /// The host to probe.
    pub host: String,
    /// The port to probe.
    pub port: u16,
}

impl Dependency {
    /// Creates a new [`Dependency`].
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// The `host:port` address of the dependency.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How often and how long to probe before giving up.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// The time that has to pass until a new connection attempt is made.
    pub interval: Duration,
    /// The timeout applied to each connection attempt.
    pub connect_timeout: Duration,
    /// The number of attempts before the dependency is reported unreachable.
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        let config = config::StartupConfig::default();
        Self {
            interval: config.interval,
            connect_timeout: config.connect_timeout,
            max_attempts: config.max_attempts,
        }
    }
}

/// Waits until the dependency accepts a TCP connection.
///
/// The first attempt is made immediately, so a dependency that is already
/// listening is observed without any delay. Returns
/// [`ReadinessError::Unreachable`] once the attempt budget is spent.
pub async fn wait_for(dependency: &Dependency, policy: &RetryPolicy) -> Result<(), ReadinessError> {
    let addr = dependency.addr();
    info!("Waiting for `{}` at {addr}.", dependency.name);

    for attempt in 1..=policy.max_attempts {
        match timeout(policy.connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(_stream)) => {
                info!("`{}` is ready.", dependency.name);
                return Ok(());
            }
            // Covers both refused connections and attempts that timed out.
            Ok(Err(_)) | Err(_) => {
                if attempt < policy.max_attempts {
                    warn!(
                        "`{}` is not reachable yet. Retrying in {}. {} attempts remaining.",
                        dependency.name,
                        humantime::format_duration(policy.interval),
                        policy.max_attempts - attempt
                    );
                    tokio::time::sleep(policy.interval).await;
                }
            }
        }
    }

    Err(ReadinessError::Unreachable {
        name: dependency.name.clone(),
        addr,
        attempts: policy.max_attempts,
    })
}

/// Waits for every dependency in order.
///
/// Dependencies are polled strictly sequentially: the second one is not
/// probed at all until the first has reported ready. The first failure
/// aborts the wait.
pub async fn wait_for_all<'a>(
    dependencies: impl IntoIterator<Item = &'a Dependency>,
    policy: &RetryPolicy,
) -> Result<(), ReadinessError> {
    for dependency in dependencies {
        wait_for(dependency, policy).await?;
    }
    Ok(())
}
