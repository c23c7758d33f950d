// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! The Chainview API service: cached Bitcoin address and transaction
//! lookups backed by MongoDB and Redis.

/// Module containing the API.
mod api;
mod cli;
mod config;
mod error;

use chainview::{
    cache::{RateLimiter, RedisCache},
    db::{
        mongodb::collections::{AddressCollection, TransactionCollection},
        MongoDb,
    },
    readiness::{self, RetryPolicy},
    upstream::ExplorerClient,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use self::{api::ApiWorker, cli::ClArgs, error::Error};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    set_up_logging();

    std::panic::set_hook(Box::new(|p| {
        error!("{}", p);
    }));

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

async fn run() -> Result<(), Error> {
    let cl_args = ClArgs::parse();

    let mut config = match &cl_args.config {
        Some(path) => config::ChainviewConfig::from_file(path)?,
        None => config::ChainviewConfig::default(),
    };
    config.apply_cl_args(&cl_args);

    if config.startup.enabled {
        let dependencies = config.startup_dependencies()?;
        let policy = RetryPolicy::from(&config.startup);
        readiness::wait_for_all(&dependencies, &policy).await?;
    }

    info!("Connecting to database at `{}`.", config.mongodb.conn_str);
    let db = MongoDb::connect(&config.mongodb).await?;
    info!("Connected to database `{}`.", db.name());

    db.create_indexes::<AddressCollection>().await?;
    db.create_indexes::<TransactionCollection>().await?;

    info!("Connecting to cache at `{}`.", config.redis.conn_str);
    let cache = RedisCache::connect(&config.redis).await?;
    cache.ping().await?;
    info!("Connected to cache.");

    let limiter = RateLimiter::new(cache.clone(), &config.redis);
    let upstream = ExplorerClient::new(&config.upstream)?;

    let worker = ApiWorker::new(db, cache, limiter, upstream, &config)?;
    worker.run(shutdown_signal_listener()).await?;

    info!("Stopping API server.");
    Ok(())
}

async fn shutdown_signal_listener() {
    #[cfg(unix)]
    {
        use futures::future;
        use tokio::signal::unix::{signal, Signal, SignalKind};

        // Panic: none of the possible error conditions should happen.
        let mut signals = vec![SignalKind::interrupt(), SignalKind::terminate()]
            .iter()
            .map(|kind| signal(*kind).unwrap())
            .collect::<Vec<Signal>>();
        let signal_futs = signals.iter_mut().map(|signal| Box::pin(signal.recv()));
        let (signal_event, _, _) = future::select_all(signal_futs).await;

        if signal_event.is_none() {
            panic!("Shutdown signal stream failed, channel may have closed.");
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            panic!("Failed to intercept CTRL-C: {:?}.", e);
        }
    }
}
