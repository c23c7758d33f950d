// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Contains the routes that serve cached address and transaction lookups
//! as well as the health of the application.

mod error;
#[macro_use]
mod responses;
pub mod config;
mod routes;

use axum::{extract::FromRef, Server};
use chainview::{
    cache::{RateLimiter, RedisCache},
    db::MongoDb,
    upstream::ExplorerClient,
};
use futures::Future;
use hyper::Method;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub use self::{
    config::{ApiConfig, ApiConfigData},
    error::{ApiError, ConfigError},
};
use crate::config::ChainviewConfig;

/// The result of a request to the api.
pub type ApiResult<T> = Result<T, ApiError>;

/// The top level state shared by all request handlers.
///
/// `#[derive(FromRef)]` makes the fields sub states so they can be
/// extracted independently.
#[derive(Clone, FromRef)]
pub struct AppState {
    db: MongoDb,
    cache: RedisCache,
    limiter: RateLimiter,
    upstream: ExplorerClient,
    config: ApiConfigData,
}

/// The Chainview API.
#[derive(Debug)]
pub struct ApiWorker {
    db: MongoDb,
    cache: RedisCache,
    limiter: RateLimiter,
    upstream: ExplorerClient,
    api_data: ApiConfigData,
}

impl ApiWorker {
    /// Creates a new API from the shared handles and the config.
    pub fn new(
        db: MongoDb,
        cache: RedisCache,
        limiter: RateLimiter,
        upstream: ExplorerClient,
        config: &ChainviewConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            db,
            cache,
            limiter,
            upstream,
            api_data: ApiConfigData::try_from(config)?,
        })
    }

    /// Serves the API until the shutdown handle resolves.
    pub async fn run(&self, shutdown_handle: impl Future<Output = ()>) -> Result<(), ApiError> {
        info!("Starting API server on port `{}`.", self.api_data.port);

        let state = AppState {
            db: self.db.clone(),
            cache: self.cache.clone(),
            limiter: self.limiter.clone(),
            upstream: self.upstream.clone(),
            config: self.api_data.clone(),
        };

        let routes = routes::routes()
            .layer(CatchPanicLayer::new())
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(self.api_data.allow_origins.clone())
                    .allow_methods(vec![Method::GET, Method::OPTIONS])
                    .allow_headers(Any)
                    .allow_credentials(false),
            )
            .with_state(state);

        let port = self.api_data.port;
        Server::bind(&([0, 0, 0, 0], port).into())
            .serve(routes.into_make_service())
            .with_graceful_shutdown(shutdown_handle)
            .await
            .map_err(ApiError::internal)?;

        Ok(())
    }
}
