// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use chainview::{readiness::ReadinessError, upstream::UpstreamError};
use thiserror::Error;

use crate::{api::ApiError, config::ConfigError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    ApiConfig(#[from] crate::api::ConfigError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    MongoDb(#[from] mongodb::error::Error),
    #[error(transparent)]
    Readiness(#[from] ReadinessError),
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("invalid cache connection string: {0}")]
    RedisUrl(#[from] url::ParseError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
