// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use axum::response::IntoResponse;
use chainview::{
    model::{InvalidAddress, InvalidTxHash},
    upstream::UpstreamError,
};
use hyper::{header::InvalidHeaderValue, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error(transparent)]
    BadParse(#[from] ParseError),
    #[error("internal server error")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    #[error("no results returned")]
    NoResults,
    #[error("no endpoint found")]
    NotFound,
    #[error("too many requests")]
    TooManyRequests,
    #[error("upstream rejected the request: {0}")]
    UpstreamRejected(String),
    #[error("upstream explorer unavailable")]
    UpstreamUnavailable(#[source] UpstreamError),
}

impl ApiError {
    /// Gets the HTTP status code associated with this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoResults | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadParse(_) | ApiError::UpstreamRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Gets the u16 status code representation associated with this error.
    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }

    /// Creates a new ApiError from a bad parse.
    pub fn bad_parse(err: impl Into<ParseError>) -> Self {
        Self::BadParse(err.into())
    }

    /// Creates a new internal ApiError.
    pub fn internal(err: impl 'static + std::error::Error + Send + Sync) -> Self {
        Self::Internal(Box::new(err) as _)
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::internal(err)
    }
}

impl From<redis::RedisError> for ApiError {
    fn from(err: redis::RedisError) -> Self {
        Self::internal(err)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Rejected { message } => Self::UpstreamRejected(message),
            err => Self::UpstreamUnavailable(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        ErrorBody::from(self).into_response()
    }
}

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error(transparent)]
    Address(#[from] InvalidAddress),
    #[error(transparent)]
    TxHash(#[from] InvalidTxHash),
}

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("invalid allow-origin header in config: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    #[serde(skip_serializing)]
    status: StatusCode,
    code: u16,
    message: String,
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> axum::response::Response {
        match serde_json::to_string(&self) {
            // Unwrap: Cannot fail as the only failure point is the header (which is valid).
            Ok(json) => axum::response::Response::builder()
                .status(self.status)
                .header(hyper::header::CONTENT_TYPE, "application/json")
                .body(axum::body::boxed(axum::body::Full::from(json)))
                .unwrap(),
            Err(e) => {
                error!("Unable to serialize error body: {}", e);
                Result::<(), _>::Err(format!("Unable to serialize error body: {}", e)).into_response()
            }
        }
    }
}

impl From<ApiError> for ErrorBody {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal(e) = &err {
            error!("Internal API error: {}", e);
        }

        Self {
            status: err.status(),
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::bad_parse(InvalidAddress).code(), 400);
        assert_eq!(ApiError::NoResults.code(), 404);
        assert_eq!(ApiError::NotFound.code(), 404);
        assert_eq!(ApiError::TooManyRequests.code(), 429);
        assert_eq!(
            ApiError::UpstreamRejected("garbage collected".to_string()).code(),
            400
        );
    }
}
