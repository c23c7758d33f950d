// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use axum::{
    extract::{OriginalUri, Path, State},
    routing::get,
    Router,
};
use chainview::{
    cache::{RateLimiter, RedisCache},
    db::{
        mongodb::collections::{AddressCollection, AddressDocument, TransactionCollection, TransactionDocument},
        MongoDb,
    },
    model::{BtcAddress, TxHash},
    upstream::ExplorerClient,
};
use mongodb::bson::DateTime;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, error, info, warn};

use super::{
    config::ApiConfigData,
    error::ApiError,
    responses::{AddressResponse, PingResponse, TransactionResponse},
    ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/address/:address", get(address))
        .route("/transaction/:transaction_hash", get(transaction))
        .fallback(not_found)
}

async fn is_healthy(db: &MongoDb, cache: &RedisCache) -> ApiResult<bool> {
    db.ping().await?;
    cache.ping().await?;
    Ok(true)
}

async fn ping(
    State(db): State<MongoDb>,
    State(cache): State<RedisCache>,
    State(config): State<ApiConfigData>,
) -> PingResponse {
    PingResponse {
        name: "Chainview".to_string(),
        version: std::env!("CARGO_PKG_VERSION").to_string(),
        environment: config.environment.clone(),
        // Panic: RFC 3339 formatting of the current time cannot fail.
        timestamp: OffsetDateTime::now_utc().format(&Rfc3339).unwrap(),
        is_healthy: is_healthy(&db, &cache).await.unwrap_or_else(|e| {
            error!("An error occured during health check: {e}");
            false
        }),
    }
}

async fn address(
    State(db): State<MongoDb>,
    State(limiter): State<RateLimiter>,
    State(upstream): State<ExplorerClient>,
    OriginalUri(uri): OriginalUri,
    Path(address): Path<String>,
) -> ApiResult<AddressResponse> {
    let address: BtcAddress = address.parse().map_err(ApiError::bad_parse)?;
    let collection = db.collection::<AddressCollection>();

    let cached = collection.get(&address).await?;

    if limiter.is_limited(uri.path()).await? {
        error!("rate limiter hits - request aborted");
        return Err(ApiError::TooManyRequests);
    }

    let info = match upstream.address_full(&address).await {
        Ok(info) => info,
        Err(e) => {
            // Serve the cached record when the explorer cannot be reached.
            error!("failed to fetch data from the explorer - rolling back to db ({e})");
            return match cached {
                Some(document) => Ok(document.into()),
                None => {
                    warn!("record not found in db - address record {address} not found");
                    Err(ApiError::NoResults)
                }
            };
        }
    };

    info!("Found {} total transactions for address {address}.", info.txs.len());
    let transaction_count = info.confirmed_tx_count();

    if let Some(document) = cached {
        if document.transaction_count < transaction_count {
            info!("Updating the address record {address} with {transaction_count} confirmed transactions.");
            collection.update_totals(&address, info.balance, transaction_count).await?;
            let updated = collection
                .get(&address)
                .await?
                .ok_or_else(|| ApiError::internal(CorruptState("updated address record is missing")))?;
            return Ok(updated.into());
        }

        debug!("Returning cached address record.");
        return Ok(document.into());
    }

    info!("Inserting new address record {address}.");
    let document = AddressDocument::new(address, info.balance, transaction_count);
    collection.insert(&document).await?;

    Ok(document.into())
}

async fn transaction(
    State(db): State<MongoDb>,
    State(limiter): State<RateLimiter>,
    State(upstream): State<ExplorerClient>,
    OriginalUri(uri): OriginalUri,
    Path(transaction_hash): Path<String>,
) -> ApiResult<TransactionResponse> {
    let hash: TxHash = transaction_hash.parse().map_err(ApiError::bad_parse)?;
    let collection = db.collection::<TransactionCollection>();

    if let Some(document) = collection.get(&hash).await? {
        info!("Cache hit - fetching transaction from db.");
        return Ok(document.into());
    }

    if limiter.is_limited(uri.path()).await? {
        return Err(ApiError::TooManyRequests);
    }

    info!("Cache miss - calling the explorer to fetch data.");
    let info = upstream.transaction(&hash).await?;

    let confirmed = info
        .confirmed
        .as_deref()
        .map(DateTime::parse_rfc3339_str)
        .transpose()
        .map_err(ApiError::internal)?;

    let document = TransactionDocument {
        hash,
        fees: info.fees,
        confirmed,
        inputs: info.inputs,
        outputs: info.outputs,
        received_at: DateTime::now(),
    };
    collection.insert(&document).await?;

    Ok(document.into())
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[derive(Debug, thiserror::Error)]
#[error("corrupt state: {0}")]
struct CorruptState(&'static str);
