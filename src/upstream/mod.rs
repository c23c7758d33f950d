// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Client for the upstream block explorer API.
//!
//! The explorer is the source of truth for address balances and transaction
//! payloads; Chainview only caches what it returns.

pub mod config;
mod responses;

use thiserror::Error;

use self::config::UpstreamConfig;
pub use self::responses::{AddressInfo, TransactionInfo, TxSummary};
use crate::model::{BtcAddress, TxHash};

/// The errors that can happen when talking to the upstream explorer.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream rejected the request: {message}")]
    Rejected { message: String },
}

/// Body shape of upstream error responses.
#[derive(serde::Deserialize)]
struct UpstreamErrorBody {
    error: String,
}

/// A client for a BlockCypher-style explorer API.
#[derive(Clone, Debug)]
pub struct ExplorerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExplorerClient {
    /// Creates a client from the given config.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the full payload for an address, transactions included.
    pub async fn address_full(&self, address: &BtcAddress) -> Result<AddressInfo, UpstreamError> {
        self.get(&format!("{}/addrs/{}/full", self.base_url, address)).await
    }

    /// Fetches a single transaction by hash.
    pub async fn transaction(&self, hash: &TxHash) -> Result<TransactionInfo, UpstreamError> {
        let info: TransactionInfo = self.get(&format!("{}/txs/{}", self.base_url, hash)).await?;

        // The explorer reports some rejections in-body rather than by status.
        if let Some(message) = info.error {
            return Err(UpstreamError::Rejected { message });
        }

        Ok(info)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status.is_client_error() {
            let message = match response.json::<UpstreamErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("status {status}"),
            };
            return Err(UpstreamError::Rejected { message });
        }

        Ok(response.error_for_status()?.json().await?)
    }
}
