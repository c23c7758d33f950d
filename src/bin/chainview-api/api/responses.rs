// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use chainview::{
    db::mongodb::collections::{AddressDocument, TransactionDocument},
    model::{BtcAddress, TxHash},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

macro_rules! impl_success_response {
    ($($type:ty),*) => {
        $(
            impl axum::response::IntoResponse for $type {
                fn into_response(self) -> axum::response::Response {
                    axum::Json(self).into_response()
                }
            }
        )*
    };
}

/// Response of `GET /ping`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingResponse {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
    pub is_healthy: bool,
}

impl_success_response!(PingResponse);

/// Response of `GET /address/:address`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub address: BtcAddress,
    pub balance: u64,
    pub transaction_count: u64,
    pub updated_at: String,
}

impl_success_response!(AddressResponse);

impl From<AddressDocument> for AddressResponse {
    fn from(document: AddressDocument) -> Self {
        Self {
            address: document.address,
            balance: document.balance,
            transaction_count: document.transaction_count,
            updated_at: rfc3339(document.updated_at),
        }
    }
}

/// Response of `GET /transaction/:transaction_hash`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub hash: TxHash,
    pub fees: u64,
    pub confirmed: Option<String>,
    pub inputs: Vec<Value>,
    pub outputs: Vec<Value>,
    pub received_at: String,
}

impl_success_response!(TransactionResponse);

impl From<TransactionDocument> for TransactionResponse {
    fn from(document: TransactionDocument) -> Self {
        Self {
            hash: document.hash,
            fees: document.fees,
            confirmed: document.confirmed.map(rfc3339),
            inputs: document.inputs,
            outputs: document.outputs,
            received_at: rfc3339(document.received_at),
        }
    }
}

fn rfc3339(timestamp: mongodb::bson::DateTime) -> String {
    timestamp
        .try_to_rfc3339_string()
        .unwrap_or_else(|_| timestamp.to_string())
}
