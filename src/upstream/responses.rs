// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use serde_json::Value;

/// The full payload for an address as returned by the explorer.
///
/// Only the fields the service consumes are modeled; the rest of the
/// payload is dropped on deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct AddressInfo {
    /// The queried address.
    pub address: String,
    /// The confirmed balance, in satoshi.
    #[serde(default)]
    pub balance: u64,
    /// The transactions involving the address.
    #[serde(default)]
    pub txs: Vec<TxSummary>,
}

impl AddressInfo {
    /// Counts the transactions of the payload that have been confirmed.
    pub fn confirmed_tx_count(&self) -> u64 {
        self.txs.iter().filter(|tx| tx.confirmed.is_some()).count() as u64
    }
}

/// One transaction entry of an address payload.
#[derive(Clone, Debug, Deserialize)]
pub struct TxSummary {
    /// The transaction hash.
    #[serde(default)]
    pub hash: String,
    /// The confirmation time, absent for mempool transactions.
    #[serde(default)]
    pub confirmed: Option<String>,
}

/// A single transaction as returned by the explorer.
#[derive(Clone, Debug, Deserialize)]
pub struct TransactionInfo {
    /// The transaction hash.
    pub hash: String,
    /// The fees paid, in satoshi.
    #[serde(default)]
    pub fees: u64,
    /// The confirmation time, absent for mempool transactions.
    #[serde(default)]
    pub confirmed: Option<String>,
    /// The transaction inputs, verbatim.
    #[serde(default)]
    pub inputs: Vec<Value>,
    /// The transaction outputs, verbatim.
    #[serde(default)]
    pub outputs: Vec<Value>,
    /// An in-body rejection message, if the explorer reported one.
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn address_payload_counts_confirmed_only() {
        let info: AddressInfo = serde_json::from_str(
            r#"{
                "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
                "balance": 5002467735,
                "final_balance": 5002467735,
                "n_tx": 3,
                "txs": [
                    {"hash": "aa", "confirmed": "2024-01-04T13:09:00Z", "block_height": 825000},
                    {"hash": "bb", "confirmed": "2024-01-05T02:41:13Z"},
                    {"hash": "cc"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(info.balance, 5002467735);
        assert_eq!(info.txs.len(), 3);
        assert_eq!(info.confirmed_tx_count(), 2);
    }

    #[test]
    fn transaction_payload() {
        let info: TransactionInfo = serde_json::from_str(
            r#"{
                "hash": "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b",
                "fees": 0,
                "confirmed": "2009-01-03T18:15:05Z",
                "inputs": [{"output_index": -1}],
                "outputs": [{"value": 5000000000}]
            }"#,
        )
        .unwrap();

        assert_eq!(info.fees, 0);
        assert_eq!(info.inputs.len(), 1);
        assert_eq!(info.outputs.len(), 1);
        assert!(info.error.is_none());
    }

    #[test]
    fn transaction_in_body_error() {
        let info: TransactionInfo =
            serde_json::from_str(r#"{"hash": "", "error": "Transaction not found"}"#).unwrap();
        assert_eq!(info.error.as_deref(), Some("Transaction not found"));
    }
}
