// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use mongodb::{
    bson::{doc, DateTime},
    error::Error,
    options::IndexOptions,
    IndexModel,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db::{mongodb::MongoDbCollection, MongoDb, MongoDbCollectionExt},
    model::TxHash,
};

/// A cached transaction as returned by the upstream explorer.
///
/// Inputs and outputs are kept schemaless; the service never interprets
/// them, it only serves them back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionDocument {
    /// The transaction hash.
    pub hash: TxHash,
    /// The fees paid, in satoshi.
    pub fees: u64,
    /// When the transaction was confirmed, if it has been.
    pub confirmed: Option<DateTime>,
    /// The transaction inputs, verbatim.
    pub inputs: Vec<Value>,
    /// The transaction outputs, verbatim.
    pub outputs: Vec<Value>,
    /// When the record entered the cache.
    pub received_at: DateTime,
}

/// The cached transactions collection.
pub struct TransactionCollection {
    collection: mongodb::Collection<TransactionDocument>,
}

#[async_trait::async_trait]
impl MongoDbCollection for TransactionCollection {
    const NAME: &'static str = "transactions";
    type Document = TransactionDocument;

    fn instantiate(_db: &MongoDb, collection: mongodb::Collection<Self::Document>) -> Self {
        Self { collection }
    }

    fn collection(&self) -> &mongodb::Collection<Self::Document> {
        &self.collection
    }

    async fn create_indexes(&self) -> Result<(), Error> {
        self.create_index(
            IndexModel::builder()
                .keys(doc! { "hash": 1 })
                .options(IndexOptions::builder().unique(true).name("hash_index".to_string()).build())
                .build(),
            None,
        )
        .await?;

        Ok(())
    }
}

/// Queries that are related to cached transactions.
impl TransactionCollection {
    /// Gets the cached record for a transaction hash.
    pub async fn get(&self, hash: &TxHash) -> Result<Option<TransactionDocument>, Error> {
        self.find_one(doc! { "hash": hash.as_str() }, None).await
    }

    /// Inserts a freshly fetched transaction.
    pub async fn insert(&self, document: &TransactionDocument) -> Result<(), Error> {
        self.insert_one::<TransactionDocument>(document, None).await?;
        Ok(())
    }
}
