// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use mongodb::{
    bson::{doc, DateTime},
    error::Error,
    options::IndexOptions,
    IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{mongodb::MongoDbCollection, MongoDb, MongoDbCollectionExt},
    model::BtcAddress,
};

/// A cached view of an address: its balance and how many of its
/// transactions were confirmed the last time the upstream explorer was
/// consulted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AddressDocument {
    /// The address this record describes.
    pub address: BtcAddress,
    /// The balance, in satoshi.
    pub balance: u64,
    /// The number of confirmed transactions involving the address.
    pub transaction_count: u64,
    /// When the record was inserted or last refreshed.
    pub updated_at: DateTime,
}

impl AddressDocument {
    /// Creates a record stamped with the current time.
    pub fn new(address: BtcAddress, balance: u64, transaction_count: u64) -> Self {
        Self {
            address,
            balance,
            transaction_count,
            updated_at: DateTime::now(),
        }
    }
}

/// The cached addresses collection.
pub struct AddressCollection {
    collection: mongodb::Collection<AddressDocument>,
}

#[async_trait::async_trait]
impl MongoDbCollection for AddressCollection {
    const NAME: &'static str = "addresses";
    type Document = AddressDocument;

    fn instantiate(_db: &MongoDb, collection: mongodb::Collection<Self::Document>) -> Self {
        Self { collection }
    }

    fn collection(&self) -> &mongodb::Collection<Self::Document> {
        &self.collection
    }

    async fn create_indexes(&self) -> Result<(), Error> {
        self.create_index(
            IndexModel::builder()
                .keys(doc! { "address": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("address_index".to_string())
                        .build(),
                )
                .build(),
            None,
        )
        .await?;

        Ok(())
    }
}

/// Queries that are related to cached addresses.
impl AddressCollection {
    /// Gets the cached record for an address.
    pub async fn get(&self, address: &BtcAddress) -> Result<Option<AddressDocument>, Error> {
        self.find_one(doc! { "address": address.as_str() }, None).await
    }

    /// Inserts a freshly fetched record.
    pub async fn insert(&self, document: &AddressDocument) -> Result<(), Error> {
        self.insert_one::<AddressDocument>(document, None).await?;
        Ok(())
    }

    /// Overwrites the balance and confirmed-transaction count of an existing
    /// record and refreshes its timestamp.
    pub async fn update_totals(
        &self,
        address: &BtcAddress,
        balance: u64,
        transaction_count: u64,
    ) -> Result<(), Error> {
        self.update_one(
            doc! { "address": address.as_str() },
            doc! { "$set": {
                "balance": balance as i64,
                "transaction_count": transaction_count as i64,
                "updated_at": DateTime::now(),
            } },
            None,
        )
        .await?;
        Ok(())
    }
}
