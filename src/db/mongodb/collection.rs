// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Borrow;

use async_trait::async_trait;
use mongodb::{
    bson::Document,
    error::Error,
    options::{CountOptions, CreateIndexOptions, FindOneOptions, InsertOneOptions, UpdateModifications, UpdateOptions},
    results::{CreateIndexResult, InsertOneResult, UpdateResult},
    IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};

use super::MongoDb;

/// A MongoDB collection.
#[async_trait]
pub trait MongoDbCollection {
    /// The collection name.
    const NAME: &'static str;
    /// The document schema.
    type Document: Send + Sync;

    /// Creates an instance of this collection type.
    fn instantiate(db: &MongoDb, collection: mongodb::Collection<Self::Document>) -> Self;

    /// Gets the underlying MongoDB collection.
    fn collection(&self) -> &mongodb::Collection<Self::Document>;

    /// Coerce the underlying collection to the needed type.
    fn with_type<T>(&self) -> mongodb::Collection<T> {
        self.collection().clone_with_type()
    }

    /// Creates the collection.
    async fn create_collection(&self, db: &MongoDb) -> Result<(), Error> {
        db.db().create_collection(Self::NAME, None).await.ok();
        Ok(())
    }

    /// Creates the collection indexes.
    async fn create_indexes(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// An extension trait which wraps the basic functionality of a mongodb
/// [`Collection`](mongodb::Collection) that coerces the document type
/// into the provided generic.
#[async_trait]
pub trait MongoDbCollectionExt: MongoDbCollection {
    /// Calls [`mongodb::Collection::create_index()`] and coerces the document type.
    async fn create_index(
        &self,
        index: IndexModel,
        options: impl Into<Option<CreateIndexOptions>> + Send + Sync,
    ) -> Result<CreateIndexResult, Error> {
        self.collection().create_index(index, options).await
    }

    /// Calls [`mongodb::Collection::find_one()`] and coerces the document type.
    async fn find_one<T: DeserializeOwned + Unpin + Send + Sync>(
        &self,
        filter: impl Into<Option<Document>> + Send + Sync,
        options: impl Into<Option<FindOneOptions>> + Send + Sync,
    ) -> Result<Option<T>, Error> {
        self.with_type().find_one(filter, options).await
    }

    /// Calls [`mongodb::Collection::insert_one()`] and coerces the document type.
    async fn insert_one<T: Serialize + Send + Sync>(
        &self,
        doc: impl Borrow<T> + Send + Sync,
        options: impl Into<Option<InsertOneOptions>> + Send + Sync,
    ) -> Result<InsertOneResult, Error> {
        self.with_type().insert_one(doc, options).await
    }

    /// Calls [`mongodb::Collection::update_one()`].
    async fn update_one(
        &self,
        doc: Document,
        update: impl Into<UpdateModifications> + Send + Sync,
        options: impl Into<Option<UpdateOptions>> + Send + Sync,
    ) -> Result<UpdateResult, Error> {
        self.collection().update_one(doc, update, options).await
    }

    /// Calls [`mongodb::Collection::count_documents()`].
    async fn count_documents(
        &self,
        filter: impl Into<Option<Document>> + Send + Sync,
        options: impl Into<Option<CountOptions>> + Send + Sync,
    ) -> Result<u64, Error> {
        self.collection().count_documents(filter, options).await
    }
}

impl<T: MongoDbCollection> MongoDbCollectionExt for T {}
