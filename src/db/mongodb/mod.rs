// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Holds the `MongoDb` type.

mod collection;
/// Module containing the collections of the cache database.
pub mod collections;
pub mod config;

use mongodb::{
    bson::{doc, Document},
    error::Error,
    options::{ClientOptions, Credential},
    Client,
};

use self::config::MongoDbConfig;
pub use self::collection::{MongoDbCollection, MongoDbCollectionExt};

/// A handle to the underlying `MongoDB` database.
#[derive(Clone, Debug)]
pub struct MongoDb {
    pub(crate) database_name: String,
    pub(crate) client: mongodb::Client,
}

impl MongoDb {
    /// Constructs a [`MongoDb`] by connecting to a MongoDB instance.
    pub async fn connect(config: &MongoDbConfig) -> Result<Self, Error> {
        let mut client_options = ClientOptions::parse(&config.conn_str).await?;

        client_options.app_name = Some("Chainview".to_string());
        client_options.min_pool_size = Some(config.min_pool_size);

        if client_options.credential.is_none() {
            if let (Some(username), Some(password)) = (&config.username, &config.password) {
                client_options.credential = Some(
                    Credential::builder()
                        .username(username.clone())
                        .password(password.clone())
                        .build(),
                );
            }
        }

        let client = Client::with_options(client_options)?;

        Ok(Self {
            database_name: config.database_name.clone(),
            client,
        })
    }

    /// Returns the current database.
    pub fn db(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// Gets a collection of the provided type.
    pub fn collection<T: MongoDbCollection>(&self) -> T {
        T::instantiate(self, self.db().collection(T::NAME))
    }

    /// Creates a collection and its indexes if they do not exist.
    pub async fn create_indexes<T: MongoDbCollection + Send + Sync>(&self) -> Result<(), Error> {
        let collection = self.collection::<T>();
        collection.create_collection(self).await?;
        collection.create_indexes().await?;
        Ok(())
    }

    /// Issues a `ping` command to check that the database is reachable.
    pub async fn ping(&self) -> Result<(), Error> {
        self.db().run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Clears all the collections from the database.
    pub async fn clear(&self) -> Result<(), Error> {
        let collections = self.db().list_collection_names(None).await?;

        for c in collections.into_iter().filter(|c| c != "system.views") {
            self.db().collection::<Document>(&c).drop(None).await?;
        }

        Ok(())
    }

    /// Drops the database.
    pub async fn drop(self) -> Result<(), Error> {
        self.db().drop(None).await
    }

    /// Returns the name of the database.
    pub fn name(&self) -> &str {
        &self.database_name
    }
}
