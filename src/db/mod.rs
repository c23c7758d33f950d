// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Module that contains the database and associated models.

/// Module containing MongoDb types and traits.
pub mod mongodb;

pub use self::mongodb::{config::MongoDbConfig, MongoDb, MongoDbCollection, MongoDbCollectionExt};
