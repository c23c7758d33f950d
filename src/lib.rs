// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! Chainview keeps a MongoDB-backed cache of Bitcoin address balances and
//! transactions, refreshed on demand from an upstream block explorer and
//! served over a small REST API.

/// Module that contains the Redis cache and the rate limiter.
pub mod cache;
/// Module that contains the database types and constants.
pub mod db;
/// Module that contains the domain identifier types.
pub mod model;
/// Module that contains the startup readiness gate.
pub mod readiness;
/// Module that contains the block explorer client.
pub mod upstream;
