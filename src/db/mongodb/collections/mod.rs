// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

/// Module containing the address collection.
mod address;
/// Module containing the transaction collection.
mod transaction;

pub use self::{
    address::{AddressCollection, AddressDocument},
    transaction::{TransactionCollection, TransactionDocument},
};
