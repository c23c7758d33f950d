// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Identifier types shared by the database, the API and the upstream client.

mod address;
mod transaction;

pub use self::{
    address::{BtcAddress, InvalidAddress},
    transaction::{InvalidTxHash, TxHash},
};
