// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`TxHash`] type.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// The length of a hex-encoded transaction hash.
pub const TX_HASH_LEN: usize = 64;

/// The error returned when a string is not a well-formed transaction hash.
#[derive(Copy, Clone, Debug, Error)]
#[error("transaction hash must be {TX_HASH_LEN} hexadecimal characters")]
pub struct InvalidTxHash;

/// A hex-encoded Bitcoin transaction hash.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Returns the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TxHash {
    type Err = InvalidTxHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == TX_HASH_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidTxHash)
        }
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const GENESIS_COINBASE: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn accepts_and_normalizes() {
        let hash: TxHash = GENESIS_COINBASE.to_uppercase().parse().unwrap();
        assert_eq!(hash.as_str(), GENESIS_COINBASE);
    }

    #[test]
    fn rejects_malformed_input() {
        // Too short, too long, and non-hex content of the right length.
        for s in [
            GENESIS_COINBASE[1..].to_string(),
            format!("{GENESIS_COINBASE}0"),
            format!("{}zz", &GENESIS_COINBASE[2..]),
        ] {
            assert!(s.parse::<TxHash>().is_err(), "accepted {s:?}");
        }
    }
}
