// Copyright 2024 Chainview Contributors
// SPDX-License-Identifier: Apache-2.0

//! Module containing the [`BtcAddress`] type.

use std::{fmt, str::FromStr};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

lazy_static! {
    /// Accepts legacy (P2PKH/P2SH) and Bech32 mainnet address forms.
    static ref BTC_ADDRESS_RE: Regex =
        // Panic: the pattern is a valid constant expression.
        Regex::new(r"^(bc1|[13])[a-zA-HJ-NP-Z0-9]{25,39}$").unwrap();
}

/// The error returned when a string is not a well-formed Bitcoin address.
#[derive(Copy, Clone, Debug, Error)]
#[error("invalid Bitcoin address format")]
pub struct InvalidAddress;

/// A syntactically valid Bitcoin address.
///
/// Validation is purely lexical; whether the address exists on chain is up
/// to the upstream explorer.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct BtcAddress(String);

impl BtcAddress {
    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BtcAddress {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if BTC_ADDRESS_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidAddress)
        }
    }
}

impl fmt::Display for BtcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for BtcAddress {
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

    #[test]
    fn accepts_known_forms() {
        for addr in [
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
        ] {
            assert_eq!(addr.parse::<BtcAddress>().unwrap().as_str(), addr);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for addr in [
            "",
            "2N3oefVeg6stiTb5Kh3ozCSkaqmx91FDbsm",
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa-extended-way-beyond-the-limit",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdO",
            "1Shrt",
        ] {
            assert!(addr.parse::<BtcAddress>().is_err(), "accepted {addr:?}");
        }
    }

    #[test]
    fn serde_round_trip() {
        let addr: BtcAddress = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa\"");
        assert_eq!(serde_json::from_str::<BtcAddress>(&json).unwrap(), addr);
        assert!(serde_json::from_str::<BtcAddress>("\"nonsense\"").is_err());
    }
}
