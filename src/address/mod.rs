//! Address Module
//!
//! 20-byte addresses in canonical binary form with a lowercase, `0x`-prefixed
//! hex rendering. Owner addresses supplied by callers are normalized here before
//! they reach the deriver: the optional prefix is stripped, case is ignored and
//! the remainder must decode to exactly 20 bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TrustError};

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// 20-byte address. Equality is defined on the binary form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Takes the low-order 20 bytes of a 32-byte digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
        Self(bytes)
    }

    /// Parses an address string.
    ///
    /// Accepts an optional `0x`/`0X` prefix followed by exactly 40 hex digits in any
    /// case. Surrounding whitespace is not trimmed.
    ///
    /// # Returns
    ///
    /// * `Ok(Address)` - The decoded 20 bytes
    /// * `Err(TrustError::InvalidAddress)` - Wrong length or non-hex characters
    pub fn parse(input: &str) -> Result<Self> {
        let hex_part = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);

        if hex_part.len() != ADDRESS_LEN * 2 {
            return Err(TrustError::InvalidAddress(format!(
                "expected {} hex characters, got {} in '{}'",
                ADDRESS_LEN * 2,
                hex_part.len(),
                input
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|e| TrustError::InvalidAddress(format!("'{}': {}", input, e)))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Lowercase hex with `0x` prefix, 42 characters.
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

/// Normalizes an address string to its canonical lowercase `0x` form.
pub fn normalize_address(input: &str) -> Result<String> {
    Address::parse(input).map(|address| address.to_hex_string())
}

impl FromStr for Address {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex_string())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).map_err(serde::de::Error::custom)
    }
}
