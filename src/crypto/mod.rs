//! Cryptographic Primitives Module
//!
//! This module holds the signer key material extracted from a TokenScript document
//! and the Keccak-256 hashing used for every address this crate produces.
//!
//! ## Security Requirements
//!
//! **CRITICAL**: Address derivation must be reproducible byte-for-byte by other
//! implementations. The key encoding (`X || Y`, no SEC1 prefix) and the hash
//! (Keccak-256, not SHA3-256) are part of that contract and must not change.

use std::fmt;

use elliptic_curve::sec1::ToEncodedPoint;
use sha3::{Digest, Keccak256};

use crate::address::Address;
use crate::error::{Result, TrustError};

/// Width of an uncompressed public key without its `0x04` prefix.
pub const SIGNER_KEY_LEN: usize = 64;

// ============================================================================
// HASHING
// ============================================================================

/// Keccak-256 over the concatenation of `parts`.
pub fn keccak256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

// ============================================================================
// SIGNER KEY
// ============================================================================

/// Named elliptic curves accepted for TokenScript signer certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCurve {
    /// secp256k1 (OID 1.3.132.0.10), the Ethereum curve
    Secp256k1,
    /// NIST P-256 / prime256v1 (OID 1.2.840.10045.3.1.7)
    P256,
}

impl fmt::Display for KeyCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCurve::Secp256k1 => f.write_str("secp256k1"),
            KeyCurve::P256 => f.write_str("P-256"),
        }
    }
}

/// Public key of the TokenScript issuer.
///
/// Stored as the uncompressed curve point `X || Y` (32 bytes each). The key is
/// validated as a point on its curve before a `SignerKey` can exist.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SignerKey {
    curve: KeyCurve,
    bytes: [u8; SIGNER_KEY_LEN],
}

impl SignerKey {
    /// Builds a signer key from a SEC1 encoded point (compressed or uncompressed).
    ///
    /// # Arguments
    ///
    /// * `curve` - Curve the point belongs to
    /// * `sec1` - SEC1 encoded point as found in the certificate's SubjectPublicKeyInfo
    ///
    /// # Returns
    ///
    /// * `Ok(SignerKey)` - Point is valid on `curve`
    /// * `Err(TrustError::MalformedDocument)` - Point does not decode on `curve`
    pub fn from_sec1_bytes(curve: KeyCurve, sec1: &[u8]) -> Result<Self> {
        let point = match curve {
            KeyCurve::Secp256k1 => k256::PublicKey::from_sec1_bytes(sec1)
                .map(|key| key.to_encoded_point(false).as_bytes().to_vec()),
            KeyCurve::P256 => p256::PublicKey::from_sec1_bytes(sec1)
                .map(|key| key.to_encoded_point(false).as_bytes().to_vec()),
        }
        .map_err(|_| {
            TrustError::MalformedDocument(format!("signer key is not a valid {} point", curve))
        })?;

        // Uncompressed format: 0x04 || x (32 bytes) || y (32 bytes) = 65 bytes total
        if point.len() != SIGNER_KEY_LEN + 1 || point[0] != 0x04 {
            return Err(TrustError::MalformedDocument(format!(
                "unexpected {} point encoding of {} bytes",
                curve,
                point.len()
            )));
        }

        let mut bytes = [0u8; SIGNER_KEY_LEN];
        bytes.copy_from_slice(&point[1..]);
        Ok(Self { curve, bytes })
    }

    pub fn curve(&self) -> KeyCurve {
        self.curve
    }

    /// The `X || Y` coordinate bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNER_KEY_LEN] {
        &self.bytes
    }

    /// Address of the signer key itself: keccak256(X || Y)[12:32].
    ///
    /// This is the conventional Ethereum address for a secp256k1 key. For P-256 keys
    /// the same construction is applied so every signer has a stable identifier.
    pub fn ethereum_address(&self) -> Address {
        Address::from_digest(&keccak256(&[&self.bytes[..]]))
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerKey")
            .field("curve", &self.curve)
            .field("bytes", &hex::encode(self.bytes))
            .finish()
    }
}
