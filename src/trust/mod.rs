//! Trust Address Derivation Module
//!
//! Binds a signed TokenScript document to an owner (contract) address without
//! any on-chain lookup. Two addresses are derived from the issuer's signer key:
//! the trust address, published to assert the document is authorized for the
//! owner, and the revoke address, published to withdraw that authorization.
//!
//! ## Derivation
//!
//! ```text
//! preimage = signer_key (64 bytes, X || Y)
//!         || owner_address (20 bytes)
//!         || domain_tag ("TRUST" or "REVOKE", ASCII)
//! address  = keccak256(preimage)[12:32]
//! ```
//!
//! Any implementation that follows this layout computes the same addresses for the
//! same document and owner.

use std::io::Read;

use serde::Serialize;
use tracing::debug;

use crate::address::Address;
use crate::certificate::signer_key_from_certificate;
use crate::crypto::{keccak256, SignerKey};
use crate::document::extract_certificate_der;
use crate::error::{Result, TrustError};

// ============================================================================
// DOMAIN SEPARATION
// ============================================================================

/// Separates the trust derivation from the revoke derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainTag {
    Trust,
    Revoke,
}

impl DomainTag {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            DomainTag::Trust => b"TRUST",
            DomainTag::Revoke => b"REVOKE",
        }
    }
}

// ============================================================================
// DERIVATION
// ============================================================================

/// Derives the address bound to `owner` under `tag` for `signer_key`.
pub fn derive_address(signer_key: &SignerKey, owner: &Address, tag: DomainTag) -> Address {
    let digest = keccak256(&[
        &signer_key.as_bytes()[..],
        &owner.as_bytes()[..],
        tag.as_bytes(),
    ]);
    Address::from_digest(&digest)
}

/// Extracts the issuer's signer key from a signed TokenScript document.
///
/// # Arguments
///
/// * `document` - Raw bytes of the TokenScript XML document
///
/// # Returns
///
/// * `Ok(SignerKey)` - Public key of the embedded signer certificate
/// * `Err(TrustError)` - `MalformedDocument`, `CertificateNotFound` or `UnsupportedKeyAlgorithm`
pub fn extract_signer_key(document: &[u8]) -> Result<SignerKey> {
    let certificate = extract_certificate_der(document)?;
    signer_key_from_certificate(&certificate)
}

/// Addresses derived for one owner, as printed by the command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustReport {
    pub owner: Address,
    pub signer_address: Address,
    pub trust_address: Address,
    pub revoke_address: Address,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Trust/revoke address generator for one signed TokenScript document.
///
/// The signer key is extracted when the value is built, so malformed documents are
/// reported at construction. Afterwards the value is immutable and can be shared
/// across threads.
#[derive(Debug, Clone)]
pub struct TokenScriptTrust {
    signer_key: SignerKey,
}

impl TokenScriptTrust {
    /// Loads a document from a byte stream. The reader is dropped before returning.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut document = Vec::new();
        reader
            .read_to_end(&mut document)
            .map_err(TrustError::DocumentRead)?;
        Self::from_bytes(&document)
    }

    /// Loads a document already held in memory.
    pub fn from_bytes(document: &[u8]) -> Result<Self> {
        let signer_key = extract_signer_key(document)?;

        debug!(
            "Loaded TokenScript signer key: curve={}, signer={}",
            signer_key.curve(),
            signer_key.ethereum_address()
        );

        Ok(Self { signer_key })
    }

    pub fn from_signer_key(signer_key: SignerKey) -> Self {
        Self { signer_key }
    }

    pub fn signer_key(&self) -> &SignerKey {
        &self.signer_key
    }

    /// Trust address of this document for `owner_address`.
    ///
    /// # Arguments
    ///
    /// * `owner_address` - Contract/owner address, `0x` prefix optional, any case
    ///
    /// # Returns
    ///
    /// * `Ok(Address)` - Derived trust address
    /// * `Err(TrustError::InvalidAddress)` - `owner_address` is not 20 bytes of hex
    pub fn trust_address(&self, owner_address: &str) -> Result<Address> {
        self.derive(owner_address, DomainTag::Trust)
    }

    /// Revoke address of this document for `owner_address`.
    pub fn revoke_address(&self, owner_address: &str) -> Result<Address> {
        self.derive(owner_address, DomainTag::Revoke)
    }

    fn derive(&self, owner_address: &str, tag: DomainTag) -> Result<Address> {
        let owner = Address::parse(owner_address)?;
        Ok(derive_address(&self.signer_key, &owner, tag))
    }

    /// Derives both addresses for `owner_address`.
    pub fn report(&self, owner_address: &str) -> Result<TrustReport> {
        let owner = Address::parse(owner_address)?;
        Ok(TrustReport {
            owner,
            signer_address: self.signer_key.ethereum_address(),
            trust_address: derive_address(&self.signer_key, &owner, DomainTag::Trust),
            revoke_address: derive_address(&self.signer_key, &owner, DomainTag::Revoke),
        })
    }
}
