//! TokenScript Trust Library
//!
//! This crate derives trust and revoke addresses for signed TokenScript documents.
//! The issuer's public key is read from the XML-DSig certificate embedded in the
//! document and hashed together with an owner (contract) address, so any wallet can
//! recompute the same addresses without shared network state.

pub mod address;
pub mod certificate;
pub mod config;
pub mod crypto;
pub mod document;
pub mod error;
pub mod trust;
pub mod wallet;

// Re-export commonly used types
pub use address::{normalize_address, Address};
pub use config::{Config, OutputFormat};
pub use crypto::{KeyCurve, SignerKey};
pub use error::TrustError;
pub use trust::{derive_address, extract_signer_key, DomainTag, TokenScriptTrust, TrustReport};
