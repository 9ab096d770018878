//! Error types

use thiserror::Error;

/// Failures raised while loading a TokenScript document or deriving addresses from it.
///
/// Every variant is recoverable by the caller. A document that fails to load must be
/// reported as untrusted; no placeholder address is ever produced in its place.
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Signer certificate not found in document")]
    CertificateNotFound,

    #[error("Unsupported key algorithm: {0}")]
    UnsupportedKeyAlgorithm(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to read document stream")]
    DocumentRead(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrustError>;
