//! Signer Certificate Module
//!
//! Minimal DER walk over an X.509 certificate that yields the subject public key.
//! Only the structure is checked here. Chain building, validity periods and the
//! certificate signature are left to the caller's trust store.

use spki::der::asn1::AnyRef;
use spki::der::{Decode, Reader, SliceReader, Tag, TagNumber, Tagged};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

use crate::crypto::{KeyCurve, SignerKey};
use crate::error::{Result, TrustError};

/// id-ecPublicKey
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
/// secp256k1 named curve
pub const SECP256K1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");
/// prime256v1 / NIST P-256 named curve
pub const PRIME256V1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

/// Number of tbsCertificate fields that precede subjectPublicKeyInfo,
/// not counting the optional `[0]` version: serial, signature, issuer, validity, subject.
const FIELDS_BEFORE_SPKI: usize = 5;

fn malformed(e: impl std::fmt::Display) -> TrustError {
    TrustError::MalformedDocument(format!("signer certificate is not valid DER: {}", e))
}

fn expect_sequence(any: &AnyRef<'_>, what: &str) -> Result<()> {
    if any.tag() != Tag::Sequence {
        return Err(TrustError::MalformedDocument(format!(
            "{} is not a SEQUENCE (found {})",
            what,
            any.tag()
        )));
    }
    Ok(())
}

/// Returns the SubjectPublicKeyInfo of a DER encoded X.509 certificate.
///
/// ```text
/// Certificate ::= SEQUENCE { tbsCertificate, signatureAlgorithm, signatureValue }
/// tbsCertificate ::= SEQUENCE { [0] version OPTIONAL, serialNumber, signature,
///                               issuer, validity, subject, subjectPublicKeyInfo, ... }
/// ```
pub fn subject_public_key_info(der: &[u8]) -> Result<SubjectPublicKeyInfoRef<'_>> {
    let certificate = AnyRef::from_der(der).map_err(malformed)?;
    expect_sequence(&certificate, "certificate")?;

    let mut outer = SliceReader::new(certificate.value()).map_err(malformed)?;
    let tbs: AnyRef<'_> = outer.decode().map_err(malformed)?;
    expect_sequence(&tbs, "tbsCertificate")?;
    let signature_algorithm: AnyRef<'_> = outer.decode().map_err(malformed)?;
    expect_sequence(&signature_algorithm, "signatureAlgorithm")?;
    let signature_value: AnyRef<'_> = outer.decode().map_err(malformed)?;
    if signature_value.tag() != Tag::BitString {
        return Err(TrustError::MalformedDocument(
            "signatureValue is not a BIT STRING".to_string(),
        ));
    }
    outer.finish(()).map_err(malformed)?;

    let mut fields = SliceReader::new(tbs.value()).map_err(malformed)?;
    let version_tag = Tag::ContextSpecific {
        constructed: true,
        number: TagNumber::N0,
    };
    if fields.peek_tag().map_err(malformed)? == version_tag {
        let _version: AnyRef<'_> = fields.decode().map_err(malformed)?;
    }
    for _ in 0..FIELDS_BEFORE_SPKI {
        let _field: AnyRef<'_> = fields.decode().map_err(malformed)?;
    }

    fields.decode().map_err(malformed)
}

/// Maps the SPKI algorithm to a supported curve.
fn key_curve(spki: &SubjectPublicKeyInfoRef<'_>) -> Result<KeyCurve> {
    if spki.algorithm.oid != EC_PUBLIC_KEY_OID {
        return Err(TrustError::UnsupportedKeyAlgorithm(format!(
            "key algorithm {} is not id-ecPublicKey",
            spki.algorithm.oid
        )));
    }

    let curve_oid = spki.algorithm.parameters_oid().map_err(|_| {
        TrustError::UnsupportedKeyAlgorithm("EC key without a named curve".to_string())
    })?;

    if curve_oid == SECP256K1_OID {
        Ok(KeyCurve::Secp256k1)
    } else if curve_oid == PRIME256V1_OID {
        Ok(KeyCurve::P256)
    } else {
        Err(TrustError::UnsupportedKeyAlgorithm(format!(
            "named curve {} is not supported",
            curve_oid
        )))
    }
}

/// Extracts the signer key from a DER encoded X.509 certificate.
///
/// # Returns
///
/// * `Ok(SignerKey)` - Validated 64-byte `X || Y` key
/// * `Err(TrustError::MalformedDocument)` - Certificate structure or curve point is invalid
/// * `Err(TrustError::UnsupportedKeyAlgorithm)` - Not an EC key on a supported curve
pub fn signer_key_from_certificate(der: &[u8]) -> Result<SignerKey> {
    let spki = subject_public_key_info(der)?;
    let curve = key_curve(&spki)?;

    let point = spki.subject_public_key.as_bytes().ok_or_else(|| {
        TrustError::MalformedDocument("subject public key has unused bits".to_string())
    })?;

    SignerKey::from_sec1_bytes(curve, point)
}
