//! Shared test helpers
//!
//! Builds DER certificates and signed TokenScript documents in memory so the
//! extractor can be tested without fixture files. Certificates are structurally
//! valid but carry a dummy signature; the extractor never verifies it.

#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::pkcs8::EncodePublicKey;

// ============================================================================
// KNOWN KEYS AND ADDRESSES
// ============================================================================

/// secp256k1 SubjectPublicKeyInfo with a known Ethereum address.
pub const SECP256K1_SPKI_B64: &str = "MFYwEAYHKoZIzj0CAQYFK4EEAAoDQgAEjJaJh5wfZwvj8b3bQ4GYikqDTLXWUjMhkFs9lGj2N9B17zo37p4PSy99rDio0QHLadpso0rtTJDSISRW9MdOqA==";

/// keccak256(X || Y)[12:32] of `SECP256K1_SPKI_B64`.
pub const SECP256K1_SIGNER_ADDRESS: &str = "0xeeb8861f51b3f3f2204d64bbf7a7eb25e1b4d6cd";

/// Ed25519 SubjectPublicKeyInfo.
pub const ED25519_SPKI_B64: &str = "MCowBQYDK2VwAyEAnUV+ReQWxMZ3Z2pC/5aOPPjcc8jzOo0ZgSl7+j4AMLo=";

/// Owner address of the EntryToken contract.
pub const ENTRY_TOKEN_OWNER: &str = "0x63cCEF733a093E5Bd773b41C96D3eCE361464942";

/// Trust address of `SECP256K1_SPKI_B64` for `ENTRY_TOKEN_OWNER`.
pub const SECP256K1_TRUST_ADDRESS: &str = "0x13b41da830bb4e8f9ba8876e2b3853bc1cf98e14";

/// Revoke address of `SECP256K1_SPKI_B64` for `ENTRY_TOKEN_OWNER`.
pub const SECP256K1_REVOKE_ADDRESS: &str = "0x11b3325ccfc20baedfb1ec60f5ae7b9588a756a0";

pub const DUMMY_OWNER_A: &str = "0x1111111111111111111111111111111111111111";
pub const DUMMY_OWNER_B: &str = "0x2222222222222222222222222222222222222222";

// ============================================================================
// DER ENCODING
// ============================================================================

pub const OID_EC_PUBLIC_KEY: &[u8] = &[0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
pub const OID_SECP256K1: &[u8] = &[0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a];
pub const OID_PRIME256V1: &[u8] = &[0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
pub const OID_SECP384R1: &[u8] = &[0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22];
pub const OID_ECDSA_WITH_SHA256: &[u8] = &[0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02];

/// Encodes one DER tag-length-value.
pub fn der_tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    let len = content.len();
    if len < 0x80 {
        out.push(len as u8);
    } else if len <= 0xff {
        out.extend_from_slice(&[0x81, len as u8]);
    } else {
        out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]);
    }
    out.extend_from_slice(content);
    out
}

pub fn der_sequence(parts: &[&[u8]]) -> Vec<u8> {
    der_tlv(0x30, &parts.concat())
}

/// SubjectPublicKeyInfo for an EC point on the curve named by `curve_oid`.
pub fn ec_spki(curve_oid: &[u8], point: &[u8]) -> Vec<u8> {
    let algorithm = der_sequence(&[OID_EC_PUBLIC_KEY, curve_oid]);
    let mut bits = vec![0x00];
    bits.extend_from_slice(point);
    der_sequence(&[&algorithm[..], &der_tlv(0x03, &bits)[..]])
}

fn certificate(spki: &[u8], with_version: bool) -> Vec<u8> {
    let version = der_tlv(0xa0, &der_tlv(0x02, &[0x02]));
    let serial = der_tlv(0x02, &[0x01]);
    let signature_algorithm = der_sequence(&[OID_ECDSA_WITH_SHA256]);
    let name = der_sequence(&[]);
    let validity = der_sequence(&[
        &der_tlv(0x17, b"250101000000Z")[..],
        &der_tlv(0x17, b"350101000000Z")[..],
    ]);

    let mut tbs_fields: Vec<&[u8]> = Vec::new();
    if with_version {
        tbs_fields.push(&version[..]);
    }
    tbs_fields.push(&serial[..]);
    tbs_fields.push(&signature_algorithm[..]);
    tbs_fields.push(&name[..]);
    tbs_fields.push(&validity[..]);
    tbs_fields.push(&name[..]);
    tbs_fields.push(spki);
    let tbs = der_sequence(&tbs_fields);

    let signature = der_tlv(0x03, &[0x00, 0x30, 0x00]);
    der_sequence(&[&tbs[..], &signature_algorithm[..], &signature[..]])
}

/// X.509 v3 certificate wrapping `spki`.
pub fn build_certificate(spki: &[u8]) -> Vec<u8> {
    certificate(spki, true)
}

/// X.509 v1 certificate (no explicit version field) wrapping `spki`.
pub fn build_v1_certificate(spki: &[u8]) -> Vec<u8> {
    certificate(spki, false)
}

pub fn known_secp256k1_spki() -> Vec<u8> {
    general_purpose::STANDARD.decode(SECP256K1_SPKI_B64).unwrap()
}

pub fn ed25519_spki() -> Vec<u8> {
    general_purpose::STANDARD.decode(ED25519_SPKI_B64).unwrap()
}

// ============================================================================
// RANDOM KEYS
// ============================================================================

pub fn random_secp256k1_key() -> k256::PublicKey {
    k256::SecretKey::random(&mut rand::rngs::OsRng).public_key()
}

pub fn secp256k1_spki(key: &k256::PublicKey) -> Vec<u8> {
    key.to_public_key_der().unwrap().as_bytes().to_vec()
}

pub fn compressed_secp256k1_spki(key: &k256::PublicKey) -> Vec<u8> {
    ec_spki(OID_SECP256K1, key.to_encoded_point(true).as_bytes())
}

pub fn random_p256_spki() -> Vec<u8> {
    let point = p256::SecretKey::random(&mut rand::rngs::OsRng)
        .public_key()
        .to_encoded_point(false);
    ec_spki(OID_PRIME256V1, point.as_bytes())
}

// ============================================================================
// DOCUMENTS
// ============================================================================

/// Base64 wrapped at 64 columns, as produced by XML signing tools.
pub fn wrapped_base64(der: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(der);
    encoded
        .as_bytes()
        .chunks(64)
        .map(|line| format!("          {}", std::str::from_utf8(line).unwrap()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Signed TokenScript document whose `KeyInfo` holds `certificates` in order.
pub fn signed_document_with_chain(certificates: &[Vec<u8>]) -> Vec<u8> {
    let entries: String = certificates
        .iter()
        .map(|der| {
            format!(
                "        <ds:X509Certificate>\n{}\n        </ds:X509Certificate>\n",
                wrapped_base64(der)
            )
        })
        .collect();
    document_with_key_info(&format!(
        "    <ds:KeyInfo>\n      <ds:X509Data>\n{}      </ds:X509Data>\n    </ds:KeyInfo>\n",
        entries
    ))
}

/// Signed TokenScript document embedding `certificate` as the signer certificate.
pub fn signed_document(certificate: &[u8]) -> Vec<u8> {
    signed_document_with_chain(&[certificate.to_vec()])
}

/// Signed document for the known secp256k1 test key.
pub fn known_signed_document() -> Vec<u8> {
    signed_document(&build_certificate(&known_secp256k1_spki()))
}

/// Document with a raw `X509Certificate` text node.
pub fn document_with_certificate_text(text: &str) -> Vec<u8> {
    document_with_key_info(&format!(
        "    <ds:KeyInfo><ds:X509Data><ds:X509Certificate>{}</ds:X509Certificate></ds:X509Data></ds:KeyInfo>\n",
        text
    ))
}

/// Wraps a `KeyInfo` fragment in a TokenScript document with an XML-DSig signature.
pub fn document_with_key_info(key_info: &str) -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ts:token xmlns:ts="http://tokenscript.org/2020/06/tokenscript"
          xmlns:ds="http://www.w3.org/2000/09/xmldsig#"
          custodian="false">
  <ts:name><ts:string xml:lang="en">Entry Token</ts:string></ts:name>
  <ts:contract name="EntryToken" interface="erc875">
    <ts:address network="1">{owner}</ts:address>
  </ts:contract>
  <ds:Signature>
    <ds:SignedInfo>
      <ds:CanonicalizationMethod Algorithm="http://www.w3.org/2001/10/xml-exc-c14n#"/>
      <ds:SignatureMethod Algorithm="http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256"/>
      <ds:Reference URI="">
        <ds:DigestMethod Algorithm="http://www.w3.org/2001/04/xmlenc#sha256"/>
        <ds:DigestValue>bm90IGEgcmVhbCBkaWdlc3Q=</ds:DigestValue>
      </ds:Reference>
    </ds:SignedInfo>
    <ds:SignatureValue>bm90IGEgcmVhbCBzaWduYXR1cmU=</ds:SignatureValue>
{key_info}  </ds:Signature>
</ts:token>
"#,
        owner = ENTRY_TOKEN_OWNER,
        key_info = key_info
    )
    .into_bytes()
}

/// TokenScript document without any signature.
pub fn unsigned_document() -> Vec<u8> {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ts:token xmlns:ts="http://tokenscript.org/2020/06/tokenscript">
  <ts:contract name="EntryToken" interface="erc875">
    <ts:address network="1">{}</ts:address>
  </ts:contract>
</ts:token>
"#,
        ENTRY_TOKEN_OWNER
    )
    .into_bytes()
}
