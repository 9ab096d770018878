//! TokenScript Document Module
//!
//! Locates the issuer certificate inside a signed TokenScript document. Signed
//! documents carry an XML-DSig `Signature` element whose `KeyInfo/X509Data`
//! holds one or more base64 `X509Certificate` entries; the first one is the
//! signer's certificate.
//!
//! The whole document is read so that truncated or otherwise malformed XML is
//! rejected even when the certificate appears early.

use base64::{engine::general_purpose, Engine as _};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{Result, TrustError};

/// XML-DSig namespace URI.
pub const XMLDSIG_NS: &[u8] = b"http://www.w3.org/2000/09/xmldsig#";

/// Elements of interest on the path to the signer certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Signature,
    KeyInfo,
    X509Data,
    X509Certificate,
    Other,
}

impl Frame {
    fn classify(in_dsig_ns: bool, local_name: &[u8]) -> Self {
        if !in_dsig_ns {
            return Frame::Other;
        }
        match local_name {
            b"Signature" => Frame::Signature,
            b"KeyInfo" => Frame::KeyInfo,
            b"X509Data" => Frame::X509Data,
            b"X509Certificate" => Frame::X509Certificate,
            _ => Frame::Other,
        }
    }
}

fn malformed(e: impl std::fmt::Display) -> TrustError {
    TrustError::MalformedDocument(e.to_string())
}

/// Returns true when `stack` ends in `Signature/../KeyInfo/X509Data/X509Certificate`.
fn at_signer_certificate(stack: &[Frame]) -> bool {
    let n = stack.len();
    if n < 3 || stack[n - 1] != Frame::X509Certificate || stack[n - 2] != Frame::X509Data {
        return false;
    }
    let above = &stack[..n - 2];
    match above.iter().rposition(|f| *f == Frame::KeyInfo) {
        Some(key_info) => above[..key_info].contains(&Frame::Signature),
        None => false,
    }
}

/// Extracts the DER bytes of the signer certificate from a signed TokenScript document.
///
/// # Arguments
///
/// * `document` - Raw bytes of the TokenScript XML document
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - DER encoded X.509 certificate of the signer
/// * `Err(TrustError::MalformedDocument)` - Not well-formed XML, or certificate is not valid base64
/// * `Err(TrustError::CertificateNotFound)` - No XML-DSig signer certificate present
pub fn extract_certificate_der(document: &[u8]) -> Result<Vec<u8>> {
    let mut reader = NsReader::from_reader(document);
    let mut buf = Vec::new();

    let mut stack: Vec<Frame> = Vec::new();
    let mut roots = 0usize;
    let mut capture: Option<String> = None;
    let mut certificate: Option<String> = None;

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf).map_err(malformed)?;
        let in_dsig_ns = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == XMLDSIG_NS);

        match event {
            Event::Start(start) => {
                if stack.is_empty() {
                    roots += 1;
                    if roots > 1 {
                        return Err(malformed("multiple root elements"));
                    }
                }
                stack.push(Frame::classify(in_dsig_ns, start.local_name().as_ref()));
                if certificate.is_none() && at_signer_certificate(&stack) {
                    capture = Some(String::new());
                }
            }
            Event::Empty(_) => {
                if stack.is_empty() {
                    roots += 1;
                    if roots > 1 {
                        return Err(malformed("multiple root elements"));
                    }
                }
            }
            Event::Text(text) => {
                if stack.is_empty() && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(malformed("content outside the root element"));
                }
                if let Some(captured) = capture.as_mut() {
                    captured.push_str(&text.unescape().map_err(malformed)?);
                }
            }
            Event::CData(data) => {
                if let Some(captured) = capture.as_mut() {
                    captured.push_str(std::str::from_utf8(&*data).map_err(malformed)?);
                }
            }
            Event::End(_) => match stack.pop() {
                None => return Err(malformed("unexpected closing tag")),
                Some(Frame::X509Certificate) => {
                    if let Some(captured) = capture.take() {
                        certificate = Some(captured);
                    }
                }
                Some(_) => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if roots == 0 {
        return Err(malformed("document has no root element"));
    }
    if !stack.is_empty() {
        return Err(malformed("document ended inside an open element"));
    }

    let encoded = certificate.ok_or(TrustError::CertificateNotFound)?;
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(TrustError::CertificateNotFound);
    }

    general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| malformed(format!("signer certificate is not valid base64: {}", e)))
}
