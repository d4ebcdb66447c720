#![forbid(unsafe_code)]

//! Token-profile URI constants for `ValueType` and `EncodingType` attributes.
//!
//! Taken from the OASIS X.509 Token Profile 1.0 and SOAP Message
//! Security 1.0 documents.

// ── ValueType ────────────────────────────────────────────────────────

/// A single X.509 v3 certificate.
pub const X509V3: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-x509-token-profile-1.0#X509v3";

// ── EncodingType ─────────────────────────────────────────────────────

pub const BASE64_BINARY: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-soap-message-security-1.0#Base64Binary";
