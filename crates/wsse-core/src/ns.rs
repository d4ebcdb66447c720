#![forbid(unsafe_code)]

//! XML namespace constants used across the library.

/// WS-Security utility namespace (`wsu`)
pub const WSU: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";

/// WS-Security secext 1.0 namespace (`wsse`)
pub const WSSE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// WS-Security secext 1.1 namespace (`wsse11`)
pub const WSSE11: &str = "http://docs.oasis-open.org/wss/oasis-wss-wssecurity-secext-1.1.xsd";

/// XML namespace
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";

// ── Conventional prefixes ────────────────────────────────────────────

pub mod prefix {
    pub const WSU: &str = "wsu";
    pub const WSSE: &str = "wsse";
    pub const WSSE11: &str = "wsse11";
}

// ── Element names ────────────────────────────────────────────────────

pub mod node {
    pub const BINARY_SECURITY_TOKEN: &str = "BinarySecurityToken";
    pub const REFERENCE: &str = "Reference";
    pub const SECURITY_TOKEN_REFERENCE: &str = "SecurityTokenReference";
}

// ── Attribute names ──────────────────────────────────────────────────

pub mod attr {
    /// Local part of `wsu:Id`; always written with the bound wsu prefix.
    pub const ID: &str = "Id";
    pub const URI: &str = "URI";
    pub const VALUE_TYPE: &str = "ValueType";
    pub const ENCODING_TYPE: &str = "EncodingType";
    pub const USAGE: &str = "Usage";
    pub const TOKEN_TYPE: &str = "TokenType";
}

/// Conventional prefix for one of the WS-Security namespaces.
pub fn default_prefix(uri: &str) -> Option<&'static str> {
    match uri {
        WSU => Some(prefix::WSU),
        WSSE => Some(prefix::WSSE),
        WSSE11 => Some(prefix::WSSE11),
        _ => None,
    }
}
