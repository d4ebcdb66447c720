#![forbid(unsafe_code)]

/// Errors produced by the wsse crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("invalid element tag: expected {expected}, found {found}")]
    InvalidElementTag { expected: String, found: String },

    #[error("invalid element namespace: expected {expected}, found {found}")]
    InvalidElementNamespace { expected: String, found: String },

    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("no type constructor registered for {{{namespace}}}{name}")]
    NoTypeConstructor { namespace: String, name: String },

    #[error("not an X.509 certificate provider: {0}")]
    NotCertificateProvider(String),

    #[error("x509 certificate not available: no content")]
    MissingContent,

    #[error("reference nesting too deep at {0}")]
    ReferenceDepthExceeded(String),

    #[error("invalid ValueType: {0}")]
    InvalidValueType(String),

    #[error("invalid EncodingType: {0}")]
    InvalidEncodingType(String),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("DER decode error: {0}")]
    Der(#[from] der::Error),

    #[error("unsupported URI format: {0}")]
    UnsupportedUri(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for the errors raised when an element has the wrong tag or namespace.
    pub fn is_schema_shape(&self) -> bool {
        matches!(
            self,
            Error::InvalidElementTag { .. } | Error::InvalidElementNamespace { .. }
        )
    }

    /// True for failures to follow a reference to a certificate provider.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::ReferenceNotFound(_)
                | Error::NoTypeConstructor { .. }
                | Error::NotCertificateProvider(_)
                | Error::MissingContent
                | Error::ReferenceDepthExceeded(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let err = Error::InvalidElementTag {
            expected: "Reference".into(),
            found: "InvalidTag".into(),
        };
        assert!(err.is_schema_shape());
        assert!(!err.is_resolution());
        assert!(Error::MissingContent.is_resolution());
        assert!(!Error::UnsupportedUri("http://example.com".into()).is_resolution());
    }

    #[test]
    fn test_io_error_conversion() {
        fn read(path: &str) -> Result<Vec<u8>, Error> {
            Ok(std::fs::read(path)?)
        }
        let err = read("/nonexistent/wsse/cert.pem").unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("I/O error: "));
        assert!(!err.is_resolution());
    }

    #[test]
    fn test_no_type_constructor_message() {
        let err = Error::NoTypeConstructor {
            namespace: "urn:x".into(),
            name: "Token".into(),
        };
        assert_eq!(err.to_string(), "no type constructor registered for {urn:x}Token");
    }
}
