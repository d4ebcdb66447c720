#![forbid(unsafe_code)]

//! `<wsse:BinarySecurityToken>`: a typed, encoded credential, usually a
//! base64 DER certificate.

use crate::context::Context;
use crate::node::{new_element, validate_element, XmlNode};
use crate::provider::X509CertificateProvider;
use crate::wsu_id::{get_wsu_id, set_wsu_id};
use base64::Engine;
use der::{Decode, Encode};
use log::debug;
use std::any::Any;
use wsse_core::{ns, profile, Error};
use wsse_xml::Element;
use x509_cert::Certificate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinarySecurityToken {
    id: String,
    value_type: String,
    encoding_type: String,
    value: String,
}

impl BinarySecurityToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an X.509 v3 token carrying `cert` as base64 DER.
    pub fn from_certificate(cert: &Certificate, id: &str) -> Result<Self, Error> {
        let der_bytes = cert.to_der()?;
        Ok(Self {
            id: id.to_owned(),
            value_type: profile::X509V3.to_owned(),
            encoding_type: profile::BASE64_BINARY.to_owned(),
            value: base64::engine::general_purpose::STANDARD.encode(der_bytes),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn set_value_type(&mut self, value_type: impl Into<String>) {
        self.value_type = value_type.into();
    }

    pub fn encoding_type(&self) -> &str {
        &self.encoding_type
    }

    pub fn set_encoding_type(&mut self, encoding_type: impl Into<String>) {
        self.encoding_type = encoding_type.into();
    }

    /// The encoded value, exactly as read from the element text.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Constructor registered for `{wsse}BinarySecurityToken`.
pub fn new_binary_security_token_node(_ctx: &Context) -> Result<Box<dyn XmlNode>, Error> {
    Ok(Box::new(BinarySecurityToken::new()))
}

impl XmlNode for BinarySecurityToken {
    fn element_name(&self) -> &str {
        ns::node::BINARY_SECURITY_TOKEN
    }

    fn load_xml(&mut self, ctx: &Context, el: &Element) -> Result<(), Error> {
        validate_element(ctx, el, ns::node::BINARY_SECURITY_TOKEN, ns::WSSE)?;

        self.set_id(get_wsu_id(ctx, el));
        self.set_value_type(el.attribute(ns::attr::VALUE_TYPE).unwrap_or_default());
        self.set_encoding_type(el.attribute(ns::attr::ENCODING_TYPE).unwrap_or_default());
        self.set_value(el.text());
        Ok(())
    }

    fn get_xml(&self, ctx: &Context) -> Result<Element, Error> {
        let mut el = new_element(ctx, ns::WSSE, ns::node::BINARY_SECURITY_TOKEN);

        if !self.id.is_empty() {
            set_wsu_id(ctx, &mut el, &self.id);
        }
        if !self.value_type.is_empty() {
            el.set_attribute(ns::attr::VALUE_TYPE, self.value_type.as_str());
        }
        if !self.encoding_type.is_empty() {
            el.set_attribute(ns::attr::ENCODING_TYPE, self.encoding_type.as_str());
        }
        el.set_text(self.value.as_str());
        Ok(el)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_x509_certificate_provider(&self) -> Option<&dyn X509CertificateProvider> {
        Some(self)
    }
}

impl X509CertificateProvider for BinarySecurityToken {
    /// Decode the token as a DER certificate.
    ///
    /// Only the X509v3 / Base64Binary combination is accepted.  Line breaks
    /// (`\r`, `\n`) inside the value are ignored; any other whitespace is
    /// a base64 error.
    fn x509_certificate(&self, _ctx: &Context) -> Result<Certificate, Error> {
        if self.value_type != profile::X509V3 {
            return Err(Error::InvalidValueType(self.value_type.clone()));
        }
        if self.encoding_type != profile::BASE64_BINARY {
            return Err(Error::InvalidEncodingType(self.encoding_type.clone()));
        }

        let clean: String = self
            .value
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        let der_bytes = base64::engine::general_purpose::STANDARD.decode(clean)?;
        debug!(
            "decoding {} byte certificate from BinarySecurityToken {:?}",
            der_bytes.len(),
            self.id
        );
        Ok(Certificate::from_der(&der_bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signer_b64, signer_der};
    use wsse_xml::XmlDocument;

    fn context() -> Context {
        let mut ctx = Context::default();
        ctx.set_namespace_prefix("wsse", ns::WSSE);
        ctx.set_namespace_prefix("wsu", ns::WSU);
        ctx
    }

    fn x509_token(value: &str) -> BinarySecurityToken {
        let mut token = BinarySecurityToken::new();
        token.set_value_type(profile::X509V3);
        token.set_encoding_type(profile::BASE64_BINARY);
        token.set_value(value);
        token
    }

    #[test]
    fn test_load_xml_invalid_element() {
        let xml = format!(r#"<wsse:InvalidTag xmlns:wsse="{}"/>"#, ns::WSSE);
        let doc = XmlDocument::parse(&xml).unwrap();
        let ctx = Context::new(doc);

        let mut token = BinarySecurityToken::new();
        let err = token
            .load_xml(&ctx, ctx.document().root().unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidElementTag { .. }));
    }

    #[test]
    fn test_load_xml() {
        let xml = format!(
            r#"<wsse:BinarySecurityToken EncodingType="base64" ValueType="x509" wsu:Id="123" xmlns:wsse="{}" xmlns:wsu="{}">cert_data</wsse:BinarySecurityToken>"#,
            ns::WSSE,
            ns::WSU
        );
        let mut ctx = Context::new(XmlDocument::parse(&xml).unwrap());
        ctx.set_namespace_prefix("wsu", ns::WSU);

        let mut token = BinarySecurityToken::new();
        token
            .load_xml(&ctx, ctx.document().root().unwrap())
            .unwrap();
        assert_eq!(token.id(), "123");
        assert_eq!(token.value_type(), "x509");
        assert_eq!(token.encoding_type(), "base64");
        assert_eq!(token.value(), "cert_data");
    }

    #[test]
    fn test_load_xml_missing_attributes() {
        let xml = format!(
            r#"<wsse:BinarySecurityToken xmlns:wsse="{}"/>"#,
            ns::WSSE
        );
        let ctx = Context::new(XmlDocument::parse(&xml).unwrap());
        let mut token = BinarySecurityToken::new();
        token
            .load_xml(&ctx, ctx.document().root().unwrap())
            .unwrap();
        assert_eq!(token, BinarySecurityToken::new());
    }

    #[test]
    fn test_get_xml() {
        let ctx = context();
        let mut token = BinarySecurityToken::new();
        token.set_id("123");
        token.set_value_type("x509");
        token.set_encoding_type("base64");
        token.set_value("cert_data");

        let el = token.get_xml(&ctx).unwrap();
        assert_eq!(
            el.to_xml_string(),
            r#"<wsse:BinarySecurityToken wsu:Id="123" ValueType="x509" EncodingType="base64">cert_data</wsse:BinarySecurityToken>"#
        );
    }

    #[test]
    fn test_get_xml_omits_empty_attributes() {
        let ctx = context();
        let el = BinarySecurityToken::new().get_xml(&ctx).unwrap();
        assert!(el.attributes().is_empty());
        assert_eq!(el.text(), "");
        assert_eq!(el.to_xml_string(), "<wsse:BinarySecurityToken/>");

        let mut reloaded = BinarySecurityToken::new();
        reloaded.load_xml(&ctx, &el).unwrap();
        assert_eq!(reloaded.id(), "");
        assert_eq!(reloaded.value_type(), "");
        assert_eq!(reloaded.encoding_type(), "");
    }

    #[test]
    fn test_round_trip() {
        let ctx = context();
        let mut token = x509_token(&signer_b64());
        token.set_id("X509-1");

        let el = token.get_xml(&ctx).unwrap();
        let mut reloaded = BinarySecurityToken::new();
        reloaded.load_xml(&ctx, &el).unwrap();
        assert_eq!(reloaded, token);
    }

    #[test]
    fn test_x509_certificate() {
        let ctx = context();
        let cert = x509_token(&signer_b64()).x509_certificate(&ctx).unwrap();
        assert_eq!(cert.to_der().unwrap(), signer_der());
    }

    #[test]
    fn test_x509_certificate_wrapped_base64() {
        let ctx = context();
        let wrapped: String = signer_b64()
            .as_bytes()
            .chunks(64)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\r\n");
        let cert = x509_token(&wrapped).x509_certificate(&ctx).unwrap();
        assert_eq!(cert.to_der().unwrap(), signer_der());
    }

    #[test]
    fn test_x509_certificate_wrong_value_type() {
        let ctx = context();
        let mut token = x509_token(&signer_b64());
        token.set_value_type("x509");
        assert!(matches!(
            token.x509_certificate(&ctx),
            Err(Error::InvalidValueType(v)) if v == "x509"
        ));
    }

    #[test]
    fn test_x509_certificate_wrong_encoding_type() {
        let ctx = context();
        let mut token = x509_token(&signer_b64());
        token.set_encoding_type("base64");
        assert!(matches!(
            token.x509_certificate(&ctx),
            Err(Error::InvalidEncodingType(_))
        ));
    }

    #[test]
    fn test_x509_certificate_invalid_base64() {
        let ctx = context();
        assert!(matches!(
            x509_token("not base64!").x509_certificate(&ctx),
            Err(Error::Base64(_))
        ));
    }

    #[test]
    fn test_x509_certificate_rejects_inner_spaces() {
        let ctx = context();
        let b64 = signer_b64();
        let (head, rest) = b64.split_at(64);
        for value in [format!("{head} {rest}"), format!("{head}\t{rest}")] {
            assert!(matches!(
                x509_token(&value).x509_certificate(&ctx),
                Err(Error::Base64(_))
            ));
        }
    }

    #[test]
    fn test_x509_certificate_invalid_der() {
        let ctx = context();
        // "hello world" is valid base64 but not a DER certificate.
        assert!(matches!(
            x509_token("aGVsbG8gd29ybGQ=").x509_certificate(&ctx),
            Err(Error::Der(_))
        ));
    }

    #[test]
    fn test_from_certificate() {
        let ctx = context();
        let cert = Certificate::from_der(&signer_der()).unwrap();
        let token = BinarySecurityToken::from_certificate(&cert, "X509-1").unwrap();
        assert_eq!(token.id(), "X509-1");
        assert_eq!(token.value(), signer_b64());
        assert_eq!(token.x509_certificate(&ctx).unwrap(), cert);
    }
}
