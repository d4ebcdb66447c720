#![allow(dead_code)]

use base64::Engine;
use der::{DecodePem, Encode};
use wsse_core::{ns, profile};
use wsse_token::{configure_context, Context};
use wsse_xml::XmlDocument;
use x509_cert::Certificate;

const SIGNER_PEM: &str = include_str!("../data/signer.pem");
const OTHER_PEM: &str = include_str!("../data/other.pem");

pub fn signer() -> Certificate {
    Certificate::from_pem(SIGNER_PEM).expect("signer fixture")
}

pub fn other() -> Certificate {
    Certificate::from_pem(OTHER_PEM).expect("other fixture")
}

pub fn to_b64(cert: &Certificate) -> String {
    base64::engine::general_purpose::STANDARD.encode(cert.to_der().expect("encode"))
}

/// A `BinarySecurityToken` element carrying `cert`, using the `wsse`
/// prefix and the given qualified Id attribute name.
pub fn token_xml(id_attr: &str, id: &str, cert: &Certificate) -> String {
    format!(
        r#"<wsse:BinarySecurityToken {id_attr}="{id}" ValueType="{}" EncodingType="{}">{}</wsse:BinarySecurityToken>"#,
        profile::X509V3,
        profile::BASE64_BINARY,
        to_b64(cert)
    )
}

/// Wrap `body` in a SOAP-ish envelope declaring `wsse` and `wsu`.
pub fn envelope(body: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope" xmlns:wsse="{}" xmlns:wsu="{}"><soap:Header><wsse:Security>{body}</wsse:Security></soap:Header><soap:Body wsu:Id="body"/></soap:Envelope>"#,
        ns::WSSE,
        ns::WSU
    )
}

/// Parse `xml` into a context with the standard setup.
pub fn configured(xml: &str) -> Context {
    let mut ctx = Context::new(XmlDocument::parse(xml).expect("parse"));
    configure_context(&mut ctx);
    ctx
}
