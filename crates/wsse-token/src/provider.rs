#![forbid(unsafe_code)]

//! Certificate-provider capability.

use crate::context::Context;
use crate::node::XmlNode;
use wsse_core::Error;
use x509_cert::Certificate;

/// A node that can yield an X.509 certificate, either from its own content
/// or by following a reference.
pub trait X509CertificateProvider {
    fn x509_certificate(&self, ctx: &Context) -> Result<Certificate, Error>;
}

/// Query `node` for the certificate-provider capability.
///
/// Fails with [`Error::NotCertificateProvider`] instead of returning nothing.
pub fn certificate_provider(node: &dyn XmlNode) -> Result<&dyn X509CertificateProvider, Error> {
    node.as_x509_certificate_provider()
        .ok_or_else(|| Error::NotCertificateProvider(node.element_name().to_owned()))
}
