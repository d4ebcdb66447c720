#![forbid(unsafe_code)]

//! `<wsse:Reference>`: a URI pointing at another element of the same
//! document by its Id.

use crate::context::Context;
use crate::node::{new_element, validate_element, XmlNode};
use crate::provider::{certificate_provider, X509CertificateProvider};
use log::debug;
use std::any::Any;
use wsse_core::{ns, Error};
use wsse_xml::{xpath, Element};
use x509_cert::Certificate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    uri: String,
    value_type: String,
}

impl Reference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference to the element whose Id is `id` (`#id`).
    pub fn to_id(id: &str) -> Self {
        Self {
            uri: format!("#{id}"),
            value_type: String::new(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn value_type(&self) -> &str {
        &self.value_type
    }

    pub fn set_value_type(&mut self, value_type: impl Into<String>) {
        self.value_type = value_type.into();
    }
}

/// Constructor registered for `{wsse}Reference`.
pub fn new_reference_node(_ctx: &Context) -> Result<Box<dyn XmlNode>, Error> {
    Ok(Box::new(Reference::new()))
}

impl XmlNode for Reference {
    fn element_name(&self) -> &str {
        ns::node::REFERENCE
    }

    fn load_xml(&mut self, ctx: &Context, el: &Element) -> Result<(), Error> {
        validate_element(ctx, el, ns::node::REFERENCE, ns::WSSE)?;

        self.set_uri(el.attribute(ns::attr::URI).unwrap_or_default());
        self.set_value_type(el.attribute(ns::attr::VALUE_TYPE).unwrap_or_default());
        Ok(())
    }

    fn get_xml(&self, ctx: &Context) -> Result<Element, Error> {
        let mut el = new_element(ctx, ns::WSSE, ns::node::REFERENCE);

        // URI is required by the schema and always comes first.
        el.set_attribute(ns::attr::URI, self.uri.as_str());
        if !self.value_type.is_empty() {
            el.set_attribute(ns::attr::VALUE_TYPE, self.value_type.as_str());
        }
        Ok(el)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_x509_certificate_provider(&self) -> Option<&dyn X509CertificateProvider> {
        Some(self)
    }
}

impl X509CertificateProvider for Reference {
    /// Dereference a same-document `#id` URI and ask the node found there
    /// for its certificate.
    ///
    /// The target element is looked up and re-loaded on every call.
    fn x509_certificate(&self, ctx: &Context) -> Result<Certificate, Error> {
        let id = xpath::parse_same_document_ref(&self.uri)
            .ok_or_else(|| Error::UnsupportedUri(self.uri.clone()))?;
        let _guard = ctx.enter_reference(&self.uri)?;

        let target = ctx
            .document()
            .find_by_id(id)
            .ok_or_else(|| Error::ReferenceNotFound(self.uri.clone()))?;
        let namespace = ctx.element_namespace(target).unwrap_or("");
        debug!(
            "reference {} resolved to {{{namespace}}}{}",
            self.uri,
            target.name()
        );

        let mut node = ctx.construct(namespace, target.name())?;
        node.load_xml(ctx, target)?;
        certificate_provider(node.as_ref())?.x509_certificate(ctx)
    }
}
