#![forbid(unsafe_code)]

//! `<wsse:SecurityTokenReference>`: a wrapper around exactly one token or
//! reference node.

use crate::context::Context;
use crate::node::{new_element, validate_element, XmlNode};
use crate::provider::{certificate_provider, X509CertificateProvider};
use crate::wsu_id::{get_wsu_id, set_wsu_id};
use log::debug;
use std::any::Any;
use wsse_core::{ns, Error};
use wsse_xml::Element;
use x509_cert::Certificate;

#[derive(Debug, Default)]
pub struct SecurityTokenReference {
    id: String,
    usage: String,
    token_type: String,
    content: Option<Box<dyn XmlNode>>,
}

impl SecurityTokenReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `content` as the single child.
    pub fn wrapping<N: XmlNode>(content: N) -> Self {
        let mut str_node = Self::new();
        str_node.set_content(content);
        str_node
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn set_usage(&mut self, usage: impl Into<String>) {
        self.usage = usage.into();
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    pub fn set_token_type(&mut self, token_type: impl Into<String>) {
        self.token_type = token_type.into();
    }

    pub fn content(&self) -> Option<&dyn XmlNode> {
        self.content.as_deref()
    }

    pub fn set_content<N: XmlNode>(&mut self, content: N) {
        self.content = Some(Box::new(content));
    }

    pub fn set_content_boxed(&mut self, content: Box<dyn XmlNode>) {
        self.content = Some(content);
    }

    /// Remove and return the content, leaving the reference empty.
    pub fn take_content(&mut self) -> Option<Box<dyn XmlNode>> {
        self.content.take()
    }
}

/// Constructor registered for `{wsse}SecurityTokenReference`.
pub fn new_security_token_reference_node(_ctx: &Context) -> Result<Box<dyn XmlNode>, Error> {
    Ok(Box::new(SecurityTokenReference::new()))
}

impl XmlNode for SecurityTokenReference {
    fn element_name(&self) -> &str {
        ns::node::SECURITY_TOKEN_REFERENCE
    }

    /// Children are dispatched by the namespace their prefix is bound to in
    /// `ctx`, falling back to the parsed namespace for unbound prefixes.
    /// Children without a registered constructor are skipped.  When several
    /// children are recognized, the last one in document order is kept.
    fn load_xml(&mut self, ctx: &Context, el: &Element) -> Result<(), Error> {
        validate_element(ctx, el, ns::node::SECURITY_TOKEN_REFERENCE, ns::WSSE)?;

        self.set_id(get_wsu_id(ctx, el));
        self.set_usage(el.attribute(ns::attr::USAGE).unwrap_or_default());
        self.set_token_type(el.attribute(ns::attr::TOKEN_TYPE).unwrap_or_default());

        for child in el.children() {
            let namespace = ctx.prefix_namespace(child).unwrap_or("");
            let ctor = match ctx.type_constructor(namespace, child.name()) {
                Ok(ctor) => ctor,
                Err(Error::NoTypeConstructor { .. }) => {
                    debug!("skipping unrecognized child {{{namespace}}}{}", child.name());
                    continue;
                }
                Err(e) => return Err(e),
            };
            let mut node = ctor(ctx)?;
            node.load_xml(ctx, child)?;
            self.content = Some(node);
        }
        Ok(())
    }

    fn get_xml(&self, ctx: &Context) -> Result<Element, Error> {
        let mut el = new_element(ctx, ns::WSSE, ns::node::SECURITY_TOKEN_REFERENCE);

        if !self.id.is_empty() {
            set_wsu_id(ctx, &mut el, &self.id);
        }
        if !self.usage.is_empty() {
            el.set_attribute(ns::attr::USAGE, self.usage.as_str());
        }
        if !self.token_type.is_empty() {
            el.set_attribute(ns::attr::TOKEN_TYPE, self.token_type.as_str());
        }
        if let Some(content) = &self.content {
            el.append_child(content.get_xml(ctx)?);
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

impl X509CertificateProvider for SecurityTokenReference {
    fn x509_certificate(&self, ctx: &Context) -> Result<Certificate, Error> {
        let content = self.content.as_deref().ok_or(Error::MissingContent)?;
        debug!(
            "SecurityTokenReference {:?} delegating to {}",
            self.id,
            content.element_name()
        );
        certificate_provider(content)?.x509_certificate(ctx)
    }
}
