#![forbid(unsafe_code)]

//! The node abstraction implemented by every token type.

use crate::context::Context;
use crate::provider::X509CertificateProvider;
use std::any::Any;
use std::fmt;
use wsse_core::{ns, Error};
use wsse_xml::Element;

/// A typed view of one XML element: loadable from an element and
/// renderable back to one.
pub trait XmlNode: Any + fmt::Debug + 'static {
    /// Local name of the element this node maps to.
    fn element_name(&self) -> &str;

    /// Populate the node from `el`.  On error the node may be partially
    /// populated and should be discarded.
    fn load_xml(&mut self, ctx: &Context, el: &Element) -> Result<(), Error>;

    /// Render the node as a new element, using the prefixes bound in `ctx`.
    fn get_xml(&self, ctx: &Context) -> Result<Element, Error>;

    fn as_any(&self) -> &dyn Any;

    /// Capability query: the node as a certificate provider, if it is one.
    fn as_x509_certificate_provider(&self) -> Option<&dyn X509CertificateProvider> {
        None
    }
}

impl dyn XmlNode {
    /// Downcast to a concrete node type.
    pub fn downcast_ref<T: XmlNode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: XmlNode>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Check that `el` is named `name` and lives in `namespace`.
///
/// The tag is checked before the namespace.
pub fn validate_element(
    ctx: &Context,
    el: &Element,
    name: &str,
    namespace: &str,
) -> Result<(), Error> {
    if el.name() != name {
        return Err(Error::InvalidElementTag {
            expected: name.to_owned(),
            found: el.name().to_owned(),
        });
    }
    let found = ctx.element_namespace(el).unwrap_or("");
    if found != namespace {
        return Err(Error::InvalidElementNamespace {
            expected: namespace.to_owned(),
            found: found.to_owned(),
        });
    }
    Ok(())
}

/// Create an element named `name` in `namespace`, prefixed with whatever
/// `ctx` binds to the namespace (or its conventional prefix).
pub fn new_element(ctx: &Context, namespace: &str, name: &str) -> Element {
    let prefix = ctx
        .namespace_prefix(namespace)
        .or_else(|| ns::default_prefix(namespace))
        .unwrap_or("");
    let mut el = Element::with_prefix(prefix, name);
    el.set_namespace(namespace);
    el
}

/// Render `node` as standalone XML text.
///
/// Every prefix used in the rendered tree that `ctx` binds is declared on
/// the root element, so the output parses on its own.
pub fn render(ctx: &Context, node: &dyn XmlNode) -> Result<String, Error> {
    let mut el = node.get_xml(ctx)?;
    declare_used_namespaces(ctx, &mut el);
    Ok(el.to_xml_string())
}

/// Declare on `root` each bound prefix used by an element or attribute in
/// its subtree.
pub fn declare_used_namespaces(ctx: &Context, root: &mut Element) {
    let mut used: Vec<String> = Vec::new();
    for el in root.descendants() {
        let attr_prefixes = el
            .attributes()
            .iter()
            .filter_map(|a| a.name.split_once(':').map(|(p, _)| p));
        for prefix in el.prefix().into_iter().chain(attr_prefixes) {
            if prefix != "xmlns" && prefix != "xml" && !used.iter().any(|p| p == prefix) {
                used.push(prefix.to_owned());
            }
        }
    }
    used.sort();

    for prefix in used {
        if root.declared_namespace(Some(&prefix)).is_some() {
            continue;
        }
        let uri = ctx
            .namespace_uri(&prefix)
            .or_else(|| well_known_namespace(&prefix));
        if let Some(uri) = uri {
            root.declare_namespace(Some(&prefix), uri);
        }
    }
}

fn well_known_namespace(prefix: &str) -> Option<&'static str> {
    [ns::WSU, ns::WSSE, ns::WSSE11]
        .into_iter()
        .find(|uri| ns::default_prefix(uri) == Some(prefix))
}
