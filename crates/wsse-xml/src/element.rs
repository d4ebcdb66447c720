#![forbid(unsafe_code)]

//! Owned, mutable XML element.
//!
//! Attributes are keyed by their qualified name as written in the
//! document (`wsu:Id`, `URI`, `xmlns:wsse`), in insertion order.
//! Namespace declarations are kept as ordinary `xmlns` attributes so a
//! parsed element serializes back to equivalent text.

use crate::writer::XmlWriter;
use wsse_core::ns;

/// A single attribute with its qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An XML element with its attributes, text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    prefix: Option<String>,
    name: String,
    /// Namespace URI, when known (resolved at parse time or set by the builder).
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    /// Text before the first child element.
    text: String,
    /// Text after this element's end tag, up to the next sibling.
    tail: String,
    children: Vec<Element>,
}

impl Element {
    /// Create an unprefixed element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an element with a namespace prefix.  An empty prefix yields an
    /// unprefixed element.
    pub fn with_prefix(prefix: &str, name: impl Into<String>) -> Self {
        let mut el = Self::new(name);
        if !prefix.is_empty() {
            el.prefix = Some(prefix.to_owned());
        }
        el
    }

    /// Local tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// `prefix:name`, or just `name` when unprefixed.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{p}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Namespace URI of the element, if known.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn set_namespace(&mut self, uri: impl Into<String>) {
        self.namespace = Some(uri.into());
    }

    /// Look up an attribute by qualified name.
    pub fn attribute(&self, qname: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == qname)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, overwriting its value in place if it exists.
    pub fn set_attribute(&mut self, qname: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == qname) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: qname.to_owned(),
                value,
            }),
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Add an `xmlns` / `xmlns:prefix` declaration.
    pub fn declare_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        match prefix {
            Some(p) if !p.is_empty() => self.set_attribute(&format!("xmlns:{p}"), uri),
            _ => self.set_attribute("xmlns", uri),
        }
    }

    /// Namespace URI declared on this element for `prefix` (`None` for the
    /// default namespace).
    pub fn declared_namespace(&self, prefix: Option<&str>) -> Option<&str> {
        match prefix {
            Some(p) if !p.is_empty() => self.attribute(&format!("xmlns:{p}")),
            _ => self.attribute("xmlns"),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn tail(&self) -> &str {
        &self.tail
    }

    pub fn set_tail(&mut self, tail: impl Into<String>) {
        self.tail = tail.into();
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Self and all descendant elements in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element in document order (self included) matching `pred`.
    pub fn find<P>(&self, pred: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.descendants().find(|el| pred(el))
    }

    /// Whether this element has the given local name and namespace URI.
    pub fn is(&self, name: &str, namespace: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Serialize the subtree to XML text.
    pub fn to_xml_string(&self) -> String {
        let mut writer = XmlWriter::new();
        writer.write_element(self);
        writer.into_string()
    }

    /// Build an element tree from a parsed roxmltree element node.
    pub(crate) fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let tag = node.tag_name();
        let namespace = tag.namespace().map(str::to_owned);
        let prefix = namespace
            .as_deref()
            .and_then(|uri| element_prefix(node, uri));
        let mut el = Self {
            prefix,
            name: tag.name().to_owned(),
            namespace,
            ..Self::default()
        };

        // Only the declarations made on this element, not inherited ones.
        let inherited: Vec<(Option<String>, String)> = node
            .parent_element()
            .map(|p| {
                p.namespaces()
                    .map(|n| (n.name().map(str::to_owned), n.uri().to_owned()))
                    .collect()
            })
            .unwrap_or_default();
        for decl in node.namespaces() {
            let name = decl.name().map(str::to_owned);
            if name.as_deref() == Some("xml") {
                continue;
            }
            if !inherited.contains(&(name.clone(), decl.uri().to_owned())) {
                el.declare_namespace(name.as_deref(), decl.uri());
            }
        }

        for attr in node.attributes() {
            let qname = match attr.namespace().and_then(|uri| attribute_prefix(node, uri)) {
                Some(p) => format!("{p}:{}", attr.name()),
                None => attr.name().to_owned(),
            };
            el.attributes.push(Attribute {
                name: qname,
                value: attr.value().to_owned(),
            });
        }

        for child in node.children() {
            if child.is_element() {
                el.children.push(Self::from_node(child));
            } else if child.is_text() {
                let text = child.text().unwrap_or("");
                match el.children.last_mut() {
                    Some(last) => last.tail.push_str(text),
                    None => el.text.push_str(text),
                }
            }
        }

        el
    }
}

/// Depth-first, document-order iterator over an element subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let el = self.stack.pop()?;
        self.stack.extend(el.children.iter().rev());
        Some(el)
    }
}

/// Prefix used for an element in namespace `uri`.  A matching default
/// namespace wins over prefixed bindings.
fn element_prefix(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if node
        .namespaces()
        .any(|n| n.name().is_none() && n.uri() == uri)
    {
        return None;
    }
    node.namespaces()
        .find(|n| n.uri() == uri)
        .and_then(|n| n.name())
        .map(str::to_owned)
}

/// Prefix used for an attribute in namespace `uri`.  Attributes never take
/// the default namespace.
fn attribute_prefix(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == ns::XML {
        return Some("xml".to_owned());
    }
    node.namespaces()
        .find(|n| n.uri() == uri && n.name().is_some())
        .and_then(|n| n.name())
        .map(str::to_owned)
}
