#![forbid(unsafe_code)]

//! XML document wrapper over roxmltree with Id-based element lookup.

use crate::element::Element;
use crate::xpath::AttrPredicate;
use wsse_core::{ns, Error};

/// An owned XML document.
///
/// Text is parsed once with roxmltree and converted into an owned
/// [`Element`] tree, which can then be edited and written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlDocument {
    root: Option<Element>,
}

impl XmlDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document around an existing root element.
    pub fn from_root(root: Element) -> Self {
        Self { root: Some(root) }
    }

    /// Parse XML from a string.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let doc = roxmltree::Document::parse_with_options(text, crate::parsing_options())
            .map_err(|e| Error::XmlParse(e.to_string()))?;
        Ok(Self::from_root(Element::from_node(doc.root_element())))
    }

    /// Parse XML from bytes.
    pub fn parse_bytes(data: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {e}")))?;
        Self::parse(text)
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    pub fn set_root(&mut self, root: Element) {
        self.root = Some(root);
    }

    /// First element in document order matching an `@name='value'` predicate.
    pub fn find_element(&self, predicate: &AttrPredicate<'_>) -> Option<&Element> {
        self.root.as_ref()?.find(|el| predicate.matches(el))
    }

    /// Find an element by the value of its `Id` attribute, whatever its
    /// prefix (`Id`, `wsu:Id`, ...).  Walks the whole tree on every call.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find_element(&AttrPredicate::new(ns::attr::ID, id))
    }

    /// Find the first element with the given local name and namespace.
    pub fn find_element_ns(&self, namespace: &str, local_name: &str) -> Option<&Element> {
        self.root.as_ref()?.find(|el| el.is(local_name, namespace))
    }

    /// Serialize the document (without XML declaration).
    pub fn to_xml_string(&self) -> String {
        self.root
            .as_ref()
            .map(Element::to_xml_string)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<Envelope xmlns:wsu="urn:u"><Header><Token wsu:Id="123">abc</Token></Header><Body Id="456"/></Envelope>"#;

    #[test]
    fn test_parse_and_serialize() {
        let doc = XmlDocument::parse(DOC).unwrap();
        assert_eq!(doc.to_xml_string(), DOC);
    }

    #[test]
    fn test_find_by_id_any_prefix() {
        let doc = XmlDocument::parse(DOC).unwrap();
        assert_eq!(doc.find_by_id("123").map(Element::name), Some("Token"));
        assert_eq!(doc.find_by_id("456").map(Element::name), Some("Body"));
        assert!(doc.find_by_id("789").is_none());
    }

    #[test]
    fn test_find_by_id_document_order() {
        let doc = XmlDocument::parse(r#"<a><b Id="x"/><c Id="x"/></a>"#).unwrap();
        assert_eq!(doc.find_by_id("x").map(Element::name), Some("b"));
    }

    #[test]
    fn test_empty_document() {
        let doc = XmlDocument::new();
        assert!(doc.root().is_none());
        assert!(doc.find_by_id("123").is_none());
        assert_eq!(doc.to_xml_string(), "");
    }

    #[test]
    fn test_set_root_replaces_tree() {
        let mut doc = XmlDocument::parse(DOC).unwrap();
        let mut token = Element::new("Token");
        token.set_attribute("Id", "new");
        doc.set_root(token);

        assert!(doc.find_by_id("123").is_none());
        assert_eq!(doc.find_by_id("new").map(Element::name), Some("Token"));
        assert_eq!(doc.to_xml_string(), r#"<Token Id="new"/>"#);
    }

    #[test]
    fn test_parse_error() {
        let err = XmlDocument::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::XmlParse(_)));
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        assert!(matches!(
            XmlDocument::parse_bytes(&[0x3c, 0xff, 0x3e]),
            Err(Error::XmlParse(_))
        ));
    }
}
