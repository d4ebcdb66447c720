#![forbid(unsafe_code)]

//! XML writing on top of uppsala's XmlWriter.

use crate::element::Element;

/// A simple XML writer wrapping uppsala's XmlWriter.
///
/// Element and attribute names are written as given; callers pass
/// qualified names (`wsse:Reference`, `wsu:Id`).  Escaping of text and
/// attribute values is left to uppsala.
pub struct XmlWriter {
    writer: uppsala::XmlWriter,
}

impl XmlWriter {
    /// Create a new XML writer.
    pub fn new() -> Self {
        Self {
            writer: uppsala::XmlWriter::new(),
        }
    }

    /// Start an element with the given name and attributes.
    pub fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.writer.start_element(name, attrs);
    }

    /// Write an empty element (self-closing).
    pub fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.writer.empty_element(name, attrs);
    }

    /// End the current element.
    pub fn end_element(&mut self, name: &str) {
        self.writer.end_element(name);
    }

    /// Write text content.
    pub fn write_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.writer.text(text);
        }
    }

    /// Write an element and its subtree.
    pub fn write_element(&mut self, el: &Element) {
        let name = el.qualified_name();
        let attrs: Vec<(&str, &str)> = el
            .attributes()
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect();

        if el.text().is_empty() && el.children().is_empty() {
            self.empty_element(&name, &attrs);
            return;
        }

        self.start_element(&name, &attrs);
        self.write_text(el.text());
        for child in el.children() {
            self.write_element(child);
            self.write_text(child.tail());
        }
        self.end_element(&name);
    }

    /// Finish writing and return the XML as a string.
    pub fn into_string(self) -> String {
        self.writer.into_string()
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_elements() {
        let mut w = XmlWriter::new();
        w.start_element("wsse:SecurityTokenReference", &[("Usage", "sign")]);
        w.empty_element("wsse:Reference", &[("URI", "#x")]);
        w.end_element("wsse:SecurityTokenReference");
        assert_eq!(
            w.into_string(),
            r##"<wsse:SecurityTokenReference Usage="sign"><wsse:Reference URI="#x"/></wsse:SecurityTokenReference>"##
        );
    }

    #[test]
    fn test_write_element_with_text_and_tail() {
        let mut root = Element::new("a");
        let mut b = Element::new("b");
        b.set_text("1 < 2");
        b.set_tail("\n");
        root.append_child(b);
        root.append_child(Element::new("c"));

        let mut w = XmlWriter::new();
        w.write_element(&root);
        assert_eq!(w.into_string(), "<a><b>1 &lt; 2</b>\n<c/></a>");
    }

    #[test]
    fn test_write_escapes_markup() {
        let mut el = Element::new("t");
        el.set_attribute("v", "a&b\"c<");
        el.set_text("x & y");

        let mut w = XmlWriter::new();
        w.write_element(&el);
        let out = w.into_string();
        assert!(out.contains("a&amp;b"), "{out}");
        assert!(out.contains("x &amp; y"), "{out}");

        let doc = crate::XmlDocument::parse(&out).unwrap();
        let root = doc.root().unwrap();
        assert_eq!(root.attribute("v"), Some("a&b\"c<"));
        assert_eq!(root.text(), "x & y");
    }
}
