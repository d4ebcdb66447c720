#![forbid(unsafe_code)]

//! Minimal XPath subset for reference resolution.
//!
//! Only supports the patterns the token model needs:
//! - Same-document URI references: `#id-value`
//! - Attribute-equality predicates: `@Id='value'`

use crate::element::Element;

/// Parse a same-document reference (e.g., `#foo` → `foo`).
pub fn parse_same_document_ref(uri: &str) -> Option<&str> {
    uri.strip_prefix('#')
}

/// An `@name='value'` predicate.
///
/// An unprefixed `name` matches the attribute's local part under any
/// prefix, so `@Id` matches both `Id` and `wsu:Id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPredicate<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> AttrPredicate<'a> {
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }

    /// Parse `@name='value'` or `@name="value"`.
    pub fn parse(expr: &'a str) -> Option<Self> {
        let rest = expr.trim().strip_prefix('@')?;
        let (name, quoted) = rest.split_once('=')?;
        let quote = quoted.chars().next().filter(|c| *c == '\'' || *c == '"')?;
        let value = quoted.strip_prefix(quote)?.strip_suffix(quote)?;
        Some(Self {
            name: name.trim(),
            value,
        })
    }

    /// Whether `el` carries a matching attribute.
    pub fn matches(&self, el: &Element) -> bool {
        if self.name.contains(':') {
            return el.attribute(self.name) == Some(self.value);
        }
        el.attributes().iter().any(|a| {
            let local = a.name.rsplit_once(':').map_or(a.name.as_str(), |(_, l)| l);
            local == self.name && a.value == self.value && !a.name.starts_with("xmlns")
        })
    }
}
