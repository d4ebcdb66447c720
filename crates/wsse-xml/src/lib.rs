#![forbid(unsafe_code)]

//! XML document abstraction for the wsse token model.
//!
//! Provides an owned, mutable element tree built from `roxmltree` parses,
//! plus the writer used to serialize it back to text.

pub mod document;
pub mod element;
pub mod writer;
pub mod xpath;

pub use document::XmlDocument;
pub use element::{Attribute, Element};
pub use writer::XmlWriter;

/// Return roxmltree parsing options that allow DTD.
///
/// roxmltree never expands external entities, so allowing a DTD only
/// enables internal entity definitions.
pub fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}
