#![forbid(unsafe_code)]

//! Resolution context: the document being processed, its namespace prefix
//! bindings and the node constructor registry.
//!
//! A context is owned by the caller and passed by reference through every
//! `load_xml` / `get_xml` / `x509_certificate` call.  It is mutated only
//! while being set up.

use crate::node::XmlNode;
use log::{debug, trace};
use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use wsse_core::Error;
use wsse_xml::{Element, XmlDocument};

/// Factory producing an empty node for a registered (namespace, tag) pair.
pub type Constructor = fn(&Context) -> Result<Box<dyn XmlNode>, Error>;

/// Maximum number of nested `Reference` dereferences in one certificate query.
pub const MAX_REFERENCE_DEPTH: usize = 16;

/// Context for parsing, rendering and resolving WS-Security nodes.
#[derive(Default)]
pub struct Context {
    document: XmlDocument,
    /// prefix → namespace URI
    prefixes: BTreeMap<String, String>,
    /// namespace URI → prefix
    uris: HashMap<String, String>,
    constructors: HashMap<(String, String), Constructor>,
    reference_depth: Cell<usize>,
}

impl Context {
    /// Create a context over the given document.
    pub fn new(document: XmlDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The document used for same-document reference lookups.
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut XmlDocument {
        &mut self.document
    }

    pub fn set_document(&mut self, document: XmlDocument) {
        self.document = document;
    }

    /// Bind `prefix` to `uri`.
    ///
    /// Both directions are kept one-to-one: re-binding a prefix drops its
    /// old URI, and binding a URI to a new prefix drops the old prefix.
    pub fn set_namespace_prefix(&mut self, prefix: &str, uri: &str) {
        if let Some(old_prefix) = self.uris.insert(uri.to_owned(), prefix.to_owned()) {
            if old_prefix != prefix {
                self.prefixes.remove(&old_prefix);
            }
        }
        if let Some(old_uri) = self.prefixes.insert(prefix.to_owned(), uri.to_owned()) {
            if old_uri != uri && self.uris.get(&old_uri).map(String::as_str) == Some(prefix) {
                self.uris.remove(&old_uri);
            }
        }
        trace!("bound namespace prefix {prefix} -> {uri}");
    }

    /// Prefix currently bound to `uri`.
    pub fn namespace_prefix(&self, uri: &str) -> Option<&str> {
        self.uris.get(uri).map(String::as_str)
    }

    /// Namespace URI currently bound to `prefix`.
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// All bindings as (prefix, uri), ordered by prefix.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    /// Namespace URI of an element: the one it was parsed or built with,
    /// otherwise whatever this context binds to its prefix.
    pub fn element_namespace<'a>(&'a self, el: &'a Element) -> Option<&'a str> {
        el.namespace()
            .or_else(|| self.namespace_uri(el.prefix().unwrap_or("")))
    }

    /// Namespace URI of an element as seen through this context's prefix
    /// bindings.  The element's own namespace is used only when its prefix
    /// is unbound here.
    pub fn prefix_namespace<'a>(&'a self, el: &'a Element) -> Option<&'a str> {
        self.namespace_uri(el.prefix().unwrap_or(""))
            .or_else(|| el.namespace())
    }

    /// Register a constructor for elements named `name` in `namespace`.
    /// Registering the same key again replaces the previous constructor.
    pub fn register_type_constructor(&mut self, namespace: &str, name: &str, ctor: Constructor) {
        debug!("registering type constructor for {{{namespace}}}{name}");
        self.constructors
            .insert((namespace.to_owned(), name.to_owned()), ctor);
    }

    /// Look up the constructor registered for (`namespace`, `name`).
    pub fn type_constructor(&self, namespace: &str, name: &str) -> Result<Constructor, Error> {
        self.constructors
            .get(&(namespace.to_owned(), name.to_owned()))
            .copied()
            .ok_or_else(|| Error::NoTypeConstructor {
                namespace: namespace.to_owned(),
                name: name.to_owned(),
            })
    }

    /// Construct an empty node for (`namespace`, `name`).
    pub fn construct(&self, namespace: &str, name: &str) -> Result<Box<dyn XmlNode>, Error> {
        let ctor = self.type_constructor(namespace, name)?;
        ctor(self)
    }

    /// Number of registered constructors.
    pub fn constructor_count(&self) -> usize {
        self.constructors.len()
    }

    /// Track one level of reference dereferencing.  The returned guard
    /// releases the level when dropped.
    pub(crate) fn enter_reference(&self, uri: &str) -> Result<ReferenceGuard<'_>, Error> {
        let depth = self.reference_depth.get();
        if depth >= MAX_REFERENCE_DEPTH {
            return Err(Error::ReferenceDepthExceeded(uri.to_owned()));
        }
        self.reference_depth.set(depth + 1);
        Ok(ReferenceGuard { ctx: self })
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut constructors: Vec<String> = self
            .constructors
            .keys()
            .map(|(ns, name)| format!("{{{ns}}}{name}"))
            .collect();
        constructors.sort();
        f.debug_struct("Context")
            .field("prefixes", &self.prefixes)
            .field("constructors", &constructors)
            .finish_non_exhaustive()
    }
}

/// Releases one reference level on drop.
pub(crate) struct ReferenceGuard<'a> {
    ctx: &'a Context,
}

impl Drop for ReferenceGuard<'_> {
    fn drop(&mut self) {
        let depth = self.ctx.reference_depth.get();
        self.ctx.reference_depth.set(depth.saturating_sub(1));
    }
}
