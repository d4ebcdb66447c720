#![forbid(unsafe_code)]

//! WS-Security token object model.
//!
//! Typed nodes for `BinarySecurityToken`, `Reference` and
//! `SecurityTokenReference`, dispatched by (namespace, tag) through the
//! constructor registry held by a [`Context`], and chained together to
//! extract an X.509 certificate.

pub mod binary_security_token;
pub mod context;
pub mod node;
pub mod provider;
pub mod reference;
pub mod security_token_reference;
pub mod wsu_id;

#[cfg(test)]
mod test_support;

pub use binary_security_token::{new_binary_security_token_node, BinarySecurityToken};
pub use context::{Constructor, Context, MAX_REFERENCE_DEPTH};
pub use node::{new_element, render, validate_element, XmlNode};
pub use provider::{certificate_provider, X509CertificateProvider};
pub use reference::{new_reference_node, Reference};
pub use security_token_reference::{new_security_token_reference_node, SecurityTokenReference};
pub use wsu_id::{get_wsu_id, set_wsu_id};

use wsse_core::ns;

/// Bind the conventional `wsu`, `wsse` and `wsse11` prefixes and register
/// the three wsse node constructors.
///
/// Safe to call more than once; later calls overwrite with the same values.
pub fn configure_context(ctx: &mut Context) {
    ctx.set_namespace_prefix(ns::prefix::WSU, ns::WSU);
    ctx.set_namespace_prefix(ns::prefix::WSSE, ns::WSSE);
    ctx.set_namespace_prefix(ns::prefix::WSSE11, ns::WSSE11);

    ctx.register_type_constructor(
        ns::WSSE,
        ns::node::BINARY_SECURITY_TOKEN,
        new_binary_security_token_node,
    );
    ctx.register_type_constructor(ns::WSSE, ns::node::REFERENCE, new_reference_node);
    ctx.register_type_constructor(
        ns::WSSE,
        ns::node::SECURITY_TOKEN_REFERENCE,
        new_security_token_reference_node,
    );
}
