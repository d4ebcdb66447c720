#![forbid(unsafe_code)]

//! `wsu:Id` attribute access.
//!
//! The attribute is always qualified with the prefix the context binds to
//! the wsu namespace at the time of the call, so documents that use `u:Id`
//! (or any other prefix) work once the context is told about it.

use crate::context::Context;
use wsse_core::ns;
use wsse_xml::Element;

/// Qualified name of the Id attribute under the current wsu binding.
pub fn wsu_id_name(ctx: &Context) -> String {
    let prefix = ctx.namespace_prefix(ns::WSU).unwrap_or(ns::prefix::WSU);
    format!("{prefix}:{}", ns::attr::ID)
}

/// Read the wsu:Id of `el`; empty when absent.
pub fn get_wsu_id(ctx: &Context, el: &Element) -> String {
    el.attribute(&wsu_id_name(ctx))
        .unwrap_or_default()
        .to_owned()
}

/// Write (or overwrite) the wsu:Id of `el`.
pub fn set_wsu_id(ctx: &Context, el: &mut Element, id: &str) {
    el.set_attribute(&wsu_id_name(ctx), id);
}
