#![forbid(unsafe_code)]

pub use wsse_core as core;
pub use wsse_token as token;
pub use wsse_xml as xml;

pub use wsse_core::Error;
pub use wsse_token::{configure_context, Context};
