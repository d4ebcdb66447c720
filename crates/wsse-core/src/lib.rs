#![forbid(unsafe_code)]

//! Shared error type and WS-Security vocabulary.

pub mod error;
pub mod ns;
pub mod profile;

pub use error::Error;
