//! Runtime-agnostic building blocks shared by the ZMTP channel layer.
//!
//! This crate deliberately knows nothing about ZMTP itself: it provides the
//! collaborators a channel needs (byte-exact stream I/O, endpoint string
//! parsing, the owned message value, and the shared error type) without any
//! protocol framing logic. That lives in the `zmtp` crate.

#![deny(unsafe_code)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod stream;

pub mod prelude {
    pub use crate::endpoint::Endpoint;
    pub use crate::error::CoreError;
    pub use crate::message::{Flags, Message};
}
