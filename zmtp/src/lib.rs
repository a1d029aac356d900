//! # zmtp
//!
//! A minimal client/server implementation of the ZMTP 3.0 wire protocol
//! (the ZeroMQ Transport Protocol) over blocking stream transports, with
//! the NULL security mechanism.
//!
//! This crate covers exactly the handshake and framing: establishing a
//! connected byte stream with a peer, performing the ZMTP/3.0 greeting,
//! and thereafter framing/deframing discrete application messages. It
//! does not implement ZMTP socket semantics (PUB/SUB routing, ROUTER/
//! DEALER identities, fair-queueing); those build on top of a
//! handshaken [`Channel`], not inside it.
//!
//! ```rust,no_run
//! use zmtp::{Channel, Flags, Message};
//!
//! # fn main() -> Result<(), zmtp::ChannelError> {
//! let mut channel = Channel::new();
//! channel.connect_endpoint("tcp://127.0.0.1:5555")?;
//! channel.send(&Message::from_borrowed(Flags::NONE, b"hello"))?;
//! let reply = channel.recv()?;
//! println!("{:?}", reply.data());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::module_name_repetitions)]

mod channel;
pub mod codec;
mod config;
pub mod greeting;
pub mod mechanism;
mod transport;

pub use channel::Channel;
pub use codec::ZmtpError;
pub use config::ChannelConfig;
pub use zmtp_core::endpoint::{Endpoint, EndpointError};
pub use zmtp_core::error::CoreError;
pub use zmtp_core::message::{Flags, Message};

use thiserror::Error;

/// Errors surfaced by [`Channel`] operations.
///
/// Maps onto the five error kinds in the design: `AlreadyConnected` and
/// `Protocol` are distinct variants here; `Endpoint`, `Transport`, and
/// `Io` are carried inside [`CoreError`].
#[derive(Debug, Error)]
pub enum ChannelError {
    /// `connect`/`listen` called on a channel whose stream is already present.
    #[error("channel is already connected")]
    AlreadyConnected,

    /// `send`/`recv` called before the channel has completed a handshake.
    #[error("channel has not completed a handshake")]
    NotHandshaken,

    /// Endpoint parse, transport (dial/bind/listen/accept), or I/O error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Greeting, mechanism, or frame-format violation.
    #[error(transparent)]
    Protocol(#[from] ZmtpError),
}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        Self::Core(CoreError::io(err))
    }
}

impl From<zmtp_core::endpoint::EndpointError> for ChannelError {
    fn from(err: zmtp_core::endpoint::EndpointError) -> Self {
        Self::Core(CoreError::from(err))
    }
}

pub mod prelude {
    pub use crate::{Channel, ChannelConfig, ChannelError, Endpoint, Flags, Message, ZmtpError};
}
