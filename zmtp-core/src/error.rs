//! Error types shared by the stream and endpoint collaborators.
//!
//! The channel layer composes these into its own [`crate` root error]
//! rather than exposing them directly, but they stay public so a caller
//! embedding just the stream-I/O or endpoint helpers can match on them.

use std::io;
use thiserror::Error;

use crate::endpoint::EndpointError;

/// Errors raised by the collaborators in this crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Endpoint string did not match a recognized grammar.
    #[error("endpoint parse error: {0}")]
    Endpoint(#[from] EndpointError),

    /// Dial, bind, listen, or accept failed.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// A read or write failed, or the peer closed before the expected
    /// byte count arrived.
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

/// Result type alias for collaborator operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    #[must_use]
    pub fn transport(err: io::Error) -> Self {
        Self::Transport(err)
    }

    #[must_use]
    pub fn io(err: io::Error) -> Self {
        Self::Io(err)
    }

    /// Whether the underlying I/O error is a transient interruption that
    /// the caller may retry (the stream layer already retries these
    /// internally; this is for callers inspecting a propagated error).
    #[must_use]
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::Io(e) | Self::Transport(e) if e.kind() == io::ErrorKind::Interrupted)
    }
}
