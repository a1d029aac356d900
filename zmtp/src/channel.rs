//! The channel facade: owns one connected stream handle and composes
//! the greeting exchange, NULL mechanism, and frame codec behind a
//! small `connect`/`listen`/`send`/`recv` surface.

use tracing::{debug, warn};
use zmtp_core::endpoint::Endpoint;

use crate::codec;
use crate::config::ChannelConfig;
use crate::greeting;
use crate::mechanism::null;
use crate::transport::{self, StreamHandle};
use crate::{ChannelError, Message};

/// A ZMTP channel: at most one stream handle, handshaken or not.
///
/// Allocated disconnected. `connect_endpoint`/`listen_endpoint` take it
/// to handshaken on success, or leave it disconnected on any failure.
/// The stream is always released before returning an error from those
/// two calls. `send`/`recv` require a handshaken channel; any I/O error
/// from either renders the channel unusable (no automatic reconnect).
pub struct Channel {
    stream: Option<StreamHandle>,
    handshaken: bool,
    config: ChannelConfig,
}

impl Default for Channel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel {
    #[must_use]
    pub fn new() -> Self {
        Self { stream: None, handshaken: false, config: ChannelConfig::default() }
    }

    #[must_use]
    pub fn with_config(config: ChannelConfig) -> Self {
        Self { stream: None, handshaken: false, config }
    }

    #[must_use]
    pub fn is_handshaken(&self) -> bool {
        self.handshaken
    }

    /// Parses `endpoint`, dials it, and runs the greeting + READY
    /// exchange. Fails if already connected, on dial failure, or on
    /// handshake failure; in every failure path the channel is left
    /// disconnected.
    pub fn connect_endpoint(&mut self, endpoint: &str) -> Result<(), ChannelError> {
        if self.stream.is_some() {
            return Err(ChannelError::AlreadyConnected);
        }
        let parsed = Endpoint::parse(endpoint)?;
        debug!(%parsed, "dialing");
        let mut stream = transport::dial(&parsed)?;
        self.run_handshake(&mut stream)?;
        self.stream = Some(stream);
        self.handshaken = true;
        Ok(())
    }

    /// Symmetric to [`Self::connect_endpoint`]: binds, listens, and
    /// accepts exactly one connection, then runs the same handshake.
    pub fn listen_endpoint(&mut self, endpoint: &str) -> Result<(), ChannelError> {
        if self.stream.is_some() {
            return Err(ChannelError::AlreadyConnected);
        }
        let parsed = Endpoint::parse(endpoint)?;
        debug!(%parsed, "accepting");
        let mut stream = transport::listen_once(&parsed)?;
        self.run_handshake(&mut stream)?;
        self.stream = Some(stream);
        self.handshaken = true;
        Ok(())
    }

    fn run_handshake(&self, stream: &mut StreamHandle) -> Result<(), ChannelError> {
        greeting::exchange(stream)?;
        null::exchange(stream, self.config.max_frame_size)?;
        Ok(())
    }

    /// Sends `msg` as a single frame. Requires a handshaken channel; an
    /// I/O error tears the channel down (the caller must `destroy` it).
    pub fn send(&mut self, msg: &Message) -> Result<(), ChannelError> {
        let stream = self.active_stream()?;
        match codec::send(stream, msg) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    /// Receives one frame. Requires a handshaken channel; see [`Self::send`]
    /// for the failure contract.
    pub fn recv(&mut self) -> Result<Message, ChannelError> {
        let max_frame_size = self.config.max_frame_size;
        let stream = self.active_stream()?;
        match codec::recv(stream, max_frame_size) {
            Ok(msg) => Ok(msg),
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    fn active_stream(&mut self) -> Result<&mut StreamHandle, ChannelError> {
        if !self.handshaken {
            return Err(ChannelError::NotHandshaken);
        }
        self.stream.as_mut().ok_or(ChannelError::NotHandshaken)
    }

    fn fail(&mut self) {
        warn!("channel I/O failed; closing");
        self.stream = None;
        self.handshaken = false;
    }

    /// Closes the stream if held and releases all resources.
    pub fn destroy(&mut self) {
        self.stream = None;
        self.handshaken = false;
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.destroy();
    }
}
