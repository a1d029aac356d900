//! Security mechanism exchange that completes the handshake.
//!
//! Only the NULL mechanism is implemented: a single empty-properties
//! READY command in each direction. The module boundary exists so a
//! CURVE or PLAIN mechanism could be added later without touching
//! [`crate::channel::Channel`]; doing so would also require assigning
//! the `as-server` role properly, which NULL never consults.

pub mod null;

/// Role of this endpoint for handshake purposes.
///
/// NULL ignores this entirely (the `as-server` greeting byte is
/// advertised as `0x00` by both peers and never acted on); it exists so
/// a future mechanism has somewhere to hang role-dependent behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}
