//! Interleaved ZMTP 3.0 greeting exchange.
//!
//! The greeting is not sent as one 64-byte block: a peer speaking ZMTP
//! ≤ 2 never emits a full v3 greeting, so v3 peers exchange signature
//! plus the major-version byte first, and only commit the remaining 53
//! bytes once both sides have confirmed a compatible major version.
//! Batching the full 64 bytes into a single write would break that
//! early-detection path and is never done here.

use std::io::{Read, Write};

use zmtp_core::stream::{recv_all, send_all};

use crate::codec::ZmtpError;
use crate::ChannelError;

/// Total greeting length on the wire.
pub const GREETING_SIZE: usize = 64;

const SIGNATURE: [u8; 10] = [0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x7F];
const VERSION_MAJOR: u8 = 0x03;
const VERSION_MINOR: u8 = 0x00;
const MECHANISM_FIELD_LEN: usize = 20;
const MECHANISM_NAME: &str = "NULL";

fn mechanism_field() -> [u8; MECHANISM_FIELD_LEN] {
    let mut field = [0u8; MECHANISM_FIELD_LEN];
    field[..MECHANISM_NAME.len()].copy_from_slice(MECHANISM_NAME.as_bytes());
    field
}

/// The peer's greeting fields once the 64-byte exchange is complete.
#[derive(Debug, Clone)]
pub struct PeerGreeting {
    pub minor: u8,
    pub mechanism: [u8; MECHANISM_FIELD_LEN],
    pub as_server: u8,
}

impl PeerGreeting {
    /// The mechanism field trimmed of trailing NUL padding, as ASCII.
    #[must_use]
    pub fn mechanism_name(&self) -> String {
        let end = self.mechanism.iter().position(|&b| b == 0).unwrap_or(self.mechanism.len());
        String::from_utf8_lossy(&self.mechanism[..end]).into_owned()
    }
}

/// Runs the interleaved signature/version/mechanism exchange.
///
/// Aborts as soon as an I/O error or protocol violation occurs; the
/// caller tears down the stream on any `Err`.
pub fn exchange(stream: &mut (impl Read + Write)) -> Result<PeerGreeting, ChannelError> {
    // Step 1: send our signature.
    send_all(stream, &SIGNATURE)?;

    // Step 2: first signature byte.
    let first = recv_all(stream, 1)?;
    if first[0] != 0xFF {
        return Err(ZmtpError::BadSignature.into());
    }

    // Step 3: remaining nine signature bytes.
    let rest = recv_all(stream, 9)?;
    if rest[8] & 0x01 != 1 {
        return Err(ZmtpError::BadSignature.into());
    }

    // Step 4: send our major version.
    send_all(stream, &[VERSION_MAJOR])?;

    // Step 5: peer major version.
    let major = recv_all(stream, 1)?;
    if major[0] != VERSION_MAJOR {
        return Err(ZmtpError::UnsupportedVersion(major[0]).into());
    }

    // Step 6: send the rest of our greeting, in order: minor, mechanism,
    // as-server, filler, as one write.
    let mut tail = Vec::with_capacity(GREETING_SIZE - 11);
    tail.push(VERSION_MINOR);
    tail.extend_from_slice(&mechanism_field());
    tail.push(0x00); // as-server
    tail.extend_from_slice(&[0u8; 31]); // filler
    send_all(stream, &tail)?;

    // Step 7: receive the peer's rest of greeting in the same order.
    let peer_tail = recv_all(stream, GREETING_SIZE - 11)?;
    let minor = peer_tail[0];
    let mut mechanism = [0u8; MECHANISM_FIELD_LEN];
    mechanism.copy_from_slice(&peer_tail[1..1 + MECHANISM_FIELD_LEN]);
    let as_server = peer_tail[1 + MECHANISM_FIELD_LEN];

    let greeting = PeerGreeting { minor, mechanism, as_server };

    // Step 8: the mechanism must be NULL, the only one we speak.
    if greeting.mechanism_name() != MECHANISM_NAME {
        return Err(ZmtpError::MechanismMismatch(greeting.mechanism_name()).into());
    }

    Ok(greeting)
}
