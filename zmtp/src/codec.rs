//! Length-prefixed frame codec: short (1-byte size) and long (8-byte
//! big-endian size) variants, with MORE/LONG/COMMAND flag bits.

use std::io::{Read, Write};

use thiserror::Error;
use zmtp_core::message::{Flags, Message};
use zmtp_core::stream::{recv_all, send_all};

const FLAG_MORE: u8 = 0x01;
const FLAG_LONG: u8 = 0x02;
const FLAG_COMMAND: u8 = 0x04;
const SHORT_FORM_LIMIT: usize = 255;

/// Protocol-level violations detected while decoding a frame or greeting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZmtpError {
    #[error("greeting signature invalid")]
    BadSignature,

    #[error("unsupported protocol major version: {0}")]
    UnsupportedVersion(u8),

    #[error("security mechanism mismatch: peer advertised {0:?}")]
    MechanismMismatch(String),

    #[error("frame size {size} exceeds configured maximum {max}")]
    SizeTooLarge { size: u64, max: usize },

    #[error("frame declared size {size} > 255 with LONG bit clear")]
    ShortFormViolation { size: usize },

    #[error("expected a COMMAND frame during handshake")]
    NotCommand,

    #[error("malformed command body: {0}")]
    Malformed(&'static str),
}

/// Encodes `msg` as a ZMTP frame: flags byte, 1- or 8-byte size, payload.
///
/// The LONG bit is set iff `payload.len() > 255` (canonical encoding:
/// the short form is always used when it fits).
#[must_use]
pub fn encode(msg: &Message) -> Vec<u8> {
    let mut flags = 0u8;
    if msg.more() {
        flags |= FLAG_MORE;
    }
    if msg.is_command() {
        flags |= FLAG_COMMAND;
    }
    let is_long = msg.size() > SHORT_FORM_LIMIT;
    if is_long {
        flags |= FLAG_LONG;
    }

    let mut out = Vec::with_capacity(1 + if is_long { 8 } else { 1 } + msg.size());
    out.push(flags);
    if is_long {
        out.extend_from_slice(&(msg.size() as u64).to_be_bytes());
    } else {
        out.push(msg.size() as u8);
    }
    out.extend_from_slice(msg.data());
    out
}

/// Writes `msg` to `stream` as a single frame.
pub fn send(stream: &mut impl Write, msg: &Message) -> Result<(), crate::ChannelError> {
    send_all(stream, &encode(msg))?;
    Ok(())
}

/// Reads a single frame from `stream` and returns the decoded message.
///
/// `max_frame_size` bounds the declared payload length; a peer claiming
/// a larger size fails the read before any body bytes are consumed.
pub fn recv(stream: &mut impl Read, max_frame_size: usize) -> Result<Message, crate::ChannelError> {
    let header = recv_all(stream, 1)?;
    let flags = header[0];
    let is_long = flags & FLAG_LONG != 0;

    let size = if is_long {
        let bytes = recv_all(stream, 8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(&bytes);
        u64::from_be_bytes(arr)
    } else {
        let bytes = recv_all(stream, 1)?;
        u64::from(bytes[0])
    };

    if !is_long && size as usize > SHORT_FORM_LIMIT {
        // Unreachable with a conforming 1-byte size field (max 255), kept
        // for symmetry with the LONG-bit-cleared protocol violation in §4.4.
        return Err(ZmtpError::ShortFormViolation { size: size as usize }.into());
    }

    if size as usize > max_frame_size {
        return Err(ZmtpError::SizeTooLarge { size, max: max_frame_size }.into());
    }

    let payload = recv_all(stream, size as usize)?;

    let mut out_flags = Flags::NONE;
    if flags & FLAG_MORE != 0 {
        out_flags = out_flags | Flags::MORE;
    }
    if flags & FLAG_COMMAND != 0 {
        out_flags = out_flags | Flags::COMMAND;
    }

    Ok(Message::from_owned(out_flags, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(flags: Flags, payload: &[u8]) -> Message {
        let msg = Message::from_borrowed(flags, payload);
        let encoded = encode(&msg);
        let mut cursor = Cursor::new(encoded);
        recv(&mut cursor, 1 << 20).unwrap()
    }

    #[test]
    fn encode_decode_preserves_flags_and_payload() {
        let out = roundtrip(Flags::MORE, b"hello");
        assert!(out.more());
        assert!(!out.is_command());
        assert_eq!(out.data(), b"hello");
    }

    #[test]
    fn short_form_used_at_boundary() {
        let payload = vec![0u8; 255];
        let msg = Message::from_owned(Flags::NONE, payload);
        let encoded = encode(&msg);
        assert_eq!(encoded[0] & FLAG_LONG, 0);
        assert_eq!(encoded[1], 255);
    }

    #[test]
    fn long_form_used_just_above_boundary() {
        let payload = vec![0u8; 256];
        let msg = Message::from_owned(Flags::NONE, payload);
        let encoded = encode(&msg);
        assert_ne!(encoded[0] & FLAG_LONG, 0);
        assert_eq!(&encoded[1..9], &[0, 0, 0, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn empty_command_message_has_no_payload_bytes() {
        let msg = Message::from_borrowed(Flags::COMMAND, &[]);
        let encoded = encode(&msg);
        assert_eq!(encoded, vec![0x04, 0x00]);
    }

    #[test]
    fn decode_rejects_oversize_frame() {
        let msg = Message::from_owned(Flags::NONE, vec![0u8; 300]);
        let encoded = encode(&msg);
        let mut cursor = Cursor::new(encoded);
        let err = recv(&mut cursor, 100).unwrap_err();
        assert!(matches!(err, crate::ChannelError::Protocol(ZmtpError::SizeTooLarge { .. })));
    }

    #[test]
    fn decode_fails_on_truncated_stream() {
        let mut cursor = Cursor::new(vec![0x00, 0x05, b'h', b'i']);
        assert!(recv(&mut cursor, 1 << 20).is_err());
    }

    #[test]
    fn big_endian_size_round_trips_large_values() {
        for n in [0u64, 1, 65535, 65536, 1 << 40] {
            let bytes = n.to_be_bytes();
            assert_eq!(u64::from_be_bytes(bytes), n);
        }
    }
}
