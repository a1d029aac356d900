//! NULL mechanism: a single READY command exchanged in each direction,
//! with no properties, the only mechanism this crate implements.

use std::io::{Read, Write};

use zmtp_core::message::{Flags, Message};

use crate::codec::{self, ZmtpError};
use crate::ChannelError;

/// READY command name, length-prefixed per the command-frame convention
/// (a leading byte giving the name's length, then the ASCII name).
const READY_BODY: [u8; 6] = [0x05, b'R', b'E', b'A', b'D', b'Y'];

/// Sends our READY command, then receives and validates the peer's.
///
/// No property parsing is attempted for NULL: a command frame's body is
/// accepted as long as the COMMAND bit is set; the body is discarded.
pub fn exchange(stream: &mut (impl Read + Write), max_frame_size: usize) -> Result<(), ChannelError> {
    let ready = Message::from_borrowed(Flags::COMMAND, &READY_BODY);
    codec::send(stream, &ready)?;

    let reply = codec::recv(stream, max_frame_size)?;
    if !reply.is_command() {
        return Err(ZmtpError::NotCommand.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Loopback {
        inbound: Cursor<Vec<u8>>,
        outbound: Vec<u8>,
    }

    impl Read for Loopback {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inbound.read(buf)
        }
    }

    impl Write for Loopback {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.outbound.write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sends_canonical_ready_frame() {
        let peer_ready = codec::encode(&Message::from_borrowed(Flags::COMMAND, &READY_BODY));
        let mut lb = Loopback { inbound: Cursor::new(peer_ready), outbound: Vec::new() };
        exchange(&mut lb, 1 << 20).unwrap();
        assert_eq!(lb.outbound, vec![0x04, 0x06, 0x05, b'R', b'E', b'A', b'D', b'Y']);
    }

    #[test]
    fn rejects_data_frame_in_place_of_ready() {
        let data = codec::encode(&Message::from_borrowed(Flags::NONE, b"not a command"));
        let mut lb = Loopback { inbound: Cursor::new(data), outbound: Vec::new() };
        let err = exchange(&mut lb, 1 << 20).unwrap_err();
        assert!(matches!(err, ChannelError::Protocol(ZmtpError::NotCommand)));
    }
}
