//! Loop-until-complete send/recv over a connected, blocking byte stream.
//!
//! These are generic over anything implementing [`std::io::Read`] /
//! [`std::io::Write`] so the channel layer is not tied to a concrete
//! transport: `TcpStream`, `UnixStream`, or a test double all work.
//! There is no timeout here: the stream is assumed blocking, and callers
//! that need cancellation close the handle out-of-band.

use std::io::{self, ErrorKind, Read, Write};

use tracing::trace;

use crate::error::CoreError;

/// Classifies a transient, retryable interruption (`EINTR`).
#[must_use]
pub fn is_interrupt(err: &io::Error) -> bool {
    err.kind() == ErrorKind::Interrupted
}

/// Writes exactly `buf.len()` bytes, retrying on `EINTR` and failing on
/// any other error.
pub fn send_all(stream: &mut impl Write, buf: &[u8]) -> Result<(), CoreError> {
    let mut sent = 0;
    while sent < buf.len() {
        match stream.write(&buf[sent..]) {
            Ok(0) => return Err(CoreError::io(io::Error::new(ErrorKind::WriteZero, "write returned 0"))),
            Ok(n) => sent += n,
            Err(e) if is_interrupt(&e) => {
                trace!("send interrupted, retrying");
                continue;
            }
            Err(e) => return Err(CoreError::io(e)),
        }
    }
    Ok(())
}

/// Reads exactly `len` bytes, retrying on `EINTR`. An orderly peer close
/// observed before `len` bytes have arrived is an error, never a short
/// read returned as success.
pub fn recv_all(stream: &mut impl Read, len: usize) -> Result<Vec<u8>, CoreError> {
    let mut buf = vec![0u8; len];
    let mut read = 0;
    while read < len {
        match stream.read(&mut buf[read..]) {
            Ok(0) => {
                return Err(CoreError::io(io::Error::new(
                    ErrorKind::UnexpectedEof,
                    "peer closed before expected byte count arrived",
                )))
            }
            Ok(n) => read += n,
            Err(e) if is_interrupt(&e) => {
                trace!("recv interrupted, retrying");
                continue;
            }
            Err(e) => return Err(CoreError::io(e)),
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// A reader that yields bytes one at a time and injects a single
    /// `EINTR` before the final byte, mimicking a signal during recv.
    struct Flaky {
        data: Vec<u8>,
        pos: usize,
        interrupted_once: bool,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos == self.data.len() - 1 && !self.interrupted_once {
                self.interrupted_once = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.data.len() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn recv_all_retries_on_eintr() {
        let mut r = Flaky { data: vec![1, 2, 3], pos: 0, interrupted_once: false };
        let out = recv_all(&mut r, 3).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn recv_all_fails_on_short_read() {
        let mut r = Cursor::new(vec![1, 2]);
        let err = recv_all(&mut r, 5).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn send_all_writes_everything() {
        let mut out = Vec::new();
        send_all(&mut out, b"hello").unwrap();
        assert_eq!(out, b"hello");
    }
}
