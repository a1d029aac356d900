//! Concrete stream handles for the two endpoint schemes the channel
//! facade understands. This is the "socket acquisition" collaborator:
//! dial/listen/accept primitives, kept separate from the greeting and
//! frame codec that make up the protocol-critical core.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};

#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};

use zmtp_core::endpoint::Endpoint;
use zmtp_core::error::CoreError;

/// A connected stream, abstracting over the TCP and IPC transports.
pub enum StreamHandle {
    Tcp(TcpStream),
    #[cfg(unix)]
    Ipc(UnixStream),
}

impl Read for StreamHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.read(buf),
            #[cfg(unix)]
            Self::Ipc(s) => s.read(buf),
        }
    }
}

impl Write for StreamHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(s) => s.write(buf),
            #[cfg(unix)]
            Self::Ipc(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(s) => s.flush(),
            #[cfg(unix)]
            Self::Ipc(s) => s.flush(),
        }
    }
}

/// Blocking connect to `endpoint`.
pub fn dial(endpoint: &Endpoint) -> Result<StreamHandle, CoreError> {
    match endpoint {
        Endpoint::Tcp { .. } => {
            let addr = endpoint.tcp_address().expect("tcp endpoint has an address");
            let stream = TcpStream::connect(&addr).map_err(CoreError::transport)?;
            stream.set_nodelay(true).map_err(CoreError::transport)?;
            Ok(StreamHandle::Tcp(stream))
        }
        #[cfg(unix)]
        Endpoint::Ipc(path) => {
            let stream = UnixStream::connect(path).map_err(CoreError::transport)?;
            Ok(StreamHandle::Ipc(stream))
        }
        #[cfg(not(unix))]
        Endpoint::Ipc(_) => Err(CoreError::transport(io::Error::new(
            io::ErrorKind::Unsupported,
            "ipc transport requires a unix platform",
        ))),
    }
}

/// Bind, listen, and accept exactly one connection on `endpoint`.
pub fn listen_once(endpoint: &Endpoint) -> Result<StreamHandle, CoreError> {
    match endpoint {
        Endpoint::Tcp { .. } => {
            let addr = endpoint.tcp_address().expect("tcp endpoint has an address");
            let listener = TcpListener::bind(&addr).map_err(CoreError::transport)?;
            let (stream, _peer) = listener.accept().map_err(CoreError::transport)?;
            stream.set_nodelay(true).map_err(CoreError::transport)?;
            Ok(StreamHandle::Tcp(stream))
        }
        #[cfg(unix)]
        Endpoint::Ipc(path) => {
            let _ = std::fs::remove_file(path);
            let listener = UnixListener::bind(path).map_err(CoreError::transport)?;
            let (stream, _) = listener.accept().map_err(CoreError::transport)?;
            Ok(StreamHandle::Ipc(stream))
        }
        #[cfg(not(unix))]
        Endpoint::Ipc(_) => Err(CoreError::transport(io::Error::new(
            io::ErrorKind::Unsupported,
            "ipc transport requires a unix platform",
        ))),
    }
}
