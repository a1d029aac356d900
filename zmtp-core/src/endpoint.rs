//! Endpoint string parsing.
//!
//! Recognizes the two transport schemes the channel facade dials or
//! listens on. This module only parses the string; dialing and accepting
//! the connection is the channel's job (see `zmtp::channel`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// A parsed transport endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `tcp://<address>:<port>`. `<address>` may itself contain colons
    /// (e.g. a bracketless IPv6 literal); the port is everything after
    /// the *last* colon.
    Tcp { host: String, port: u16 },
    /// `ipc://<path>`, a Unix domain socket path.
    Ipc(PathBuf),
}

impl Endpoint {
    pub fn parse(s: &str) -> Result<Self, EndpointError> {
        s.parse()
    }

    /// The `host:port` form accepted by `std::net::TcpStream::connect`.
    #[must_use]
    pub fn tcp_address(&self) -> Option<String> {
        match self {
            Self::Tcp { host, port } => Some(format!("{host}:{port}")),
            Self::Ipc(_) => None,
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("ipc://") {
            if rest.is_empty() {
                return Err(EndpointError::InvalidIpcPath(s.to_string()));
            }
            return Ok(Self::Ipc(PathBuf::from(rest)));
        }

        if let Some(rest) = s.strip_prefix("tcp://") {
            let colon = rest.rfind(':').ok_or_else(|| EndpointError::MissingPort(s.to_string()))?;
            let (host, port_str) = (&rest[..colon], &rest[colon + 1..]);
            if host.is_empty() {
                return Err(EndpointError::InvalidTcpAddress(s.to_string()));
            }
            let port = port_str
                .parse::<u16>()
                .map_err(|_| EndpointError::InvalidPort(port_str.to_string()))?;
            return Ok(Self::Tcp { host: host.to_string(), port });
        }

        Err(EndpointError::UnknownScheme(s.to_string()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "tcp://{host}:{port}"),
            Self::Ipc(path) => write!(f, "ipc://{}", path.display()),
        }
    }
}

/// Errors raised while parsing an endpoint string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("unrecognized endpoint scheme: {0} (expected tcp:// or ipc://)")]
    UnknownScheme(String),

    #[error("tcp endpoint missing port (no colon found): {0}")]
    MissingPort(String),

    #[error("invalid tcp address: {0}")]
    InvalidTcpAddress(String),

    #[error("invalid tcp port: {0}")]
    InvalidPort(String),

    #[error("invalid ipc path: {0}")]
    InvalidIpcPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tcp_ipv4() {
        let ep = Endpoint::parse("tcp://127.0.0.1:5555").unwrap();
        assert_eq!(ep, Endpoint::Tcp { host: "127.0.0.1".into(), port: 5555 });
        assert_eq!(ep.tcp_address().as_deref(), Some("127.0.0.1:5555"));
    }

    #[test]
    fn splits_on_last_colon_for_bracketless_ipv6() {
        // Ambiguous per design, but the grammar is unambiguous: split on
        // the last colon regardless of how many precede it.
        let ep = Endpoint::parse("tcp://::1:5555").unwrap();
        assert_eq!(ep, Endpoint::Tcp { host: "::1".into(), port: 5555 });
    }

    #[test]
    fn parses_ipc() {
        let ep = Endpoint::parse("ipc:///tmp/test.sock").unwrap();
        assert_eq!(ep, Endpoint::Ipc(PathBuf::from("/tmp/test.sock")));
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(matches!(
            Endpoint::parse("tcp://localhost"),
            Err(EndpointError::MissingPort(_))
        ));
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(matches!(
            Endpoint::parse("http://127.0.0.1:5555"),
            Err(EndpointError::UnknownScheme(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(matches!(
            Endpoint::parse("tcp://127.0.0.1:http"),
            Err(EndpointError::InvalidPort(_))
        ));
    }

    #[test]
    fn display_round_trips_tcp() {
        let ep = Endpoint::parse("tcp://127.0.0.1:5555").unwrap();
        assert_eq!(ep.to_string(), "tcp://127.0.0.1:5555");
    }
}
