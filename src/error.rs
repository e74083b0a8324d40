//! Error types for server startup and request streaming.

use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Fatal and per-connection errors.
///
/// A missing file is not represented here: it is recovered inside the request
/// handler and turned into a 404 response. Shutdown-related accept failures
/// are suppressed by the accept loop and never reach callers either.
#[derive(Debug)]
pub enum Error {
    /// The listen address could not be bound.
    Bind { addr: SocketAddr, source: io::Error },
    /// The listen URL prefix could not be parsed or resolved.
    InvalidPrefix { prefix: String, reason: String },
    /// File I/O failed after the request path had already resolved.
    ///
    /// Surfaces to the client as an abruptly closed connection; there is no
    /// structured error body and the request is not retried.
    Stream(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => {
                write!(f, "failed to bind {addr}: {source}")
            }
            Self::InvalidPrefix { prefix, reason } => {
                write!(f, "invalid listen prefix '{prefix}': {reason}")
            }
            Self::Stream(err) => write!(f, "file stream failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } | Self::Stream(source) => Some(source),
            Self::InvalidPrefix { .. } => None,
        }
    }
}
