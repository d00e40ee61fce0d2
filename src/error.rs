//! Error types for the courier client.
//!
//! Every fallible operation in the crate returns [`Result`], which uses
//! [`ClientError`]. Errors from dispatching a request surface synchronously
//! to the caller; a connection that fails after it has been registered is
//! torn down and logged instead, and its handler is never invoked.

use std::io;

use thiserror::Error;

/// Result type alias using crate [`enum@ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for the crate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request URL could not be parsed, or its scheme is not plain `http`.
    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// TCP connection establishment failed (refused, unreachable, or the
    /// host did not resolve). Not retried.
    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The socket is already present in the poll context.
    #[error("socket is already registered with the poll context")]
    AlreadyRegistered,

    /// The poll context has been closed; no further registrations or polls
    /// are possible.
    #[error("poll context is closed")]
    ContextClosed,

    /// Underlying I/O failure from the socket or the poll syscall.
    #[error(transparent)]
    Io(#[from] io::Error),
}
