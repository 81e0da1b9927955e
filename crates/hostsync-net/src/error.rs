//! Transport error types.

use thiserror::Error;

/// Errors produced by SSH sessions and shells.
#[derive(Debug, Error)]
pub enum NetError {
    /// TCP connect or SSH handshake failed.
    #[error("could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: russh::Error,
    },

    /// The connection attempt did not complete within the deadline.
    #[error("connection to {host} timed out after {seconds:.1}s")]
    Timeout { host: String, seconds: f64 },

    /// The device rejected the supplied username/password.
    #[error("authentication failed for {username}@{host}")]
    AuthFailed { host: String, username: String },

    /// The session dropped or refused a channel operation.
    #[error("SSH protocol error on {host}: {source}")]
    Protocol {
        host: String,
        #[source]
        source: russh::Error,
    },
}
