//! Core error type.

use std::path::PathBuf;

use thiserror::Error;

use hostsync_net::NetError;

/// Errors from the sync pipeline.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport-level failure (connect, auth, channel).
    #[error(transparent)]
    Net(#[from] NetError),

    /// Reading or writing a local file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The switch answered but produced no DHCP pool configuration.
    #[error("{host} returned no DHCP pool configuration")]
    EmptyDhcpConfig { host: String },

    /// A post command could not be spawned at all.
    #[error("post command '{name}' could not be started: {source}")]
    CommandSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A post command ran and exited non-zero.
    #[error("post command '{name}' failed with {status}")]
    CommandFailed {
        name: String,
        status: std::process::ExitStatus,
    },
}
