//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use hostsync_config::ConfigError;
use hostsync_core::{CoreError, NetError};

/// Exit codes for process termination.
#[allow(dead_code)]
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const CONNECTION: i32 = 4;
    pub const AUTH: i32 = 5;
    pub const REMOTE: i32 = 6;
    pub const IO: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found")]
    #[diagnostic(
        code(hostsync::no_config),
        help(
            "Expected at: {path}\n\
             Point --config (or HOSTSYNC_CONFIG) at your configuration document."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(hostsync::config),
        help("Fix the document and re-check it with: hostsync config validate")
    )]
    Config(#[from] ConfigError),

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to {endpoint}")]
    #[diagnostic(
        code(hostsync::connection_failed),
        help(
            "Check that the device is powered, reachable, and listening on the\n\
             configured port. Detail: {detail}"
        )
    )]
    ConnectionFailed { endpoint: String, detail: String },

    #[error("Connection to {host} timed out after {seconds:.1}s")]
    #[diagnostic(
        code(hostsync::timeout),
        help("Raise timeouts.long in the configuration or check device responsiveness.")
    )]
    ConnectionTimeout { host: String, seconds: f64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for {username}@{host}")]
    #[diagnostic(
        code(hostsync::auth_failed),
        help("Verify the username and password in the configuration document.")
    )]
    AuthFailed { host: String, username: String },

    // ── Remote operations ────────────────────────────────────────────

    #[error("{host} returned no DHCP pool configuration")]
    #[diagnostic(
        code(hostsync::empty_dhcp),
        help(
            "Check that the switch has `ip dhcp pool` definitions with manual\n\
             `host` bindings, and that the account may run show commands."
        )
    )]
    EmptyDhcp { host: String },

    #[error("SSH session to {host} failed: {detail}")]
    #[diagnostic(code(hostsync::remote))]
    Remote { host: String, detail: String },

    #[error("Post command '{name}' failed: {detail}")]
    #[diagnostic(
        code(hostsync::post_command),
        help("The hosts file was already written; fix the command and re-run, or use --skip-commands.")
    )]
    PostCommand { name: String, detail: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hostsync::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Local I/O ────────────────────────────────────────────────────

    #[error("I/O error on {}: {source}", .path.display())]
    #[diagnostic(code(hostsync::file))]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::ConnectionFailed { .. } | Self::ConnectionTimeout { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::EmptyDhcp { .. } | Self::Remote { .. } | Self::PostCommand { .. } => {
                exit_code::REMOTE
            }
            Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::File { .. } | Self::Io(_) => exit_code::IO,
        }
    }
}

// ── NetError / CoreError mapping ─────────────────────────────────────

impl From<NetError> for CliError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::Connect { host, port, source } => CliError::ConnectionFailed {
                endpoint: format!("{host}:{port}"),
                detail: source.to_string(),
            },
            NetError::Timeout { host, seconds } => {
                CliError::ConnectionTimeout { host, seconds }
            }
            NetError::AuthFailed { host, username } => {
                CliError::AuthFailed { host, username }
            }
            NetError::Protocol { host, source } => CliError::Remote {
                host,
                detail: source.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Net(net) => net.into(),
            CoreError::Io { path, source } => CliError::File { path, source },
            CoreError::EmptyDhcpConfig { host } => CliError::EmptyDhcp { host },
            CoreError::CommandSpawn { name, source } => CliError::PostCommand {
                name,
                detail: source.to_string(),
            },
            CoreError::CommandFailed { name, status } => CliError::PostCommand {
                name,
                detail: status.to_string(),
            },
        }
    }
}
