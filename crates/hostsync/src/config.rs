//! CLI-owned configuration resolution.
//!
//! Locates the document (flag > env > platform config dir), wraps loader
//! errors for diagnostics, and produces a redacted copy for display.
//! The schema and validation themselves live in `hostsync-config`.

use std::io::ErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;

use hostsync_config::{Config, ConfigError};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const REDACTED: &str = "<redacted>";

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.config {
        return path.clone();
    }
    ProjectDirs::from("net", "hostsync", "hostsync")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("config.yaml"))
}

/// Load and validate the configuration document.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);
    Config::load(&path).map_err(|err| match err {
        ConfigError::Io { ref source, .. } if source.kind() == ErrorKind::NotFound => {
            CliError::NoConfig {
                path: path.display().to_string(),
            }
        }
        other => other.into(),
    })
}

/// Copy of the configuration safe to print.
pub fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    config.ssh.password = REDACTED.into();
    config.fortinet.password = REDACTED.into();
    config
}
