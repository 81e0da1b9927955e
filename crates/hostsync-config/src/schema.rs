//! Typed configuration schema.
//!
//! Field names mirror the YAML document exactly; the loader in
//! [`crate::load`] builds these by hand so that every error carries the
//! dotted path of the offending field.

use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use strum::{Display, EnumString};

use hostsync_core::{CommandSet, Pacing, SyncPlan, ZoneSpec};

/// Default SSH port when a target omits `port`.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// The full, validated configuration. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub ssh: SshTarget,
    pub fortinet: FortinetConfig,
    pub dns: DnsConfig,
    pub files: FilePaths,
    pub commands: Commands,
    pub timeouts: Timeouts,
    pub logging: LoggingConfig,
}

/// SSH connection parameters for the Cisco switch.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SshTarget {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SshTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshTarget")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// SSH parameters plus DNS zone metadata for the Fortinet firewall.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct FortinetConfig {
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// dns-database object name on the firewall.
    pub base_name: String,
    /// Record TTL, seconds.
    pub ttl: u32,
    /// SOA primary name server.
    pub primary_dns: IpAddr,
    /// SOA contact mailbox.
    pub contact: String,
}

impl fmt::Debug for FortinetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FortinetConfig")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_name", &self.base_name)
            .field("ttl", &self.ttl)
            .field("primary_dns", &self.primary_dns)
            .field("contact", &self.contact)
            .finish()
    }
}

/// Local resolution domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsConfig {
    pub domain: String,
}

/// Input and output file locations.
///
/// Existence is deliberately not checked at load time -- the static file
/// may appear between runs and the output path is created on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePaths {
    pub existing_host_file: PathBuf,
    pub output_file: PathBuf,
}

/// Post-write shell commands, run verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commands {
    pub chown: String,
    pub chgrp: String,
    pub restart: String,
}

/// Shell pacing windows, seconds.
///
/// `short < medium < long` is the expected shape but is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timeouts {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

/// Logging section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

/// The recognized logging levels, uppercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// The equivalent tracing filter directive.
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl Config {
    /// Serialize back to a YAML document the loader accepts.
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).expect("config serialization should not fail")
    }

    /// Translate into the core's operational plan.
    ///
    /// This is the single boundary where configuration types cross into
    /// `hostsync-core`. Infallible: every rule was enforced at load time.
    pub fn plan(&self) -> SyncPlan {
        SyncPlan {
            switch: hostsync_core::SshTarget {
                host: self.ssh.hostname.clone(),
                port: self.ssh.port,
                username: self.ssh.username.clone(),
                password: SecretString::from(self.ssh.password.clone()),
            },
            firewall: hostsync_core::SshTarget {
                host: self.fortinet.hostname.clone(),
                port: self.fortinet.port,
                username: self.fortinet.username.clone(),
                password: SecretString::from(self.fortinet.password.clone()),
            },
            zone: ZoneSpec {
                database: self.fortinet.base_name.clone(),
                domain: self.dns.domain.clone(),
                ttl: self.fortinet.ttl,
                primary_name: self.fortinet.primary_dns,
                contact: self.fortinet.contact.clone(),
            },
            domain: self.dns.domain.clone(),
            existing_host_file: self.files.existing_host_file.clone(),
            output_file: self.files.output_file.clone(),
            commands: CommandSet {
                chown: self.commands.chown.clone(),
                chgrp: self.commands.chgrp.clone(),
                restart: self.commands.restart.clone(),
            },
            pacing: Pacing {
                short: Duration::from_secs_f64(self.timeouts.short),
                medium: Duration::from_secs_f64(self.timeouts.medium),
                long: Duration::from_secs_f64(self.timeouts.long),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_levels_parse_uppercase_only() {
        assert_eq!("DEBUG".parse::<LogLevel>().ok(), Some(LogLevel::Debug));
        assert_eq!("CRITICAL".parse::<LogLevel>().ok(), Some(LogLevel::Critical));
        assert!("debug".parse::<LogLevel>().is_err());
        assert!("VERBOSE".parse::<LogLevel>().is_err());
    }

    #[test]
    fn log_levels_map_onto_tracing_filters() {
        assert_eq!(LogLevel::Warning.as_filter(), "warn");
        assert_eq!(LogLevel::Critical.as_filter(), "error");
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let target = SshTarget {
            hostname: "sw1.lan".into(),
            port: 22,
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{target:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }
}
