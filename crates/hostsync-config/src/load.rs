//! The validating loader.
//!
//! Parsing happens in two stages: `serde_yaml` turns the document into a
//! `Value` tree (syntax errors surface as [`ConfigError::Parse`]), then
//! the loader walks the tree field by field. Walking by hand is what
//! buys the error taxonomy -- a derive-based deserialize cannot tell a
//! missing key from a mistyped one, and it cannot ignore unknown keys
//! while still naming the exact field that failed.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_yaml::Value;

use crate::error::ConfigError;
use crate::schema::{
    Commands, Config, DnsConfig, FilePaths, FortinetConfig, LogLevel, LoggingConfig, SshTarget,
    Timeouts, DEFAULT_SSH_PORT,
};
use crate::validate;

impl Config {
    /// Load and validate a configuration document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        doc.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(doc: &str) -> Result<Self, Self::Err> {
        let root: Value = serde_yaml::from_str(doc)?;
        if !root.is_mapping() {
            return Err(ConfigError::TypeMismatch {
                field: "document root".into(),
                expected: "mapping",
                found: kind(&root),
            });
        }

        Ok(Config {
            ssh: load_ssh(section(&root, "ssh")?)?,
            fortinet: load_fortinet(section(&root, "fortinet")?)?,
            dns: load_dns(section(&root, "dns")?)?,
            files: load_files(section(&root, "files")?)?,
            commands: load_commands(section(&root, "commands")?)?,
            timeouts: load_timeouts(section(&root, "timeouts")?)?,
            logging: load_logging(section(&root, "logging")?)?,
        })
    }
}

// ── Section loaders ──────────────────────────────────────────────────

fn load_ssh(ssh: &Value) -> Result<SshTarget, ConfigError> {
    Ok(SshTarget {
        hostname: str_field(ssh, "ssh.hostname")?,
        port: port_field(ssh, "ssh.port")?,
        username: str_field(ssh, "ssh.username")?,
        password: str_field(ssh, "ssh.password")?,
    })
}

fn load_fortinet(fortinet: &Value) -> Result<FortinetConfig, ConfigError> {
    let primary_dns = str_field(fortinet, "fortinet.primary_dns")?;
    let contact = str_field(fortinet, "fortinet.contact")?;
    validate::email("fortinet.contact", &contact)?;

    Ok(FortinetConfig {
        hostname: str_field(fortinet, "fortinet.hostname")?,
        port: port_field(fortinet, "fortinet.port")?,
        username: str_field(fortinet, "fortinet.username")?,
        password: str_field(fortinet, "fortinet.password")?,
        base_name: str_field(fortinet, "fortinet.base_name")?,
        ttl: validate::ttl("fortinet.ttl", int_field(fortinet, "fortinet.ttl")?)?,
        primary_dns: validate::ip_literal("fortinet.primary_dns", &primary_dns)?,
        contact,
    })
}

fn load_dns(dns: &Value) -> Result<DnsConfig, ConfigError> {
    let domain = str_field(dns, "dns.domain")?;
    validate::domain("dns.domain", &domain)?;
    Ok(DnsConfig { domain })
}

fn load_files(files: &Value) -> Result<FilePaths, ConfigError> {
    let existing = str_field(files, "files.existing_host_file")?;
    validate::path("files.existing_host_file", &existing)?;
    let output = str_field(files, "files.output_file")?;
    validate::path("files.output_file", &output)?;

    Ok(FilePaths {
        existing_host_file: PathBuf::from(existing),
        output_file: PathBuf::from(output),
    })
}

fn load_commands(commands: &Value) -> Result<Commands, ConfigError> {
    Ok(Commands {
        chown: str_field(commands, "commands.chown")?,
        chgrp: str_field(commands, "commands.chgrp")?,
        restart: str_field(commands, "commands.restart")?,
    })
}

fn load_timeouts(timeouts: &Value) -> Result<Timeouts, ConfigError> {
    Ok(Timeouts {
        short: seconds_field(timeouts, "timeouts.short")?,
        medium: seconds_field(timeouts, "timeouts.medium")?,
        long: seconds_field(timeouts, "timeouts.long")?,
    })
}

fn load_logging(logging: &Value) -> Result<LoggingConfig, ConfigError> {
    let level = str_field(logging, "logging.level")?;
    let level = LogLevel::from_str(&level).map_err(|_| ConfigError::InvalidValue {
        field: "logging.level".into(),
        reason: format!("unrecognized level '{level}' (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)"),
    })?;
    Ok(LoggingConfig { level })
}

// ── Value helpers ────────────────────────────────────────────────────

/// YAML type name for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// A required top-level section, which must be a mapping.
fn section<'a>(root: &'a Value, name: &'static str) -> Result<&'a Value, ConfigError> {
    match root.get(name) {
        Some(value) if value.is_mapping() => Ok(value),
        Some(value) => Err(ConfigError::TypeMismatch {
            field: name.into(),
            expected: "mapping",
            found: kind(value),
        }),
        None => Err(ConfigError::MissingField { field: name.into() }),
    }
}

/// The key part of a dotted field path.
fn key(field: &str) -> &str {
    field.rsplit('.').next().unwrap_or(field)
}

fn require<'a>(section: &'a Value, field: &str) -> Result<&'a Value, ConfigError> {
    section
        .get(key(field))
        .ok_or_else(|| ConfigError::MissingField {
            field: field.to_owned(),
        })
}

fn str_field(section: &Value, field: &str) -> Result<String, ConfigError> {
    let value = require(section, field)?;
    value
        .as_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| ConfigError::TypeMismatch {
            field: field.to_owned(),
            expected: "string",
            found: kind(value),
        })
}

fn int_field(section: &Value, field: &str) -> Result<i64, ConfigError> {
    let value = require(section, field)?;
    value.as_i64().ok_or_else(|| ConfigError::TypeMismatch {
        field: field.to_owned(),
        expected: "integer",
        found: kind(value),
    })
}

/// `port` is the one field with a default: absent means 22.
fn port_field(section: &Value, field: &str) -> Result<u16, ConfigError> {
    match section.get(key(field)) {
        None => Ok(DEFAULT_SSH_PORT),
        Some(value) => {
            let raw = value.as_i64().ok_or_else(|| ConfigError::TypeMismatch {
                field: field.to_owned(),
                expected: "integer",
                found: kind(value),
            })?;
            validate::port(field, raw)
        }
    }
}

/// Floats for the pacing windows; integer literals widen (`1` -> `1.0`).
fn seconds_field(section: &Value, field: &str) -> Result<f64, ConfigError> {
    let value = require(section, field)?;
    let raw = value.as_f64().ok_or_else(|| ConfigError::TypeMismatch {
        field: field.to_owned(),
        expected: "number",
        found: kind(value),
    })?;
    validate::seconds(field, raw)
}
