//! Loader contract tests: value fidelity, defaults, the error taxonomy,
//! and the serialize/reload round trip.
#![allow(clippy::float_cmp)]

use std::io::Write as _;
use std::str::FromStr;

use pretty_assertions::assert_eq;

use hostsync_config::{Config, ConfigError, LogLevel};

const VALID_DOC: &str = "\
ssh:
  hostname: switch.lan.example.net
  port: 8022
  username: automation
  password: switch-secret
fortinet:
  hostname: firewall.lan.example.net
  port: 22
  username: admin
  password: fw-secret
  base_name: lan-zone
  ttl: 300
  primary_dns: 10.0.2.53
  contact: hostmaster@example.net
dns:
  domain: lan.example.net
files:
  existing_host_file: /etc/hostsync/static-hosts
  output_file: /etc/pihole/custom.list
commands:
  chown: chown pihole /etc/pihole/custom.list
  chgrp: chgrp pihole /etc/pihole/custom.list
  restart: systemctl restart pihole-FTL
timeouts:
  short: 0.2
  medium: 0.5
  long: 1
logging:
  level: INFO
";

fn valid_config() -> Config {
    Config::from_str(VALID_DOC).expect("valid document loads")
}

/// Drop every line carrying `key:` from the document.
fn without_line(doc: &str, key: &str) -> String {
    doc.lines()
        .filter(|line| !line.trim_start().starts_with(&format!("{key}:")))
        .map(|line| format!("{line}\n"))
        .collect()
}

/// Replace the whole line carrying `key:` with `replacement`.
fn with_line(doc: &str, key: &str, replacement: &str) -> String {
    doc.lines()
        .map(|line| {
            if line.trim_start().starts_with(&format!("{key}:")) {
                format!("{replacement}\n")
            } else {
                format!("{line}\n")
            }
        })
        .collect()
}

// ── Happy path ──────────────────────────────────────────────────────

#[test]
fn loaded_values_equal_the_parsed_literals() {
    let config = valid_config();

    assert_eq!(config.ssh.hostname, "switch.lan.example.net");
    assert_eq!(config.ssh.port, 8022);
    assert_eq!(config.ssh.username, "automation");
    assert_eq!(config.ssh.password, "switch-secret");

    assert_eq!(config.fortinet.base_name, "lan-zone");
    assert_eq!(config.fortinet.ttl, 300);
    assert_eq!(
        config.fortinet.primary_dns,
        "10.0.2.53".parse::<std::net::IpAddr>().expect("ip")
    );
    assert_eq!(config.fortinet.contact, "hostmaster@example.net");

    assert_eq!(config.dns.domain, "lan.example.net");
    assert_eq!(
        config.files.output_file.to_str(),
        Some("/etc/pihole/custom.list")
    );
    assert_eq!(config.commands.restart, "systemctl restart pihole-FTL");
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn integer_timeouts_widen_to_floats() {
    let config = valid_config();
    assert_eq!(config.timeouts.short, 0.2);
    assert_eq!(config.timeouts.medium, 0.5);
    assert_eq!(config.timeouts.long, 1.0);
}

#[test]
fn omitted_port_defaults_to_22() {
    let doc = without_line(VALID_DOC, "port");
    let config = Config::from_str(&doc).expect("ports are optional");
    assert_eq!(config.ssh.port, 22);
    assert_eq!(config.fortinet.port, 22);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut doc = String::from("review_queue:\n  depth: 9\n");
    doc.push_str(VALID_DOC);
    doc.push_str("extra_section:\n  anything: goes\n");
    assert_eq!(Config::from_str(&doc).expect("extra keys tolerated"), valid_config());
}

#[test]
fn load_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(VALID_DOC.as_bytes()).expect("write doc");
    let config = Config::load(file.path()).expect("load from path");
    assert_eq!(config, valid_config());
}

#[test]
fn serialize_then_reload_round_trips() {
    let config = valid_config();
    let reloaded = Config::from_str(&config.to_yaml()).expect("serialized form reloads");
    assert_eq!(reloaded, config);
}

// ── Error taxonomy ──────────────────────────────────────────────────

#[test]
fn missing_section_is_a_missing_field() {
    let doc = VALID_DOC.replace("logging:\n  level: INFO\n", "");
    match Config::from_str(&doc) {
        Err(ConfigError::MissingField { field }) => assert_eq!(field, "logging"),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn missing_required_field_names_the_dotted_path() {
    let doc = without_line(VALID_DOC, "username");
    match Config::from_str(&doc) {
        Err(err @ ConfigError::MissingField { .. }) => {
            assert_eq!(err.field(), Some("ssh.username"));
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_a_type_mismatch() {
    let doc = with_line(VALID_DOC, "ttl", "  ttl: not-a-number");
    match Config::from_str(&doc) {
        Err(ConfigError::TypeMismatch { field, expected, found }) => {
            assert_eq!(field, "fortinet.ttl");
            assert_eq!(expected, "integer");
            assert_eq!(found, "string");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn scalar_section_is_a_type_mismatch() {
    let doc = VALID_DOC.replace("dns:\n  domain: lan.example.net\n", "dns: nope\n");
    match Config::from_str(&doc) {
        Err(ConfigError::TypeMismatch { field, expected, .. }) => {
            assert_eq!(field, "dns");
            assert_eq!(expected, "mapping");
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn non_ip_primary_dns_is_invalid() {
    let doc = with_line(VALID_DOC, "primary_dns", "  primary_dns: not-an-ip");
    match Config::from_str(&doc) {
        Err(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "fortinet.primary_dns");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn unrecognized_log_level_is_invalid() {
    let doc = with_line(VALID_DOC, "level", "  level: VERBOSE");
    match Config::from_str(&doc) {
        Err(ConfigError::InvalidValue { field, reason }) => {
            assert_eq!(field, "logging.level");
            assert!(reason.contains("VERBOSE"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn out_of_range_port_is_invalid() {
    let doc = with_line(VALID_DOC, "port", "  port: 70000");
    match Config::from_str(&doc) {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "ssh.port"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn negative_timeout_is_invalid() {
    let doc = with_line(VALID_DOC, "medium", "  medium: -0.5");
    match Config::from_str(&doc) {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "timeouts.medium"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn bad_contact_email_is_invalid() {
    let doc = with_line(VALID_DOC, "contact", "  contact: not-an-email");
    match Config::from_str(&doc) {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "fortinet.contact"),
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    match Config::from_str("ssh: [unclosed") {
        Err(ConfigError::Parse(_)) => {}
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn unreadable_file_is_an_io_error() {
    match Config::load("/nonexistent/hostsync/config.yaml") {
        Err(ConfigError::Io { path, .. }) => {
            assert!(path.ends_with("config.yaml"));
        }
        other => panic!("expected Io, got {other:?}"),
    }
}

// ── Plan translation ────────────────────────────────────────────────

#[test]
fn plan_carries_the_zone_and_pacing() {
    let plan = valid_config().plan();
    assert_eq!(plan.zone.database, "lan-zone");
    assert_eq!(plan.zone.domain, "lan.example.net");
    assert_eq!(plan.zone.ttl, 300);
    assert_eq!(plan.domain, "lan.example.net");
    assert_eq!(plan.pacing.short, std::time::Duration::from_millis(200));
    assert_eq!(plan.pacing.long, std::time::Duration::from_secs(1));
    assert_eq!(plan.switch.host, "switch.lan.example.net");
    assert_eq!(plan.switch.port, 8022);
    assert_eq!(plan.firewall.host, "firewall.lan.example.net");
}
