//! Field validation rules.
//!
//! Syntactic checks only -- nothing here touches the network or the
//! filesystem. Each function takes the dotted field path so the error
//! points at the exact offending key.

use std::net::IpAddr;

use crate::error::ConfigError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.into(),
    }
}

/// TCP port in [1, 65535].
pub fn port(field: &str, value: i64) -> Result<u16, ConfigError> {
    u16::try_from(value)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| invalid(field, format!("port {value} is outside 1-65535")))
}

/// Positive TTL seconds.
pub fn ttl(field: &str, value: i64) -> Result<u32, ConfigError> {
    u32::try_from(value)
        .ok()
        .filter(|t| *t >= 1)
        .ok_or_else(|| invalid(field, format!("ttl must be a positive integer, got {value}")))
}

/// Finite, non-negative seconds.
pub fn seconds(field: &str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(
            field,
            format!("expected a non-negative number of seconds, got {value}"),
        ))
    }
}

/// IPv4 or IPv6 literal.
pub fn ip_literal(field: &str, value: &str) -> Result<IpAddr, ConfigError> {
    value
        .parse()
        .map_err(|_| invalid(field, format!("'{value}' is not an IPv4 or IPv6 address")))
}

/// DNS name: LDH labels, 1-63 chars each, at most 253 total.
pub fn domain(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(field, "domain must not be empty"));
    }
    if value.len() > MAX_DOMAIN_LEN {
        return Err(invalid(field, "domain exceeds 253 characters"));
    }
    for label in value.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(invalid(field, format!("label '{label}' has invalid length")));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid(
                field,
                format!("label '{label}' may not start or end with a hyphen"),
            ));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid(
                field,
                format!("label '{label}' contains characters outside [a-z0-9-]"),
            ));
        }
    }
    Ok(())
}

/// Email address: one `@`, non-empty local part, valid domain on the right.
pub fn email(field: &str, value: &str) -> Result<(), ConfigError> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(host) = parts.next() else {
        return Err(invalid(field, format!("'{value}' is missing an '@'")));
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) || local.contains('@') {
        return Err(invalid(field, format!("'{value}' has an invalid local part")));
    }
    if host.contains('@') {
        return Err(invalid(field, format!("'{value}' contains more than one '@'")));
    }
    domain(field, host)
}

/// Non-empty path string.
pub fn path(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        Err(invalid(field, "path must not be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn ports_must_fit_the_tcp_range() {
        assert_eq!(port("ssh.port", 22).ok(), Some(22));
        assert_eq!(port("ssh.port", 65535).ok(), Some(65535));
        assert!(port("ssh.port", 0).is_err());
        assert!(port("ssh.port", 65536).is_err());
        assert!(port("ssh.port", -5).is_err());
    }

    #[test]
    fn ttl_must_be_positive() {
        assert_eq!(ttl("fortinet.ttl", 300).ok(), Some(300));
        assert!(ttl("fortinet.ttl", 0).is_err());
        assert!(ttl("fortinet.ttl", -1).is_err());
    }

    #[test]
    fn seconds_reject_negatives_and_non_finite() {
        assert_eq!(seconds("timeouts.short", 0.0).ok(), Some(0.0));
        assert_eq!(seconds("timeouts.short", 2.5).ok(), Some(2.5));
        assert!(seconds("timeouts.short", -0.1).is_err());
        assert!(seconds("timeouts.short", f64::NAN).is_err());
        assert!(seconds("timeouts.short", f64::INFINITY).is_err());
    }

    #[test]
    fn ip_literals_cover_both_families() {
        assert!(ip_literal("fortinet.primary_dns", "10.0.2.53").is_ok());
        assert!(ip_literal("fortinet.primary_dns", "2001:db8::53").is_ok());
        assert!(ip_literal("fortinet.primary_dns", "not-an-ip").is_err());
        assert!(ip_literal("fortinet.primary_dns", "10.0.2.").is_err());
    }

    #[test]
    fn domains_follow_ldh_rules() {
        assert!(domain("dns.domain", "lan.example.net").is_ok());
        assert!(domain("dns.domain", "lan").is_ok());
        assert!(domain("dns.domain", "").is_err());
        assert!(domain("dns.domain", "double..dot").is_err());
        assert!(domain("dns.domain", "-leading.lan").is_err());
        assert!(domain("dns.domain", "under_score.lan").is_err());
    }

    #[test]
    fn emails_need_one_at_and_a_real_host() {
        assert!(email("fortinet.contact", "hostmaster@example.net").is_ok());
        assert!(email("fortinet.contact", "no-at-sign").is_err());
        assert!(email("fortinet.contact", "@example.net").is_err());
        assert!(email("fortinet.contact", "a@b@c.net").is_err());
        assert!(email("fortinet.contact", "user@bad..host").is_err());
    }
}
