//! Cisco DHCP pool parsing.
//!
//! The switch is asked for its running config filtered down to pool
//! headers and manual bindings. What comes back looks like:
//!
//! ```text
//! ip dhcp pool PRINTER
//!  host 10.0.2.31 255.255.255.0
//! ip dhcp pool NAS
//!  host 10.0.2.40 255.255.255.0
//! ```
//!
//! A pool header opens a pool; a `host` line inside one yields an entry
//! named `<pool>.<domain>` (pool names lowercased); any other line closes
//! the current pool.

use std::net::IpAddr;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::model::{self, HostEntry};

/// The filtered running-config request sent to the switch.
pub const SHOW_DHCP_POOLS: &str = "show running-config | include ip dhcp pool | host";

static POOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ip dhcp pool (.+)$").expect("pool pattern"));

/// `host <address> <netmask>` -- the netmask is captured but unused.
static HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^host (\S+) (\S+)").expect("host pattern"));

/// Parse filtered running-config output into sorted host entries.
pub fn parse_pool_config(raw: &str, domain: &str) -> Vec<HostEntry> {
    let mut entries = Vec::new();
    let mut current_pool: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();

        if let Some(caps) = POOL_RE.captures(line) {
            current_pool = Some(caps[1].trim().to_lowercase());
            continue;
        }

        if let Some(pool) = current_pool.as_deref() {
            if let Some(caps) = HOST_RE.captures(line) {
                let address = &caps[1];
                match address.parse::<IpAddr>() {
                    Ok(ip) => entries.push(HostEntry::new(ip, format!("{pool}.{domain}"))),
                    Err(_) => warn!(pool, address, "skipping host line with unparsable address"),
                }
                continue;
            }
        }

        // Anything else (banner text, prompts, unrelated config) ends the
        // current pool.
        current_pool = None;
    }

    model::sort_entries(&mut entries);
    entries
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "\
ip dhcp pool PRINTER
 host 10.0.2.31 255.255.255.0
ip dhcp pool NAS
 host 10.0.2.40 255.255.255.0
ip dhcp pool Camera-Front
 host 10.0.3.12 255.255.255.0
";

    #[test]
    fn parses_pools_into_entries() {
        let entries = parse_pool_config(SAMPLE, "lan.example.net");
        let lines: Vec<String> = entries.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            [
                "10.0.2.31 printer.lan.example.net",
                "10.0.2.40 nas.lan.example.net",
                "10.0.3.12 camera-front.lan.example.net",
            ]
        );
    }

    #[test]
    fn pool_without_host_line_is_ignored() {
        let raw = "ip dhcp pool FLOATING\nip dhcp pool NAS\n host 10.0.2.40 255.255.255.0\n";
        let entries = parse_pool_config(raw, "lan");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].fqdn, "nas.lan");
    }

    #[test]
    fn unrelated_line_closes_the_pool() {
        // The host line no longer belongs to a pool once another line
        // intervened, so it must not produce an entry.
        let raw = "ip dhcp pool NAS\n default-router 10.0.2.1\n host 10.0.2.40 255.255.255.0\n";
        assert!(parse_pool_config(raw, "lan").is_empty());
    }

    #[test]
    fn host_line_outside_any_pool_is_ignored() {
        let raw = " host 10.0.2.40 255.255.255.0\n";
        assert!(parse_pool_config(raw, "lan").is_empty());
    }

    #[test]
    fn unparsable_address_is_skipped() {
        let raw = "ip dhcp pool BAD\n host not-an-ip 255.255.255.0\n";
        assert!(parse_pool_config(raw, "lan").is_empty());
    }

    #[test]
    fn entries_come_back_sorted() {
        let raw = "\
ip dhcp pool B
 host 10.0.9.2 255.255.255.0
ip dhcp pool A
 host 10.0.2.7 255.255.255.0
";
        let entries = parse_pool_config(raw, "lan");
        assert_eq!(entries[0].fqdn, "a.lan");
        assert_eq!(entries[1].fqdn, "b.lan");
    }

    #[test]
    fn empty_input_yields_no_entries() {
        assert!(parse_pool_config("", "lan").is_empty());
    }
}
