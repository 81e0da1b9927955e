//! FortiOS DNS database script generation.
//!
//! The firewall is configured through its interactive CLI: the existing
//! `dns-database` zone is deleted and rebuilt from scratch with one
//! forward record and one reverse record per host. Generation is pure --
//! the shell-driven delivery lives in [`crate::sync`].

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::model::HostEntry;

/// Zone metadata for the firewall DNS database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// FortiOS dns-database object name.
    pub database: String,
    /// Zone domain suffix.
    pub domain: String,
    /// Record TTL in seconds.
    pub ttl: u32,
    /// SOA primary name server address.
    pub primary_name: IpAddr,
    /// SOA contact mailbox.
    pub contact: String,
}

/// Settle class after a command is sent.
///
/// Deleting the database is the one slow operation; everything else gets
/// the short window. Mapped to concrete durations by
/// [`Pacing`](crate::sync::Pacing) at push time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pace {
    Short,
    Medium,
}

/// One line (or newline-joined batch) sent to the firewall shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub command: String,
    pub pace: Pace,
}

impl ScriptStep {
    fn short(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            pace: Pace::Short,
        }
    }

    fn medium(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            pace: Pace::Medium,
        }
    }
}

/// Build the full command sequence that rebuilds the zone.
///
/// Record indices are contiguous from 1; each forward record (`A`/`AAAA`)
/// is immediately followed by its reverse record (`PTR`/`PTR_V6`).
pub fn build_zone_script(zone: &ZoneSpec, entries: &[HostEntry]) -> Vec<ScriptStep> {
    let mut steps = Vec::with_capacity(entries.len() * 2 + 6);

    steps.push(ScriptStep::short("config system dns-database"));
    steps.push(ScriptStep::medium(format!("delete \"{}\"", zone.database)));
    steps.push(ScriptStep::short(format!("edit \"{}\"", zone.database)));
    steps.push(ScriptStep::short(format!(
        "set domain \"{}\"\nset ttl {}\nset primary-name \"{}\"\nset contact \"{}\"",
        zone.domain, zone.ttl, zone.primary_name, zone.contact
    )));
    steps.push(ScriptStep::short("config dns-entry"));

    let mut idx = 1u32;
    for entry in entries {
        steps.push(ScriptStep::short(forward_record(idx, entry)));
        idx += 1;
        steps.push(ScriptStep::short(reverse_record(idx, entry)));
        idx += 1;
    }

    steps.push(ScriptStep::short("end\nnext\nend"));
    steps
}

fn forward_record(idx: u32, entry: &HostEntry) -> String {
    match entry.ip {
        IpAddr::V4(ip) => format!(
            "edit {idx}\nset type A\nset hostname \"{}\"\nset ip {ip}\nnext",
            entry.fqdn
        ),
        IpAddr::V6(ip) => format!(
            "edit {idx}\nset type AAAA\nset hostname \"{}\"\nset ipv6 {ip}\nnext",
            entry.fqdn
        ),
    }
}

fn reverse_record(idx: u32, entry: &HostEntry) -> String {
    match entry.ip {
        IpAddr::V4(ip) => format!(
            "edit {idx}\nset type PTR\nset hostname \"{}\"\nset ip {ip}\nnext",
            entry.fqdn
        ),
        IpAddr::V6(ip) => format!(
            "edit {idx}\nset type PTR_V6\nset hostname \"{}\"\nset ipv6 {ip}\nnext",
            entry.fqdn
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::HostEntry;

    fn zone() -> ZoneSpec {
        ZoneSpec {
            database: "lan-zone".into(),
            domain: "lan.example.net".into(),
            ttl: 300,
            primary_name: "10.0.2.53".parse().expect("test ip"),
            contact: "hostmaster@example.net".into(),
        }
    }

    fn entry(ip: &str, fqdn: &str) -> HostEntry {
        HostEntry::new(ip.parse().expect("test ip"), fqdn)
    }

    #[test]
    fn preamble_rebuilds_the_database() {
        let steps = build_zone_script(&zone(), &[]);
        let commands: Vec<&str> = steps.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(
            commands,
            [
                "config system dns-database",
                "delete \"lan-zone\"",
                "edit \"lan-zone\"",
                "set domain \"lan.example.net\"\nset ttl 300\nset primary-name \"10.0.2.53\"\nset contact \"hostmaster@example.net\"",
                "config dns-entry",
                "end\nnext\nend",
            ]
        );
    }

    #[test]
    fn delete_gets_the_medium_settle_window() {
        let steps = build_zone_script(&zone(), &[]);
        assert_eq!(steps[1].pace, Pace::Medium);
        assert!(
            steps
                .iter()
                .enumerate()
                .all(|(i, s)| i == 1 || s.pace == Pace::Short)
        );
    }

    #[test]
    fn forward_and_reverse_records_are_paired_with_contiguous_indices() {
        let entries = vec![entry("10.0.2.31", "printer.lan"), entry("10.0.2.40", "nas.lan")];
        let steps = build_zone_script(&zone(), &entries);

        assert_eq!(
            steps[5].command,
            "edit 1\nset type A\nset hostname \"printer.lan\"\nset ip 10.0.2.31\nnext"
        );
        assert_eq!(
            steps[6].command,
            "edit 2\nset type PTR\nset hostname \"printer.lan\"\nset ip 10.0.2.31\nnext"
        );
        assert_eq!(
            steps[7].command,
            "edit 3\nset type A\nset hostname \"nas.lan\"\nset ip 10.0.2.40\nnext"
        );
        assert_eq!(
            steps[8].command,
            "edit 4\nset type PTR\nset hostname \"nas.lan\"\nset ip 10.0.2.40\nnext"
        );
    }

    #[test]
    fn ipv6_entries_use_aaaa_and_ptr_v6() {
        let steps = build_zone_script(&zone(), &[entry("2001:db8::7", "v6host.lan")]);
        assert_eq!(
            steps[5].command,
            "edit 1\nset type AAAA\nset hostname \"v6host.lan\"\nset ipv6 2001:db8::7\nnext"
        );
        assert_eq!(
            steps[6].command,
            "edit 2\nset type PTR_V6\nset hostname \"v6host.lan\"\nset ipv6 2001:db8::7\nnext"
        );
    }

    #[test]
    fn script_always_ends_with_the_closing_sequence() {
        let steps = build_zone_script(&zone(), &[entry("10.0.2.31", "printer.lan")]);
        assert_eq!(
            steps.last().map(|s| s.command.as_str()),
            Some("end\nnext\nend")
        );
    }
}
