//! Hosts-file rendering and parsing.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::model::HostEntry;

/// Render the output hosts file: banner, static content, generated entries.
///
/// `existing` is the verbatim content of the operator-maintained static
/// hosts file (empty when the file is absent). The generated block is
/// appended after it, one `ip fqdn` line per entry, in the order given.
pub fn render_hosts(entries: &[HostEntry], existing: &str, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str("# Auto created host file\n");
    out.push_str("# Generated from switch dhcp configuration\n");
    let _ = writeln!(out, "# Generated on {}", generated_at.format("%Y-%m-%d %H:%M"));

    if !existing.is_empty() {
        out.push_str(existing);
        if !existing.ends_with('\n') {
            out.push('\n');
        }
    }

    for entry in entries {
        let _ = writeln!(out, "{entry}");
    }
    out
}

/// Parse hosts-file content back into entries.
///
/// Comments and blank lines are skipped. Only lines with exactly two
/// fields whose first field is an address are accepted; everything else
/// (multi-alias lines, malformed fragments) is ignored.
pub fn parse_hosts(content: &str) -> Vec<HostEntry> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let &[ip, fqdn] = fields.as_slice() else {
                return None;
            };
            let ip = ip.parse().ok()?;
            Some(HostEntry::new(ip, fqdn))
        })
        .collect()
}
