//! Domain model shared across the pipeline.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// One forward DNS mapping: an address and its fully qualified name.
///
/// Produced by the DHCP parser (`<pool>.<domain>`) and by the hosts-file
/// parser; consumed by the hosts renderer and the Fortinet script builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEntry {
    pub ip: IpAddr,
    pub fqdn: String,
}

impl HostEntry {
    pub fn new(ip: IpAddr, fqdn: impl Into<String>) -> Self {
        Self {
            ip,
            fqdn: fqdn.into(),
        }
    }

    /// Ordering key: IPv4 sorts by octets 2-4 (the leading octet is
    /// constant across a site's pools), IPv6 after IPv4 by full address.
    fn sort_key(&self) -> (u8, [u8; 16]) {
        match self.ip {
            IpAddr::V4(v4) => {
                let [_, b, c, d] = v4.octets();
                let mut key = [0u8; 16];
                key[0] = b;
                key[1] = c;
                key[2] = d;
                (0, key)
            }
            IpAddr::V6(v6) => (1, v6.octets()),
        }
    }
}

impl fmt::Display for HostEntry {
    /// Hosts-file line form: `ip fqdn`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ip, self.fqdn)
    }
}

/// Sort entries into the canonical output order.
pub fn sort_entries(entries: &mut [HostEntry]) {
    entries.sort_by_key(HostEntry::sort_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ip: &str, fqdn: &str) -> HostEntry {
        HostEntry::new(ip.parse().expect("test ip"), fqdn)
    }

    #[test]
    fn sorts_by_trailing_octets() {
        let mut entries = vec![
            entry("10.0.30.5", "c.lan"),
            entry("10.0.2.20", "b.lan"),
            entry("192.0.2.1", "a.lan"),
        ];
        sort_entries(&mut entries);
        // 192.0.2.1 sorts between the 10.x addresses: the first octet is
        // ignored, so the keys are (0,2,1), (0,2,20), (0,30,5).
        let names: Vec<&str> = entries.iter().map(|e| e.fqdn.as_str()).collect();
        assert_eq!(names, ["a.lan", "b.lan", "c.lan"]);
    }

    #[test]
    fn ipv6_sorts_after_ipv4() {
        let mut entries = vec![
            entry("2001:db8::1", "six.lan"),
            entry("10.0.0.1", "four.lan"),
        ];
        sort_entries(&mut entries);
        assert_eq!(entries[0].fqdn, "four.lan");
        assert_eq!(entries[1].fqdn, "six.lan");
    }

    #[test]
    fn displays_as_hosts_line() {
        assert_eq!(entry("10.0.0.9", "nas.lan").to_string(), "10.0.0.9 nas.lan");
    }
}
