//! Preview the host entries a sync would produce.

use tabled::Tabled;

use hostsync_config::Config;
use hostsync_core::{dhcp, HostEntry, Sync};

use crate::cli::{GlobalOpts, PreviewArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Hostname")]
    hostname: String,
}

impl From<&HostEntry> for HostRow {
    fn from(entry: &HostEntry) -> Self {
        Self {
            address: entry.ip.to_string(),
            hostname: entry.fqdn.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: PreviewArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let raw = match args.input {
        Some(ref path) => util::read_input_file(path)?,
        None => Sync::new(config.plan()).fetch_dhcp().await?,
    };

    let entries = dhcp::parse_pool_config(&raw, &config.dns.domain);
    let out = output::render_list(
        &global.output,
        &entries,
        |entry| HostRow::from(entry),
        ToString::to_string,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
