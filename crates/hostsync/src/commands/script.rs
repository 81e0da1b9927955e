//! Print the FortiOS dns-database script a sync would push.

use chrono::Local;

use hostsync_config::Config;
use hostsync_core::{fortinet, hosts, Sync};

use crate::cli::{GlobalOpts, OutputFormat, ScriptArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    args: ScriptArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let sync = Sync::new(config.plan());

    let raw = match args.input {
        Some(ref path) => util::read_input_file(path)?,
        None => sync.fetch_dhcp().await?,
    };

    // Same records a real push would carry: the rendered hosts file,
    // static entries included.
    let existing = sync.read_existing().await?;
    let rendered = sync.render(&raw, &existing, Local::now());
    let records = hosts::parse_hosts(&rendered);
    let steps = fortinet::build_zone_script(&sync.plan().zone, &records);

    let out = match global.output {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&steps).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(&steps).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(&steps).expect("serialization should not fail"),
        // Table and plain both print the script itself.
        OutputFormat::Table | OutputFormat::Plain => steps
            .iter()
            .map(|s| s.command.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
