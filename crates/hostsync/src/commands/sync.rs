//! The sync command: fetch, render, write, post commands, firewall.

use std::io::IsTerminal;

use chrono::Local;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use hostsync_config::Config;
use hostsync_core::{exec, hosts, Sync};

use crate::cli::{GlobalOpts, SyncArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: SyncArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    tracing::debug!(
        dry_run = args.dry_run,
        skip_firewall = args.skip_firewall,
        skip_commands = args.skip_commands,
        "starting sync"
    );
    let sync = Sync::new(config.plan());

    let raw = sync.fetch_dhcp().await?;
    let existing = sync.read_existing().await?;
    let rendered = sync.render(&raw, &existing, Local::now());

    if args.dry_run {
        // Show what would land on disk; touch nothing.
        output::print_output(&rendered, global.quiet);
        return Ok(());
    }

    sync.write_output(&rendered).await?;

    if !args.skip_commands {
        exec::run_post_commands(&sync.plan().commands).await?;
    }

    if !args.skip_firewall {
        let plan = sync.plan();
        let action = format!(
            "Rebuild DNS database \"{}\" on {}",
            plan.zone.database, plan.firewall.host
        );
        if !util::confirm(&action, global.yes)? {
            return Ok(());
        }

        // The zone mirrors the rendered file, static entries included.
        let records = hosts::parse_hosts(&rendered);

        let bar = if global.quiet || !std::io::stderr().is_terminal() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        sync.push_firewall(&records, |done, total| {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        })
        .await?;
        bar.finish_and_clear();
    }

    if !global.quiet {
        let summary = format!("Sync complete: {}", sync.plan().output_file.display());
        if output::should_color(&global.color) {
            eprintln!("{}", summary.green());
        } else {
            eprintln!("{summary}");
        }
    }
    Ok(())
}
