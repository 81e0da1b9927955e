//! Clap derive structures for the `hostsync` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Keep
//! this module dependent only on clap + clap_complete: build.rs includes
//! it directly to generate man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hostsync -- switch DHCP reservations in, DNS records out
#[derive(Debug, Parser)]
#[command(
    name = "hostsync",
    version,
    about = "Sync Cisco DHCP reservations into a dnsmasq hosts file and a Fortinet DNS database",
    long_about = "Reads manual DHCP bindings from a Cisco switch over SSH, merges them\n\
        with a static hosts file, writes the result for the local resolver,\n\
        and rebuilds the matching DNS database on a Fortinet firewall.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the configuration document
    #[arg(long, short = 'c', env = "HOSTSYNC_CONFIG", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOSTSYNC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full sync: fetch, render, write, post commands, firewall
    Sync(SyncArgs),

    /// Show the host entries a sync would produce
    #[command(alias = "pre")]
    Preview(PreviewArgs),

    /// Print the FortiOS dns-database script a sync would push
    Script(ScriptArgs),

    /// Inspect and validate configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Sync ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Fetch and render only; write nothing, run nothing, push nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the Fortinet DNS database rebuild
    #[arg(long)]
    pub skip_firewall: bool,

    /// Skip the chown/chgrp/restart post commands
    #[arg(long)]
    pub skip_commands: bool,
}

// ── Preview / Script ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Parse a saved `show running-config` dump instead of contacting the switch
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Parse a saved `show running-config` dump instead of contacting the switch
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the loaded configuration (passwords redacted)
    Show,

    /// Validate a configuration document
    Validate {
        /// Document to check (defaults to the resolved config path)
        path: Option<PathBuf>,
    },

    /// Print the resolved configuration file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
