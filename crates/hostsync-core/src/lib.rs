//! Business logic between the SSH transport and the CLI.
//!
//! This crate owns the domain model and every deterministic piece of the
//! sync pipeline:
//!
//! - **[`dhcp`]** — turns the filtered `show running-config` output of a
//!   Cisco switch into [`HostEntry`] values (one per manual DHCP binding).
//! - **[`hosts`]** — renders the dnsmasq-style hosts file (banner, static
//!   content, generated entries) and parses hosts content back into
//!   entries for the firewall push.
//! - **[`fortinet`]** — builds the FortiOS `config system dns-database`
//!   command sequence, with forward and reverse records paired per host.
//! - **[`exec`]** — runs the configured `chown`/`chgrp`/restart commands
//!   after the hosts file lands.
//! - **[`Sync`]** — the pipeline facade. Each step is its own operation so
//!   the CLI can skip or dry-run parts of the flow.
//!
//! Device I/O lives in `hostsync-net`; the shell-driven push goes through
//! the [`CommandShell`] trait so it can be exercised without a firewall.

pub mod dhcp;
pub mod error;
pub mod exec;
pub mod fortinet;
pub mod hosts;
pub mod model;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use exec::CommandSet;
pub use fortinet::{Pace, ScriptStep, ZoneSpec};
pub use model::HostEntry;
pub use sync::{CommandShell, Pacing, Sync, SyncPlan};

// Transport types cross this crate's API (plans carry targets, CoreError
// wraps NetError), so surface them here for consumers.
pub use hostsync_net::{NetError, SshTarget};
