//! The sync pipeline facade.
//!
//! [`Sync`] exposes each stage of the original flow as its own operation
//! so the CLI can dry-run, preview, or skip stages independently:
//!
//! 1. fetch the filtered DHCP config from the switch,
//! 2. merge it with the static hosts file and render the output,
//! 3. write the hosts file,
//! 4. run the post commands,
//! 5. rebuild the firewall DNS database from the rendered file.
//!
//! Step 5 pushes the *rendered* file (static entries included), not just
//! the switch-derived entries -- the firewall zone mirrors everything the
//! resolver serves.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use hostsync_net::{NetError, SshSession, SshShell, SshTarget};
use tracing::{debug, info, trace};

use crate::dhcp;
use crate::error::CoreError;
use crate::exec::CommandSet;
use crate::fortinet::{self, Pace, ScriptStep, ZoneSpec};
use crate::hosts;
use crate::model::HostEntry;

/// Minimum connect deadline regardless of configured pacing.
const CONNECT_TIMEOUT_FLOOR: Duration = Duration::from_secs(10);

/// Settle windows for shell pacing, from `timeouts` in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub short: Duration,
    pub medium: Duration,
    pub long: Duration,
}

impl Pacing {
    /// Concrete settle window for a script step.
    ///
    /// Every command gets the short window; the slow ones (database
    /// delete) get the medium window on top.
    pub fn settle(&self, pace: Pace) -> Duration {
        match pace {
            Pace::Short => self.short,
            Pace::Medium => self.short + self.medium,
        }
    }

    /// Connect deadline: a fixed floor, scaled up for slow deployments.
    pub fn connect_timeout(&self) -> Duration {
        CONNECT_TIMEOUT_FLOOR.max(self.long.saturating_mul(10))
    }
}

/// Everything one sync run needs, pre-resolved from the configuration.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub switch: SshTarget,
    pub firewall: SshTarget,
    pub zone: ZoneSpec,
    pub domain: String,
    pub existing_host_file: PathBuf,
    pub output_file: PathBuf,
    pub commands: CommandSet,
    pub pacing: Pacing,
}

/// Abstraction over the interactive firewall shell so the push loop can
/// be exercised without a device.
#[async_trait]
pub trait CommandShell: Send {
    async fn send_line(&mut self, line: &str) -> Result<(), NetError>;
    async fn read_available(&mut self, wait: Duration) -> String;
}

#[async_trait]
impl CommandShell for SshShell {
    async fn send_line(&mut self, line: &str) -> Result<(), NetError> {
        SshShell::send_line(self, line).await
    }

    async fn read_available(&mut self, wait: Duration) -> String {
        SshShell::read_available(self, wait).await
    }
}

/// Pipeline facade bound to one plan.
pub struct Sync {
    plan: SyncPlan,
}

impl Sync {
    pub fn new(plan: SyncPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &SyncPlan {
        &self.plan
    }

    /// Connect to the switch and fetch the filtered DHCP configuration.
    pub async fn fetch_dhcp(&self) -> Result<String, CoreError> {
        let timeout = self.plan.pacing.connect_timeout();
        let mut session = SshSession::connect(&self.plan.switch, timeout).await?;
        info!(host = %self.plan.switch.host, "retrieving DHCP pool configuration");
        let raw = session.exec(dhcp::SHOW_DHCP_POOLS).await?;
        session.disconnect().await?;

        if raw.trim().is_empty() {
            return Err(CoreError::EmptyDhcpConfig {
                host: self.plan.switch.host.clone(),
            });
        }
        Ok(raw)
    }

    /// Read the static hosts file; absence contributes empty content.
    pub async fn read_existing(&self) -> Result<String, CoreError> {
        match tokio::fs::read_to_string(&self.plan.existing_host_file).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(CoreError::Io {
                path: self.plan.existing_host_file.clone(),
                source,
            }),
        }
    }

    /// Parse the raw DHCP config and render the output hosts file.
    pub fn render(&self, raw: &str, existing: &str, generated_at: DateTime<Local>) -> String {
        let entries = dhcp::parse_pool_config(raw, &self.plan.domain);
        debug!(entries = entries.len(), "parsed DHCP bindings");
        hosts::render_hosts(&entries, existing, generated_at)
    }

    /// Write the rendered hosts file to the configured output path.
    pub async fn write_output(&self, content: &str) -> Result<(), CoreError> {
        tokio::fs::write(&self.plan.output_file, content)
            .await
            .map_err(|source| CoreError::Io {
                path: self.plan.output_file.clone(),
                source,
            })?;
        info!(path = %self.plan.output_file.display(), "host file written");
        Ok(())
    }

    /// Rebuild the firewall DNS database from the given entries.
    ///
    /// `progress` is called with `(completed, total)` after each step.
    pub async fn push_firewall<F>(
        &self,
        entries: &[HostEntry],
        progress: F,
    ) -> Result<(), CoreError>
    where
        F: FnMut(usize, usize) + Send,
    {
        let steps = fortinet::build_zone_script(&self.plan.zone, entries);
        let timeout = self.plan.pacing.connect_timeout();

        let mut session = SshSession::connect(&self.plan.firewall, timeout).await?;
        let mut shell = session.open_shell().await?;

        // Drain the login banner so the first command lands at a prompt.
        let banner = shell.read_available(self.plan.pacing.long).await;
        trace!(banner = %banner.trim_end(), "firewall shell ready");

        self.push_script(&mut shell, &steps, progress).await?;

        shell.close().await?;
        session.disconnect().await?;
        info!(
            database = %self.plan.zone.database,
            records = entries.len() * 2,
            "fortinet DNS database rebuilt"
        );
        Ok(())
    }

    /// Send a script step-by-step, pacing each command.
    pub async fn push_script<S, F>(
        &self,
        shell: &mut S,
        steps: &[ScriptStep],
        mut progress: F,
    ) -> Result<(), CoreError>
    where
        S: CommandShell,
        F: FnMut(usize, usize) + Send,
    {
        let total = steps.len();
        for (done, step) in steps.iter().enumerate() {
            shell.send_line(&step.command).await?;
            let settled = shell
                .read_available(self.plan.pacing.settle(step.pace))
                .await;
            debug!(command = %step.command, output = %settled.trim_end(), "firewall response");
            progress(done + 1, total);
        }
        Ok(())
    }
}
