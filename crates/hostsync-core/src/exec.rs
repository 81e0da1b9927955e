//! Post-write command execution.
//!
//! After the hosts file lands, ownership is fixed up and the resolver is
//! restarted. The commands are opaque operator-supplied shell strings and
//! run verbatim through `sh -c`, in configuration order.

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::info;

use crate::error::CoreError;

/// The three post-write commands from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    pub chown: String,
    pub chgrp: String,
    pub restart: String,
}

impl CommandSet {
    /// Named commands in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("chown", self.chown.as_str()),
            ("chgrp", self.chgrp.as_str()),
            ("restart", self.restart.as_str()),
        ]
        .into_iter()
    }
}

/// Run every non-empty command, stopping at the first failure.
pub async fn run_post_commands(commands: &CommandSet) -> Result<(), CoreError> {
    for (name, command) in commands.iter() {
        if command.is_empty() {
            continue;
        }
        info!(name, command, "executing post command");

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .await
            .map_err(|source| CoreError::CommandSpawn {
                name: name.to_owned(),
                source,
            })?;

        if !status.success() {
            return Err(CoreError::CommandFailed {
                name: name.to_owned(),
                status,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(chown: &str, chgrp: &str, restart: &str) -> CommandSet {
        CommandSet {
            chown: chown.into(),
            chgrp: chgrp.into(),
            restart: restart.into(),
        }
    }

    #[tokio::test]
    async fn empty_commands_are_skipped() {
        run_post_commands(&set("", "", "")).await.expect("no-op run");
    }

    #[tokio::test]
    async fn successful_commands_run_in_order() {
        run_post_commands(&set("true", "", "true"))
            .await
            .expect("both commands succeed");
    }

    #[tokio::test]
    async fn nonzero_exit_stops_the_run() {
        let err = run_post_commands(&set("true", "exit 3", "true"))
            .await
            .expect_err("chgrp fails");
        match err {
            CoreError::CommandFailed { name, status } => {
                assert_eq!(name, "chgrp");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
