//! SSH session and interactive shell plumbing.
//!
//! Wraps `russh` with hostsync-specific connection setup: password auth,
//! a bounded connect deadline, and the accept-all host key policy the
//! deployment has always used.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client;
use russh::{Channel, ChannelMsg, Disconnect};
use russh_keys::key;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};

use crate::error::NetError;

/// Connection parameters for one device.
#[derive(Debug, Clone)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
}

/// Host key handler that accepts whatever the device presents.
struct AcceptAllKeys;

#[async_trait]
impl client::Handler for AcceptAllKeys {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &key::PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// An authenticated SSH connection to a single device.
pub struct SshSession {
    handle: client::Handle<AcceptAllKeys>,
    host: String,
}

impl SshSession {
    /// Connect and authenticate with a password, bounded by `timeout`.
    pub async fn connect(target: &SshTarget, timeout: Duration) -> Result<Self, NetError> {
        debug!(host = %target.host, port = target.port, "opening SSH connection");

        let config = Arc::new(client::Config::default());
        let pending = client::connect(
            config,
            (target.host.as_str(), target.port),
            AcceptAllKeys,
        );

        let mut handle = match tokio::time::timeout(timeout, pending).await {
            Ok(Ok(handle)) => handle,
            Ok(Err(source)) => {
                return Err(NetError::Connect {
                    host: target.host.clone(),
                    port: target.port,
                    source,
                });
            }
            Err(_) => {
                return Err(NetError::Timeout {
                    host: target.host.clone(),
                    seconds: timeout.as_secs_f64(),
                });
            }
        };

        let authenticated = handle
            .authenticate_password(&target.username, target.password.expose_secret())
            .await
            .map_err(|source| NetError::Protocol {
                host: target.host.clone(),
                source,
            })?;

        if !authenticated {
            return Err(NetError::AuthFailed {
                host: target.host.clone(),
                username: target.username.clone(),
            });
        }

        debug!(host = %target.host, "SSH session established");
        Ok(Self {
            handle,
            host: target.host.clone(),
        })
    }

    /// Run a single command on a fresh channel and collect its output.
    ///
    /// Output is gathered until the remote closes the channel; stderr is
    /// folded into the result the way an interactive CLI would show it.
    pub async fn exec(&mut self, command: &str) -> Result<String, NetError> {
        let mut channel = self.open_channel().await?;
        channel
            .exec(true, command)
            .await
            .map_err(|source| self.protocol_err(source))?;

        let mut output = Vec::new();
        loop {
            let Some(msg) = channel.wait().await else {
                break;
            };
            match msg {
                ChannelMsg::Data { ref data } => output.extend_from_slice(data),
                ChannelMsg::ExtendedData { ref data, .. } => output.extend_from_slice(data),
                ChannelMsg::ExitStatus { exit_status } => {
                    trace!(exit_status, "remote command exited");
                }
                _ => {}
            }
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    /// Request a PTY-backed interactive shell.
    pub async fn open_shell(&mut self) -> Result<SshShell, NetError> {
        let mut channel = self.open_channel().await?;
        channel
            .request_pty(false, "vt100", 80, 24, 0, 0, &[])
            .await
            .map_err(|source| self.protocol_err(source))?;
        channel
            .request_shell(true)
            .await
            .map_err(|source| self.protocol_err(source))?;

        Ok(SshShell {
            channel,
            host: self.host.clone(),
        })
    }

    /// Politely tear the connection down.
    pub async fn disconnect(self) -> Result<(), NetError> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .map_err(|source| NetError::Protocol {
                host: self.host.clone(),
                source,
            })
    }

    async fn open_channel(&mut self) -> Result<Channel<client::Msg>, NetError> {
        self.handle
            .channel_open_session()
            .await
            .map_err(|source| self.protocol_err(source))
    }

    fn protocol_err(&self, source: russh::Error) -> NetError {
        NetError::Protocol {
            host: self.host.clone(),
            source,
        }
    }
}

/// An interactive shell channel.
///
/// The caller drives pacing: [`send_line`](Self::send_line) writes a
/// command, then [`read_available`](Self::read_available) drains whatever
/// the device produced within the settle window. Devices like FortiOS
/// echo slowly and keep per-session mode state, so there is no
/// command/response framing to rely on.
pub struct SshShell {
    channel: Channel<client::Msg>,
    host: String,
}

impl SshShell {
    /// Write `line` plus a newline to the shell.
    pub async fn send_line(&mut self, line: &str) -> Result<(), NetError> {
        trace!(host = %self.host, line, "shell write");
        let payload = format!("{line}\n");
        self.channel
            .data(payload.as_bytes())
            .await
            .map_err(|source| NetError::Protocol {
                host: self.host.clone(),
                source,
            })
    }

    /// Collect output until `wait` elapses or the channel closes.
    pub async fn read_available(&mut self, wait: Duration) -> String {
        let deadline = tokio::time::Instant::now() + wait;
        let mut buf = Vec::new();

        loop {
            let now = tokio::time::Instant::now();
            if now >= deadline {
                break;
            }
            match tokio::time::timeout(deadline - now, self.channel.wait()).await {
                Ok(Some(ChannelMsg::Data { ref data })) => buf.extend_from_slice(data),
                Ok(Some(ChannelMsg::ExtendedData { ref data, .. })) => {
                    buf.extend_from_slice(data);
                }
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => break,
            }
        }

        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Signal EOF and drop the channel.
    pub async fn close(mut self) -> Result<(), NetError> {
        self.channel
            .eof()
            .await
            .map_err(|source| NetError::Protocol {
                host: self.host,
                source,
            })
    }
}
