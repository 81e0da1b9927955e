//! SSH transport for hostsync device sessions.
//!
//! Both managed devices (the Cisco switch and the Fortinet firewall) are
//! driven over their SSH CLIs rather than a structured API, so this crate
//! stays deliberately small:
//!
//! - **[`SshSession`]** — an authenticated connection to one device.
//!   [`exec`](SshSession::exec) runs a single command on a dedicated
//!   channel and collects its output; [`open_shell`](SshSession::open_shell)
//!   requests a PTY-backed interactive shell for CLIs that keep state
//!   between commands (the FortiOS configuration tree).
//! - **[`SshShell`]** — the interactive channel. Callers own the pacing:
//!   write a line, give the device time to settle, then drain whatever
//!   output accumulated.
//!
//! Host keys are accepted without verification; the devices live on the
//! management network and the original deployment never pinned them.

pub mod error;
pub mod ssh;

pub use error::NetError;
pub use ssh::{SshSession, SshShell, SshTarget};
