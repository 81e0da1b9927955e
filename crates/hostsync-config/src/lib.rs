//! Configuration loading for hostsync.
//!
//! The whole tool is driven by one YAML document with seven fixed
//! top-level sections (`ssh`, `fortinet`, `dns`, `files`, `commands`,
//! `timeouts`, `logging`). This crate owns that schema: parsing,
//! field-by-field validation, and the translation into a
//! [`hostsync_core::SyncPlan`].
//!
//! The loader is strict where it matters and tolerant where it can be:
//! a missing or mistyped field fails the entire load with a dotted field
//! path in the error, while unknown keys anywhere in the document are
//! ignored for forward compatibility. Loading has no side effects beyond
//! the single file read, and a loaded [`Config`] is immutable for the
//! lifetime of the run.
//!
//! Core never sees these types -- it receives a pre-built `SyncPlan` via
//! [`Config::plan`].

pub mod error;
pub mod load;
pub mod schema;
pub mod validate;

pub use error::ConfigError;
pub use schema::{
    Commands, Config, DnsConfig, FilePaths, FortinetConfig, LogLevel, LoggingConfig, SshTarget,
    Timeouts,
};
