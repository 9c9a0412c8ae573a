//! Command-line interface for census
//!
//! # Commands
//!
//! - **harvest**: list every project of the configured instance, enrich each one,
//!   aggregate statistics and emit the report as JSON or YAML
//! - **init**: write a default `census.toml`
//!
//! Settings resolve in order: command-line flags, then the configuration file,
//! then built-in defaults. The access token is never read from the file; it
//! comes from `--token` or the `GITLAB_TOKEN` environment variable.

mod common;
mod config;
mod harvest;
mod host;
mod init;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use harvest::{HarvestArgs, process_harvest};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
