#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for census
//!
//! Harvests every project visible on a GitLab instance, enriches each with
//! commit, issue, pipeline and detail lookups, and folds the results into
//! instance-wide statistics.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Listing and per-project enrichment over HTTP
//! - [`stats`]: Aggregate statistics over enriched projects
//! - [`reports`]: Report rendering as JSON or YAML

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod facts;
#[cfg(not(any(debug_assertions, test)))]
mod facts;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod stats;
#[cfg(not(any(debug_assertions, test)))]
mod stats;

pub use crate::commands::{Host, run};
