//! Harvesting of per-project facts from a GitLab-style REST API
//!
//! # Implementation Model
//!
//! The pipeline is strictly linear:
//!
//! - **Listing**: [`paginator`] walks the keyset-paginated `/projects` endpoint,
//!   following `Link: rel="next"` until the server stops providing one.
//! - **Enrichment**: [`Enricher`] issues four lookups per project (latest commit,
//!   open issue count, latest pipeline, full detail). A missing commit history
//!   (404) or missing pipeline (403) is an expected absence and becomes `None`.
//! - **Aggregation**: results are folded into [`crate::stats::Aggregator`] in
//!   listing order.
//!
//! The [`Collector`] ties the three together and produces a [`Report`]. Any
//! [`TransportError`] aborts the run; there is no partial report.

mod client;
mod collector;
mod enriched_project;
mod enrichment;
mod harvest_config;
pub mod paginator;
mod progress;
mod project;
mod report;
mod transport_error;
mod wire;

pub use client::{Auth, Client, Fetched};
pub use collector::Collector;
pub use enriched_project::{CommitSnapshot, EnrichedProject, PipelineStatus, ProjectFacts};
pub use enrichment::Enricher;
pub use harvest_config::HarvestConfig;
pub use progress::Progress;
pub use project::{Namespace, NamespaceKind, Project};
pub use report::Report;
pub use transport_error::{TransportError, TransportErrorKind};
