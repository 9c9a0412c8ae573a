//! Response bodies of the per-project enrichment endpoints, trimmed to the fields we read.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// One entry of `/projects/{id}/repository/commits`
#[derive(Debug, Deserialize)]
pub struct Commit {
    pub committed_date: DateTime<FixedOffset>,
    pub committer_name: String,
    pub message: String,
}

/// Body of `/projects/{id}/issues_statistics`
#[derive(Debug, Deserialize)]
pub struct IssuesStatistics {
    pub statistics: IssueStatisticsBody,
}

#[derive(Debug, Deserialize)]
pub struct IssueStatisticsBody {
    pub counts: IssueCounts,
}

#[derive(Debug, Deserialize)]
pub struct IssueCounts {
    pub opened: u64,
}

/// Body of `/projects/{id}/pipelines/latest`
#[derive(Debug, Deserialize)]
pub struct Pipeline {
    pub source: String,
    pub status: String,
}

/// Body of `/projects/{id}?simple=false`
#[derive(Debug, Deserialize)]
pub struct ProjectDetail {
    pub star_count: u64,

    /// Missing when forking is disallowed for the caller or the project is archived
    #[serde(default)]
    pub forks_count: Option<u64>,

    pub namespace: DetailNamespace,
}

#[derive(Debug, Deserialize)]
pub struct DetailNamespace {
    pub name: String,
}
