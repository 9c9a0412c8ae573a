use super::NamespaceKind;
use super::wire::{Commit, Pipeline};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The most recent commit of a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSnapshot {
    pub date: DateTime<FixedOffset>,
    pub author: String,
    pub message: String,
}

impl From<Commit> for CommitSnapshot {
    fn from(commit: Commit) -> Self {
        Self {
            date: commit.committed_date,
            author: commit.committer_name,
            message: commit.message,
        }
    }
}

/// Trigger and outcome of the latest pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatus {
    pub source: String,
    pub status: String,
}

impl From<Pipeline> for PipelineStatus {
    fn from(pipeline: Pipeline) -> Self {
        Self {
            source: pipeline.source,
            status: pipeline.status,
        }
    }
}

/// Per-project entry of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProject {
    pub name: String,
    pub description: Option<String>,
    pub open_issues: u64,
    pub last_commit_metadata: Option<CommitSnapshot>,
    pub owned_by_kind: NamespaceKind,
    pub pipeline_metadata: Option<PipelineStatus>,
}

/// Everything learned about one project.
///
/// Name, description and namespace kind come from the listing record, the open
/// issue count from the statistics endpoint, and stars, forks and owner from the
/// detail record. The endpoints are not guaranteed to agree, so the split is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFacts {
    pub project: EnrichedProject,
    pub star_count: u64,
    pub forks_count: Option<u64>,
    pub owner: String,
}

impl ProjectFacts {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.project.name
    }

    #[must_use]
    pub fn into_project(self) -> EnrichedProject {
        self.project
    }
}
