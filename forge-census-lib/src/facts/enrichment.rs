use super::client::{Auth, Client, Fetched};
use super::wire::{Commit, IssuesStatistics, Pipeline, ProjectDetail};
use super::{CommitSnapshot, EnrichedProject, PipelineStatus, Project, ProjectFacts, TransportError};
use crate::Result;
use ohno::IntoAppError;
use reqwest::StatusCode;

const LOG_TARGET: &str = "    enrich";

/// Issues the per-project lookups and folds them into [`ProjectFacts`]
#[derive(Debug, Clone)]
pub struct Enricher {
    client: Client,
}

impl Enricher {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Gather the facts for a single project.
    ///
    /// The four lookups run one after another. A project without commits or
    /// without pipelines is fine; any other failure is fatal.
    pub async fn enrich(&self, project: &Project) -> Result<ProjectFacts> {
        let id = project.id;
        log::debug!(target: LOG_TARGET, "Enriching project {project}");

        let last_commit = self
            .last_commit(id)
            .await
            .into_app_err_with(|| format!("fetching latest commit for project {project}"))?;

        let open_issues = self
            .open_issues(id)
            .await
            .into_app_err_with(|| format!("fetching issue statistics for project {project}"))?;

        let pipeline = self
            .latest_pipeline(id)
            .await
            .into_app_err_with(|| format!("fetching latest pipeline for project {project}"))?;

        let detail = self
            .detail(id)
            .await
            .into_app_err_with(|| format!("fetching details for project {project}"))?;

        Ok(ProjectFacts {
            project: EnrichedProject {
                name: project.name.clone(),
                description: project.description.clone(),
                open_issues,
                last_commit_metadata: last_commit,
                owned_by_kind: project.namespace.kind,
                pipeline_metadata: pipeline,
            },
            star_count: detail.star_count,
            forks_count: detail.forks_count,
            owner: detail.namespace.name,
        })
    }

    /// Most recent commit; `None` for projects with an empty repository
    async fn last_commit(&self, id: u64) -> Result<Option<CommitSnapshot>, TransportError> {
        let url = self.client.url(&format!("/projects/{id}/repository/commits"));
        let commits: Fetched<Vec<Commit>> = self.client.fetch(&url, Some(StatusCode::NOT_FOUND), Auth::Anonymous).await?;

        Ok(commits
            .into_option()
            .and_then(|commits| commits.into_iter().next())
            .map(CommitSnapshot::from))
    }

    async fn open_issues(&self, id: u64) -> Result<u64, TransportError> {
        let url = self.client.url(&format!("/projects/{id}/issues_statistics"));
        let stats: IssuesStatistics = self.client.fetch_required(&url, Auth::Anonymous).await?;
        Ok(stats.statistics.counts.opened)
    }

    /// Latest pipeline; GitLab answers 403 when the project has none configured
    async fn latest_pipeline(&self, id: u64) -> Result<Option<PipelineStatus>, TransportError> {
        let url = self.client.url(&format!("/projects/{id}/pipelines/latest"));
        let pipeline: Fetched<Pipeline> = self.client.fetch(&url, Some(StatusCode::FORBIDDEN), Auth::Token).await?;
        Ok(pipeline.into_option().map(PipelineStatus::from))
    }

    async fn detail(&self, id: u64) -> Result<ProjectDetail, TransportError> {
        let url = self.client.url(&format!("/projects/{id}?simple=false"));
        self.client.fetch_required(&url, Auth::Token).await
    }
}
