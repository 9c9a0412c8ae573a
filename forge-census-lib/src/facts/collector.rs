use super::client::Client;
use super::enrichment::Enricher;
use super::paginator;
use super::progress::Progress;
use super::{HarvestConfig, Report};
use crate::Result;
use crate::stats::Aggregator;
use core::sync::atomic::{AtomicU64, Ordering};
use futures_util::stream::{self, StreamExt};
use ohno::{IntoAppError, app_err};
use std::sync::Arc;

const LOG_TARGET: &str = " collector";

/// Drives a harvest: list every project, enrich each one, fold the results into statistics.
pub struct Collector {
    client: Client,
    enricher: Enricher,
    page_size: u8,
    concurrency: usize,
    progress: Arc<dyn Progress>,
}

impl core::fmt::Debug for Collector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collector")
            .field("client", &self.client)
            .field("page_size", &self.page_size)
            .field("concurrency", &self.concurrency)
            .field("progress", &"<dyn Progress>")
            .finish_non_exhaustive()
    }
}

impl Collector {
    pub fn new(config: &HarvestConfig, progress: impl Progress + 'static) -> Result<Self> {
        if config.page_size == 0 {
            return Err(app_err!("page size must be at least 1"));
        }

        if config.concurrency == 0 {
            return Err(app_err!("concurrency must be at least 1"));
        }

        let client = Client::new(&config.base_url, config.token.as_deref())?;

        Ok(Self {
            enricher: Enricher::new(client.clone()),
            client,
            page_size: config.page_size,
            concurrency: config.concurrency,
            progress: Arc::new(progress),
        })
    }

    /// Run the whole pipeline.
    ///
    /// Either every project is listed and enriched, or the first failure is
    /// returned and no report exists.
    pub async fn collect(&self) -> Result<Report> {
        let result = self.harvest().await;
        self.progress.done();
        result
    }

    async fn harvest(&self) -> Result<Report> {
        self.progress.set_phase("Listing");
        let listed = Arc::new(AtomicU64::new(0));
        {
            let listed = Arc::clone(&listed);
            self.progress
                .set_indeterminate(Box::new(move || format!("{} project(s) found", listed.load(Ordering::Relaxed))));
        }

        let projects = paginator::list_all_projects(&self.client, self.page_size, |count| {
            let _ = listed.fetch_add(count as u64, Ordering::Relaxed);
        })
        .await
        .into_app_err("listing projects")?;

        log::info!(target: LOG_TARGET, "Found {} project(s) on {}", projects.len(), self.client.base_url());

        self.progress.set_phase("Enriching");
        let total = projects.len() as u64;
        let completed = Arc::new(AtomicU64::new(0));
        {
            let completed = Arc::clone(&completed);
            self.progress.set_determinate(Box::new(move || {
                let current = completed.load(Ordering::Relaxed);
                (total, current, format!("{current} out of {total} project(s)"))
            }));
        }

        let mut aggregator = Aggregator::new();
        let mut enriched = Vec::with_capacity(projects.len());

        // `buffered` yields in listing order whatever the completion order, which keeps
        // the project list and every tie-break deterministic.
        let mut results = stream::iter(&projects)
            .map(|project| self.enricher.enrich(project))
            .buffered(self.concurrency);

        while let Some(facts) = results.next().await {
            let facts = facts?;
            aggregator.observe(&facts);
            enriched.push(facts.into_project());

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::info!(target: LOG_TARGET, "Enriched {done} out of {total} project(s)");
        }

        Ok(Report {
            projects: enriched,
            statistics: aggregator.finish(),
        })
    }
}
