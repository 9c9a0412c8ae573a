use super::leader::challenge;
use super::{AggregateStatistics, Leader};
use crate::facts::ProjectFacts;
use std::collections::HashMap;

const LOG_TARGET: &str = "     stats";

#[derive(Debug, Clone, Copy)]
struct OwnerTally {
    count: u64,

    /// Position in the stream at which this owner first appeared
    first_seen: u64,
}

/// Streaming reducer over enriched projects.
///
/// Each project is observed exactly once and never revisited. Leaders are
/// updated in place; the owner with the most projects is only decided in
/// [`finish`](Self::finish), since later projects can still overtake.
#[derive(Debug, Default)]
pub struct Aggregator {
    total: u64,
    owners: HashMap<String, OwnerTally>,
    most_forked: Option<Leader>,
    most_starred: Option<Leader>,
    most_open_issues: Option<Leader>,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of projects observed so far
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Fold one project into the running statistics.
    ///
    /// Projects must be observed in listing order for the owner tie-break to
    /// follow the listing.
    pub fn observe(&mut self, facts: &ProjectFacts) {
        let position = self.total;
        self.total += 1;

        let tally = self.owners.entry(facts.owner.clone()).or_insert(OwnerTally {
            count: 0,
            first_seen: position,
        });
        tally.count += 1;

        let name = facts.name();

        if challenge(&mut self.most_open_issues, name, facts.project.open_issues) {
            log::debug!(target: LOG_TARGET, "'{name}' now has the most open issues ({})", facts.project.open_issues);
        }

        if challenge(&mut self.most_starred, name, facts.star_count) {
            log::debug!(target: LOG_TARGET, "'{name}' is now the most starred project ({})", facts.star_count);
        }

        if let Some(forks) = facts.forks_count
            && challenge(&mut self.most_forked, name, forks)
        {
            log::debug!(target: LOG_TARGET, "'{name}' is now the most forked project ({forks})");
        }
    }

    /// Close the stream and produce the final statistics.
    ///
    /// Among owners sharing the highest count, the one that appeared first wins.
    #[must_use]
    pub fn finish(self) -> AggregateStatistics {
        let owner_of_most_repos = self
            .owners
            .into_iter()
            .max_by(|(_, a), (_, b)| a.count.cmp(&b.count).then_with(|| b.first_seen.cmp(&a.first_seen)))
            .map(|(name, tally)| Leader::new(name, tally.count));

        AggregateStatistics {
            number_of_projects: self.total,
            owner_of_most_repos,
            most_forked_repo: self.most_forked,
            most_starred_repo: self.most_starred,
            most_open_issues: self.most_open_issues,
        }
    }
}
