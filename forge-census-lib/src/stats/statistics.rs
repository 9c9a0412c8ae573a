use super::Leader;
use serde::{Deserialize, Serialize};

/// Cross-project leaderboard, finalized once the whole listing has been seen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub number_of_projects: u64,

    /// Namespace owning the most projects, with its project count
    pub owner_of_most_repos: Option<Leader>,

    pub most_forked_repo: Option<Leader>,
    pub most_starred_repo: Option<Leader>,
    pub most_open_issues: Option<Leader>,
}
