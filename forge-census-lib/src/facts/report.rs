use super::EnrichedProject;
use crate::stats::AggregateStatistics;
use serde::{Deserialize, Serialize};

/// The complete outcome of a harvest: every project in listing order, plus the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub projects: Vec<EnrichedProject>,
    pub statistics: AggregateStatistics,
}
