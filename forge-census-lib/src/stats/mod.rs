//! Cross-project leaderboard statistics
//!
//! The [`Aggregator`] consumes enriched projects one at a time, in listing
//! order, and never looks back. Per-metric leaders ([`Leader`]) change hands
//! only on a strictly greater count. The owner with the most projects is
//! decided once the stream ends, when [`Aggregator::finish`] yields the
//! [`AggregateStatistics`].

mod aggregator;
mod leader;
mod statistics;

pub use aggregator::Aggregator;
pub use leader::Leader;
pub use statistics::AggregateStatistics;
