//! Rank lookup for one candidate score inside a jabatan/province cohort.

pub mod domain;
pub mod engine;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    display_round, LeaderboardEntry, PassStatus, QueryError, RankOutcome, RankQuery, RankResult,
    CANDIDATE_LABEL,
};
pub use engine::{compute_ranking, DISTRIBUTION_BINS, LEADERBOARD_SIZE};
pub use router::ranking_router;
pub use service::{RankingService, ReferenceView};
