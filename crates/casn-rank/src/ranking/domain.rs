use crate::analytics::{Histogram, ScoreSummary};
use serde::Serialize;

/// Name shown on the candidate's own row below the leaderboard.
pub const CANDIDATE_LABEL: &str = "Anda";

/// One rank lookup: which cohort to compare against and the candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankQuery {
    pub jabatan_code: String,
    pub province: String,
    pub candidate_score: f64,
}

impl RankQuery {
    pub fn new(
        jabatan_code: impl Into<String>,
        province: impl Into<String>,
        candidate_score: f64,
    ) -> Result<Self, QueryError> {
        if !candidate_score.is_finite() {
            return Err(QueryError::NonFiniteScore(candidate_score));
        }

        Ok(Self {
            jabatan_code: jabatan_code.into(),
            province: province.into(),
            candidate_score,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("score must be a finite number, got {0}")]
    NonFiniteScore(f64),
}

/// Where the candidate stands against the cohort's quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStatus {
    Passed,
    Failed,
    /// The dataset carries no usable quota for this cohort.
    QuotaUnavailable,
}

impl PassStatus {
    /// A quota of 0 is indistinguishable from a missing one.
    pub const fn resolve(rank: usize, quota: u32) -> Self {
        if quota == 0 {
            Self::QuotaUnavailable
        } else if rank <= quota as usize {
            Self::Passed
        } else {
            Self::Failed
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "Within quota",
            Self::Failed => "Outside quota",
            Self::QuotaUnavailable => "Quota unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub name: String,
    /// Rounded to three decimals for display.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResult {
    pub jabatan_code: String,
    pub jabatan_label: String,
    pub province: String,
    pub candidate_score: f64,
    /// One more than the number of strictly higher scores.
    pub rank: usize,
    pub total_count: usize,
    /// 0 when the cohort has no quota on record.
    pub quota: u32,
    pub status: PassStatus,
    pub leaderboard: Vec<LeaderboardEntry>,
    /// The candidate's own row, present once they fall outside the leaderboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_row: Option<LeaderboardEntry>,
    /// Score of the last applicant admitted under the quota.
    pub cutoff_score: Option<f64>,
    pub statistics: ScoreSummary,
    pub distribution: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RankOutcome {
    Ranked(RankResult),
    /// No records for this jabatan/province pair.
    EmptyCohort {
        jabatan_code: String,
        province: String,
    },
}

impl RankOutcome {
    pub fn ranked(self) -> Option<RankResult> {
        match self {
            Self::Ranked(result) => Some(result),
            Self::EmptyCohort { .. } => None,
        }
    }

    pub fn is_empty_cohort(&self) -> bool {
        matches!(self, Self::EmptyCohort { .. })
    }
}

/// Half-to-even at the third decimal, the way tabular exports round.
pub fn display_round(score: f64) -> f64 {
    (score * 1000.0).round_ties_even() / 1000.0
}
