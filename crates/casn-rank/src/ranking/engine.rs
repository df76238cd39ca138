use super::domain::{
    display_round, LeaderboardEntry, PassStatus, RankOutcome, RankResult, CANDIDATE_LABEL,
};
use crate::analytics::{Histogram, ScoreSummary};
use crate::dataset::{JabatanDirectory, Record};

pub const LEADERBOARD_SIZE: usize = 3;
pub const DISTRIBUTION_BINS: usize = 20;

/// Ranks a candidate score against every record sharing the jabatan code and
/// province. Both keys match exactly; nothing is trimmed or case-folded.
pub fn compute_ranking(
    records: &[Record],
    jabatan_code: &str,
    province: &str,
    candidate_score: f64,
) -> RankOutcome {
    let cohort: Vec<&Record> = records
        .iter()
        .filter(|record| record.jabatan_code == jabatan_code && record.province == province)
        .collect();

    let scores: Vec<f64> = cohort.iter().map(|record| record.final_score).collect();
    // Only an empty cohort has no summary.
    let Some(statistics) = ScoreSummary::from_values(&scores) else {
        return RankOutcome::EmptyCohort {
            jabatan_code: jabatan_code.to_string(),
            province: province.to_string(),
        };
    };

    let rank = rank_against(&cohort, candidate_score);
    let quota = resolve_quota(&cohort);
    let status = PassStatus::resolve(rank, quota);

    // Stable, so tied scores keep their source order.
    let mut ordered = cohort.clone();
    ordered.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    let leaderboard = ordered
        .iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            position: index + 1,
            name: record.name.clone(),
            score: display_round(record.final_score),
        })
        .collect();

    let candidate_row = (rank > LEADERBOARD_SIZE).then(|| LeaderboardEntry {
        position: rank,
        name: CANDIDATE_LABEL.to_string(),
        score: candidate_score,
    });

    let cutoff_score = cutoff_score(&ordered, quota);

    RankOutcome::Ranked(RankResult {
        jabatan_code: jabatan_code.to_string(),
        jabatan_label: jabatan_code.to_string(),
        province: province.to_string(),
        candidate_score,
        rank,
        total_count: cohort.len(),
        quota,
        status,
        leaderboard,
        candidate_row,
        cutoff_score,
        statistics,
        distribution: Histogram::from_values(&scores, DISTRIBUTION_BINS),
    })
}

/// Strict comparison: equal scores never push the candidate down.
pub fn rank_against(cohort: &[&Record], candidate_score: f64) -> usize {
    cohort
        .iter()
        .filter(|record| record.final_score > candidate_score)
        .count()
        + 1
}

/// Quota of the first row in the cohort, or 0 when it has none.
pub fn resolve_quota(cohort: &[&Record]) -> u32 {
    cohort
        .first()
        .and_then(|record| record.province_quota)
        .unwrap_or(0)
}

/// `ordered` must be sorted by descending score.
pub fn cutoff_score(ordered: &[&Record], quota: u32) -> Option<f64> {
    let quota = quota as usize;
    if quota == 0 || quota >= ordered.len() {
        return None;
    }
    Some(ordered[quota - 1].final_score)
}

impl RankOutcome {
    /// Replaces the raw jabatan code with its published label.
    pub fn labelled(mut self, directory: &JabatanDirectory) -> Self {
        if let RankOutcome::Ranked(result) = &mut self {
            result.jabatan_label = directory.label_for(&result.jabatan_code).to_string();
        }
        self
    }
}
