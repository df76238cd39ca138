use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{QueryError, RankOutcome, RankQuery};
use super::engine::compute_ranking;
use crate::analytics::{
    AnalyticsOutcome, DistributionFilter, DistributionReport, ProvinceDetail,
};
use crate::dataset::{DatasetProvider, DatasetSnapshot, JabatanEntry};

/// Valid selections for the rank form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceView {
    pub provinces: Vec<String>,
    pub jabatan: Vec<JabatanEntry>,
}

/// Query entry point shared by the HTTP routes and the CLI. Holds the loaded
/// dataset and never mutates it.
pub struct RankingService<P> {
    provider: Arc<P>,
}

impl<P> RankingService<P>
where
    P: DatasetProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn rank(&self, query: &RankQuery) -> RankOutcome {
        let outcome = compute_ranking(
            self.provider.records(),
            &query.jabatan_code,
            &query.province,
            query.candidate_score,
        )
        .labelled(self.provider.jabatan_directory());

        debug!(
            jabatan = %query.jabatan_code,
            province = %query.province,
            empty_cohort = outcome.is_empty_cohort(),
            "rank query served"
        );
        outcome
    }

    /// Looks the job position up by its label, falling back to treating the
    /// label as a code.
    pub fn rank_by_label(
        &self,
        jabatan_label: &str,
        province: &str,
        candidate_score: f64,
    ) -> Result<RankOutcome, QueryError> {
        let code = self.provider.jabatan_directory().code_for(jabatan_label);
        let query = RankQuery::new(code, province, candidate_score)?;
        Ok(self.rank(&query))
    }

    pub fn distribution(&self, filter: &DistributionFilter) -> AnalyticsOutcome<DistributionReport> {
        DistributionReport::build(
            self.provider.records(),
            self.provider.jabatan_directory(),
            filter,
        )
    }

    pub fn province_detail(
        &self,
        filter: &DistributionFilter,
        province: &str,
        bins: Option<usize>,
    ) -> AnalyticsOutcome<ProvinceDetail> {
        ProvinceDetail::build(self.provider.records(), filter, province, bins)
    }

    /// Builds a filter from job-position labels.
    pub fn filter_from_labels<S: AsRef<str>>(
        &self,
        provinces: Vec<String>,
        jabatan_labels: &[S],
    ) -> DistributionFilter {
        let directory = self.provider.jabatan_directory();
        DistributionFilter {
            provinces,
            jabatan_codes: jabatan_labels
                .iter()
                .map(|label| directory.code_for(label.as_ref()).to_string())
                .collect(),
        }
    }

    pub fn reference(&self) -> ReferenceView {
        let directory = self.provider.jabatan_directory();
        ReferenceView {
            provinces: self.provider.valid_provinces().to_vec(),
            jabatan: self
                .provider
                .valid_jabatan_codes()
                .iter()
                .map(|code| JabatanEntry {
                    code: code.clone(),
                    label: directory.label_for(code).to_string(),
                })
                .collect(),
        }
    }

    pub fn snapshot(&self) -> DatasetSnapshot {
        self.provider.snapshot()
    }
}
