use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::dataset::{DatasetProvider, JabatanDirectory, Record};
use crate::ranking::{ranking_router, RankingService};

/// In-memory provider so tests can hand-pick the cohort.
pub(super) struct StaticDataset {
    records: Vec<Record>,
    provinces: Vec<String>,
    jabatan_codes: Vec<String>,
    directory: JabatanDirectory,
}

impl StaticDataset {
    pub(super) fn new(records: Vec<Record>) -> Self {
        let mut provinces: Vec<String> = Vec::new();
        let mut jabatan_codes: Vec<String> = Vec::new();
        for record in &records {
            if !provinces.contains(&record.province) {
                provinces.push(record.province.clone());
            }
            if !jabatan_codes.contains(&record.jabatan_code) {
                jabatan_codes.push(record.jabatan_code.clone());
            }
        }

        Self {
            records,
            provinces,
            jabatan_codes,
            directory: JabatanDirectory::standard(),
        }
    }
}

impl DatasetProvider for StaticDataset {
    fn records(&self) -> &[Record] {
        &self.records
    }

    fn valid_provinces(&self) -> &[String] {
        &self.provinces
    }

    fn valid_jabatan_codes(&self) -> &[String] {
        &self.jabatan_codes
    }

    fn jabatan_directory(&self) -> &JabatanDirectory {
        &self.directory
    }
}

/// A 90, B 85, C 80 competing for two `app` seats in JAKARTA.
pub(super) fn three_way_cohort() -> Vec<Record> {
    vec![
        Record::new("app", "JAKARTA", "A", 90.0).with_quota(2),
        Record::new("app", "JAKARTA", "B", 85.0).with_quota(2),
        Record::new("app", "JAKARTA", "C", 80.0).with_quota(2),
    ]
}

pub(super) fn mixed_records() -> Vec<Record> {
    let mut records = three_way_cohort();
    records.extend([
        Record::new("app", "JAWA BARAT", "D", 88.0).with_quota(1),
        Record::new("pk", "JAKARTA", "E", 71.0).with_skd(90.0, 115.0, 157.0),
        Record::new("pk", "JAKARTA", "F", 70.0).with_skd(85.0, 110.0, 155.0),
        Record::new("app", "JAWA TENGAH", "G", 77.0).with_quota(0),
    ]);
    records
}

pub(super) fn build_service(records: Vec<Record>) -> Arc<RankingService<StaticDataset>> {
    Arc::new(RankingService::new(Arc::new(StaticDataset::new(records))))
}

pub(super) fn router_with(records: Vec<Record>) -> axum::Router {
    ranking_router(build_service(records))
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
