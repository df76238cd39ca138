//! Immutable exam result dataset plus the reference lists that come with it.

mod jabatan;
mod parser;

pub use jabatan::{JabatanDirectory, JabatanEntry};

use crate::config::DataConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One applicant's exam outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub jabatan_code: String,
    /// SKB test location, used as the applicant's domicile.
    pub province: String,
    pub name: String,
    pub final_score: f64,
    pub skd_score: Option<f64>,
    pub twk: Option<f64>,
    pub tiu: Option<f64>,
    pub tkp: Option<f64>,
    pub province_quota: Option<u32>,
}

impl Record {
    pub fn new(
        jabatan_code: impl Into<String>,
        province: impl Into<String>,
        name: impl Into<String>,
        final_score: f64,
    ) -> Self {
        Self {
            jabatan_code: jabatan_code.into(),
            province: province.into(),
            name: name.into(),
            final_score,
            skd_score: None,
            twk: None,
            tiu: None,
            tkp: None,
            province_quota: None,
        }
    }

    pub fn with_quota(mut self, quota: u32) -> Self {
        self.province_quota = Some(quota);
        self
    }

    pub fn with_skd(mut self, twk: f64, tiu: f64, tkp: f64) -> Self {
        self.twk = Some(twk);
        self.tiu = Some(tiu);
        self.tkp = Some(tkp);
        self.skd_score = Some(twk + tiu + tkp);
        self
    }
}

/// Read-only access to a loaded dataset, so handlers and tests can run
/// against any backing store.
pub trait DatasetProvider: Send + Sync {
    /// Every record, in source order.
    fn records(&self) -> &[Record];
    fn valid_provinces(&self) -> &[String];
    fn valid_jabatan_codes(&self) -> &[String];
    fn jabatan_directory(&self) -> &JabatanDirectory;

    fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            record_count: self.records().len(),
            province_count: self.valid_provinces().len(),
            jabatan_count: self.valid_jabatan_codes().len(),
            loaded_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSnapshot {
    pub record_count: usize,
    pub province_count: usize,
    pub jabatan_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Source files are missing or malformed. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset unavailable: cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset unavailable: failed to read reference list: {0}")]
    Read(#[from] std::io::Error),
    #[error("dataset unavailable: malformed results CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset unavailable: nilai_akhir {value} on line {line} is not a finite number")]
    InvalidScore { line: usize, value: f64 },
    #[error("dataset unavailable: kuota_provinsi {value} on line {line} is not a non-negative integer")]
    InvalidQuota { line: usize, value: f64 },
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    provinces: Vec<String>,
    jabatan_codes: Vec<String>,
    directory: JabatanDirectory,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn load(config: &DataConfig) -> Result<Self, DatasetError> {
        let records = open(&config.records_path())?;
        let provinces = open(&config.province_list_path())?;
        let jabatan = open(&config.jabatan_list_path())?;

        let dataset = Self::from_readers(records, provinces, jabatan)?;
        info!(
            records = dataset.records.len(),
            provinces = dataset.provinces.len(),
            jabatan = dataset.jabatan_codes.len(),
            directory = %config.directory.display(),
            "exam result dataset loaded"
        );
        Ok(dataset)
    }

    /// Jabatan list lines may hold either codes or labels; both end up as codes.
    pub fn from_readers<C, P, J>(records: C, provinces: P, jabatan: J) -> Result<Self, DatasetError>
    where
        C: Read,
        P: Read,
        J: Read,
    {
        let records = parser::parse_records(records)?;
        let provinces = parser::parse_list(BufReader::new(provinces))?;
        let directory = JabatanDirectory::standard();
        let jabatan_codes = parser::parse_list(BufReader::new(jabatan))?
            .iter()
            .map(|entry| directory.code_for(entry).to_string())
            .collect();

        Ok(Self::from_parts(records, provinces, jabatan_codes, directory))
    }

    pub fn from_parts(
        records: Vec<Record>,
        provinces: Vec<String>,
        jabatan_codes: Vec<String>,
        directory: JabatanDirectory,
    ) -> Self {
        for (jabatan_code, province) in inconsistent_quota_groups(&records) {
            warn!(
                %jabatan_code,
                %province,
                "kuota_provinsi differs within one jabatan/province group; the first row wins"
            );
        }

        Self {
            records,
            provinces,
            jabatan_codes,
            directory,
            loaded_at: Utc::now(),
        }
    }
}

impl DatasetProvider for Dataset {
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

    fn snapshot(&self) -> DatasetSnapshot {
        DatasetSnapshot {
            record_count: self.records.len(),
            province_count: self.provinces.len(),
            jabatan_count: self.jabatan_codes.len(),
            loaded_at: Some(self.loaded_at),
        }
    }
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Jabatan/province groups whose rows disagree on `kuota_provinsi`.
pub fn inconsistent_quota_groups(records: &[Record]) -> Vec<(String, String)> {
    let mut first_seen: HashMap<(&str, &str), Option<u32>> = HashMap::new();
    let mut flagged = Vec::new();

    for record in records {
        let key = (record.jabatan_code.as_str(), record.province.as_str());
        match first_seen.get(&key) {
            None => {
                first_seen.insert(key, record.province_quota);
            }
            Some(&quota) if quota != record.province_quota => {
                let group = (key.0.to_string(), key.1.to_string());
                if !flagged.contains(&group) {
                    flagged.push(group);
                }
            }
            Some(_) => {}
        }
    }

    flagged
}
