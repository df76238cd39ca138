use super::{DatasetError, Record};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{BufRead, Read};

/// Header line plus the first data line.
const FIRST_DATA_LINE: usize = 2;

/// Only column names are trimmed; cell values are kept byte-for-byte so cohort
/// matching stays exact.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for (offset, raw) in csv_reader.records().enumerate() {
        let raw = raw?;
        let line = raw
            .position()
            .map_or(offset + FIRST_DATA_LINE, |position| position.line() as usize);
        let row: ResultRow = raw.deserialize(Some(&headers))?;
        records.push(row.into_record(line)?);
    }

    Ok(records)
}

/// Newline-delimited reference list; lines are trimmed, blanks and repeats dropped.
pub(crate) fn parse_list<R: BufRead>(reader: R) -> Result<Vec<String>, std::io::Error> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let value = line.trim().trim_start_matches('\u{feff}');
        if value.is_empty() || !seen.insert(value.to_string()) {
            continue;
        }
        values.push(value.to_string());
    }

    Ok(values)
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    jabatan: String,
    #[serde(rename = "LOKASI_SKB")]
    lokasi_skb: String,
    #[serde(default)]
    nama: String,
    nilai_akhir: f64,
    #[serde(default)]
    nilai_skd: Option<f64>,
    #[serde(default)]
    twk: Option<f64>,
    #[serde(default)]
    tiu: Option<f64>,
    #[serde(default)]
    tkp: Option<f64>,
    #[serde(default)]
    kuota_provinsi: Option<f64>,
}

impl ResultRow {
    fn into_record(self, line: usize) -> Result<Record, DatasetError> {
        if !self.nilai_akhir.is_finite() {
            return Err(DatasetError::InvalidScore {
                line,
                value: self.nilai_akhir,
            });
        }

        let province_quota = self
            .kuota_provinsi
            .map(|value| quota_from_cell(value).ok_or(DatasetError::InvalidQuota { line, value }))
            .transpose()?;

        Ok(Record {
            jabatan_code: self.jabatan,
            province: self.lokasi_skb,
            name: self.nama,
            final_score: self.nilai_akhir,
            skd_score: self.nilai_skd.filter(|value| value.is_finite()),
            twk: self.twk.filter(|value| value.is_finite()),
            tiu: self.tiu.filter(|value| value.is_finite()),
            tkp: self.tkp.filter(|value| value.is_finite()),
            province_quota,
        })
    }
}

/// Exports of nullable integer columns write `3` as `3.0`.
fn quota_from_cell(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX)
    {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn quota_for_tests(value: f64) -> Option<u32> {
    quota_from_cell(value)
}
