use super::histogram::Histogram;
use super::stats::{mean, quantile, sample_std_dev, sorted, ScoreSummary};
use crate::dataset::{JabatanDirectory, Record};
use serde::Serialize;

/// Published SKD passing grade, drawn as a reference line on histograms.
pub const SKD_PASSING_GRADE: f64 = 301.0;
pub const DEFAULT_HISTOGRAM_BINS: usize = 15;
pub const MIN_HISTOGRAM_BINS: usize = 5;
pub const MAX_HISTOGRAM_BINS: usize = 30;

/// Either a computed report or the note that nothing matched the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnalyticsOutcome<T> {
    Report(T),
    EmptyCohort,
}

impl<T> AnalyticsOutcome<T> {
    pub fn report(self) -> Option<T> {
        match self {
            Self::Report(report) => Some(report),
            Self::EmptyCohort => None,
        }
    }
}

/// Multi-select filter; an empty list leaves that axis unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionFilter {
    pub provinces: Vec<String>,
    pub jabatan_codes: Vec<String>,
}

impl DistributionFilter {
    pub fn matches(&self, record: &Record) -> bool {
        (self.provinces.is_empty() || self.provinces.contains(&record.province))
            && (self.jabatan_codes.is_empty() || self.jabatan_codes.contains(&record.jabatan_code))
    }

    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceBoxPlot {
    pub province: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentAverages {
    pub province: String,
    pub twk: Option<f64>,
    pub tiu: Option<f64>,
    pub tkp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JabatanComparison {
    pub jabatan_code: String,
    pub jabatan_label: String,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// SKD score distribution across the filtered provinces and job positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionReport {
    pub record_count: usize,
    pub skd: Option<ScoreSummary>,
    /// Empty unless more than one province is present.
    pub province_boxplots: Vec<ProvinceBoxPlot>,
    pub component_averages: Vec<ComponentAverages>,
    /// Empty unless more than one job position is being compared.
    pub jabatan_comparison: Vec<JabatanComparison>,
}

impl DistributionReport {
    pub fn build(
        records: &[Record],
        directory: &JabatanDirectory,
        filter: &DistributionFilter,
    ) -> AnalyticsOutcome<Self> {
        let selected = filter.apply(records);
        if selected.is_empty() {
            return AnalyticsOutcome::EmptyCohort;
        }

        let skd: Vec<f64> = selected.iter().filter_map(|r| r.skd_score).collect();
        let provinces = group_by(&selected, |record| record.province.as_str());
        let jabatan = group_by(&selected, |record| record.jabatan_code.as_str());

        let province_boxplots = if provinces.len() > 1 {
            province_boxplots(&provinces)
        } else {
            Vec::new()
        };

        let compare_jabatan = if filter.jabatan_codes.is_empty() {
            jabatan.len() > 1
        } else {
            filter.jabatan_codes.len() > 1
        };
        let jabatan_comparison = if compare_jabatan {
            jabatan_comparison(&jabatan, directory)
        } else {
            Vec::new()
        };

        AnalyticsOutcome::Report(Self {
            record_count: selected.len(),
            skd: ScoreSummary::from_values(&skd),
            province_boxplots,
            component_averages: component_averages(&provinces),
            jabatan_comparison,
        })
    }
}

/// SKD histogram and spread for one province inside the current filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceDetail {
    pub province: String,
    pub participant_count: usize,
    pub skd_mean: Option<f64>,
    pub skd_std_dev: Option<f64>,
    pub histogram: Histogram,
    pub passing_grade: f64,
}

impl ProvinceDetail {
    /// `bins` is clamped to the supported range; `None` picks the default.
    pub fn build(
        records: &[Record],
        filter: &DistributionFilter,
        province: &str,
        bins: Option<usize>,
    ) -> AnalyticsOutcome<Self> {
        let rows: Vec<&Record> = filter
            .apply(records)
            .into_iter()
            .filter(|record| record.province == province)
            .collect();
        if rows.is_empty() {
            return AnalyticsOutcome::EmptyCohort;
        }

        let bins = bins
            .unwrap_or(DEFAULT_HISTOGRAM_BINS)
            .clamp(MIN_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS);
        let skd: Vec<f64> = rows.iter().filter_map(|r| r.skd_score).collect();

        AnalyticsOutcome::Report(Self {
            province: province.to_string(),
            participant_count: rows.len(),
            skd_mean: mean(&skd),
            skd_std_dev: sample_std_dev(&skd),
            histogram: Histogram::from_values(&skd, bins),
            passing_grade: SKD_PASSING_GRADE,
        })
    }
}

/// Groups in order of first appearance.
fn group_by<'a, F>(records: &[&'a Record], key: F) -> Vec<(&'a str, Vec<&'a Record>)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: Vec<(&'a str, Vec<&'a Record>)> = Vec::new();
    for &record in records {
        let name = key(record);
        match groups.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, members)) => members.push(record),
            None => groups.push((name, vec![record])),
        }
    }
    groups
}

fn province_boxplots(groups: &[(&str, Vec<&Record>)]) -> Vec<ProvinceBoxPlot> {
    let mut plots: Vec<ProvinceBoxPlot> = groups
        .iter()
        .filter_map(|(province, members)| {
            let values = sorted(&members.iter().filter_map(|r| r.skd_score).collect::<Vec<_>>());
            Some(ProvinceBoxPlot {
                province: province.to_string(),
                count: values.len(),
                min: *values.first()?,
                q1: quantile(&values, 0.25)?,
                median: quantile(&values, 0.5)?,
                q3: quantile(&values, 0.75)?,
                max: *values.last()?,
            })
        })
        .collect();
    plots.sort_by(|a, b| b.median.total_cmp(&a.median));
    plots
}

fn component_averages(groups: &[(&str, Vec<&Record>)]) -> Vec<ComponentAverages> {
    groups
        .iter()
        .map(|(province, members)| {
            let average = |component: fn(&Record) -> Option<f64>| {
                mean(&members.iter().filter_map(|r| component(r)).collect::<Vec<_>>())
            };
            ComponentAverages {
                province: province.to_string(),
                twk: average(|r| r.twk),
                tiu: average(|r| r.tiu),
                tkp: average(|r| r.tkp),
            }
        })
        .collect()
}

fn jabatan_comparison(
    groups: &[(&str, Vec<&Record>)],
    directory: &JabatanDirectory,
) -> Vec<JabatanComparison> {
    let mut rows: Vec<JabatanComparison> = groups
        .iter()
        .filter_map(|(code, members)| {
            let values: Vec<f64> = members.iter().filter_map(|r| r.skd_score).collect();
            let summary = ScoreSummary::from_values(&values)?;
            Some(JabatanComparison {
                jabatan_code: code.to_string(),
                jabatan_label: directory.label_for(code).to_string(),
                mean: summary.mean,
                median: summary.median,
                min: summary.min,
                max: summary.max,
                count: values.len(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new("app", "JAKARTA", "A", 82.0).with_skd(110.0, 150.0, 160.0),
            Record::new("app", "JAKARTA", "B", 79.0).with_skd(95.0, 135.0, 168.0),
            Record::new("app", "JAWA BARAT", "C", 80.0).with_skd(100.0, 140.0, 165.0),
            Record::new("pk", "JAKARTA", "D", 70.0).with_skd(85.0, 110.0, 155.0),
            Record::new("pk", "BALI", "E", 68.0),
        ]
    }

    #[test]
    fn empty_filter_selects_everything() {
        let filter = DistributionFilter::default();
        assert_eq!(filter.apply(&records()).len(), 5);
    }

    #[test]
    fn single_province_skips_boxplots() {
        let filter = DistributionFilter {
            provinces: vec!["JAKARTA".to_string()],
            jabatan_codes: Vec::new(),
        };
        let report = DistributionReport::build(&records(), &JabatanDirectory::standard(), &filter)
            .report()
            .expect("report");
        assert_eq!(report.record_count, 3);
        assert!(report.province_boxplots.is_empty());
        assert_eq!(report.component_averages.len(), 1);
        assert_eq!(report.component_averages[0].twk, Some((110.0 + 95.0 + 85.0) / 3.0));
        assert_eq!(report.jabatan_comparison.len(), 2);
    }

    #[test]
    fn single_selected_jabatan_skips_comparison() {
        let filter = DistributionFilter {
            provinces: Vec::new(),
            jabatan_codes: vec!["app".to_string()],
        };
        let report = DistributionReport::build(&records(), &JabatanDirectory::standard(), &filter)
            .report()
            .expect("report");
        assert!(report.jabatan_comparison.is_empty());
        assert_eq!(report.province_boxplots.len(), 2);
    }

    #[test]
    fn provinces_without_skd_are_left_out_of_boxplots() {
        let report = DistributionReport::build(
            &records(),
            &JabatanDirectory::standard(),
            &DistributionFilter::default(),
        )
        .report()
        .expect("report");
        assert!(report
            .province_boxplots
            .iter()
            .all(|plot| plot.province != "BALI"));
        let bali = report
            .component_averages
            .iter()
            .find(|row| row.province == "BALI")
            .expect("bali averages");
        assert_eq!(bali.twk, None);
    }

    #[test]
    fn unmatched_filter_is_an_empty_cohort() {
        let filter = DistributionFilter {
            provinces: vec!["jakarta".to_string()],
            jabatan_codes: Vec::new(),
        };
        assert_eq!(
            DistributionReport::build(&records(), &JabatanDirectory::standard(), &filter),
            AnalyticsOutcome::EmptyCohort
        );
    }

    #[test]
    fn province_detail_clamps_bins() {
        let detail = ProvinceDetail::build(
            &records(),
            &DistributionFilter::default(),
            "JAKARTA",
            Some(100),
        )
        .report()
        .expect("detail");
        assert_eq!(detail.participant_count, 3);
        assert_eq!(detail.histogram.bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(detail.histogram.total(), 3);
        assert_eq!(detail.passing_grade, SKD_PASSING_GRADE);
        assert!(detail.skd_std_dev.is_some());

        let single = ProvinceDetail::build(&records(), &DistributionFilter::default(), "BALI", None)
            .report()
            .expect("detail");
        assert_eq!(single.skd_mean, None);
        assert_eq!(single.skd_std_dev, None);
        assert!(single.histogram.bins.is_empty());
    }
}
