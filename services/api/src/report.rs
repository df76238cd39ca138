use casn_rank::analytics::{AnalyticsOutcome, DistributionReport, Histogram, ProvinceDetail};
use casn_rank::ranking::{RankOutcome, ReferenceView};
use std::fmt;

/// Plain-text rank report.
pub(crate) struct RankReport<'a>(pub(crate) &'a RankOutcome);

impl fmt::Display for RankReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.0 {
            RankOutcome::Ranked(result) => result,
            RankOutcome::EmptyCohort {
                jabatan_code,
                province,
            } => {
                return writeln!(
                    f,
                    "No results recorded for jabatan {jabatan_code} in {province}."
                );
            }
        };

        writeln!(f, "Rank report")?;
        writeln!(
            f,
            "Jabatan: {} ({})",
            result.jabatan_label, result.jabatan_code
        )?;
        writeln!(f, "Province: {}", result.province)?;
        writeln!(f, "Your score: {:.3}", result.candidate_score)?;
        writeln!(f, "Rank: {} of {}", result.rank, result.total_count)?;
        if result.quota == 0 {
            writeln!(f, "Quota: unknown")?;
        } else {
            writeln!(f, "Quota: {}", result.quota)?;
        }
        writeln!(f, "Status: {}", result.status.label())?;
        match result.cutoff_score {
            Some(cutoff) => writeln!(f, "Cutoff score: {cutoff:.3}")?,
            None => writeln!(f, "Cutoff score: n/a")?,
        }

        writeln!(f, "\nLeaderboard")?;
        for entry in result.leaderboard.iter().chain(&result.candidate_row) {
            writeln!(f, "{}. {} {:.3}", entry.position, entry.name, entry.score)?;
        }

        let stats = &result.statistics;
        writeln!(f, "\nStatistics")?;
        writeln!(
            f,
            "max {:.3} | mean {:.3} | median {:.3} | min {:.3}",
            stats.max, stats.mean, stats.median, stats.min
        )?;

        writeln!(f, "\nScore distribution")?;
        write_histogram(f, &result.distribution, Some(result.candidate_score))
    }
}

pub(crate) struct DistributionView<'a>(pub(crate) &'a AnalyticsOutcome<DistributionReport>);

impl fmt::Display for DistributionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = match self.0 {
            AnalyticsOutcome::Report(report) => report,
            AnalyticsOutcome::EmptyCohort => {
                return writeln!(f, "No results match the selected filters.");
            }
        };

        writeln!(f, "SKD distribution ({} participants)", report.record_count)?;
        match &report.skd {
            Some(skd) => writeln!(
                f,
                "max {:.3} | mean {:.3} | median {:.3} | min {:.3}",
                skd.max, skd.mean, skd.median, skd.min
            )?,
            None => writeln!(f, "No SKD scores recorded.")?,
        }

        if !report.province_boxplots.is_empty() {
            writeln!(f, "\nProvinces by median SKD")?;
            for plot in &report.province_boxplots {
                writeln!(
                    f,
                    "- {}: min {:.1} | q1 {:.1} | median {:.1} | q3 {:.1} | max {:.1} ({} scores)",
                    plot.province, plot.min, plot.q1, plot.median, plot.q3, plot.max, plot.count
                )?;
            }
        }

        if !report.component_averages.is_empty() {
            writeln!(f, "\nAverage TWK / TIU / TKP")?;
            for row in &report.component_averages {
                writeln!(
                    f,
                    "- {}: {} / {} / {}",
                    row.province,
                    optional(row.twk),
                    optional(row.tiu),
                    optional(row.tkp)
                )?;
            }
        }

        if !report.jabatan_comparison.is_empty() {
            writeln!(f, "\nJob positions by mean SKD")?;
            for row in &report.jabatan_comparison {
                writeln!(
                    f,
                    "- {}: mean {:.1} | median {:.1} | range {:.1}-{:.1} ({} scores)",
                    row.jabatan_label, row.mean, row.median, row.min, row.max, row.count
                )?;
            }
        }
        Ok(())
    }
}

pub(crate) struct ProvinceDetailView<'a> {
    pub(crate) province: &'a str,
    pub(crate) outcome: &'a AnalyticsOutcome<ProvinceDetail>,
}

impl fmt::Display for ProvinceDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self.outcome {
            AnalyticsOutcome::Report(detail) => detail,
            AnalyticsOutcome::EmptyCohort => {
                return writeln!(
                    f,
                    "\nNo results for {} under the selected filters.",
                    self.province
                );
            }
        };

        writeln!(f, "\n{} SKD detail", detail.province)?;
        writeln!(
            f,
            "Participants {} | mean {} | std dev {} | passing grade {:.0}",
            detail.participant_count,
            optional(detail.skd_mean),
            optional(detail.skd_std_dev),
            detail.passing_grade
        )?;
        write_histogram(f, &detail.histogram, Some(detail.passing_grade))
    }
}

pub(crate) struct ReferenceListing<'a>(pub(crate) &'a ReferenceView);

impl fmt::Display for ReferenceListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Provinces")?;
        for province in &self.0.provinces {
            writeln!(f, "- {province}")?;
        }
        writeln!(f, "\nJob positions")?;
        for entry in &self.0.jabatan {
            writeln!(f, "- {} ({})", entry.label, entry.code)?;
        }
        Ok(())
    }
}

/// `marker` flags the bin holding a reference value.
fn write_histogram(
    f: &mut fmt::Formatter<'_>,
    histogram: &Histogram,
    marker: Option<f64>,
) -> fmt::Result {
    let marked = marker.and_then(|value| histogram.bin_index(value));
    for (index, bin) in histogram.bins.iter().enumerate() {
        let flag = if Some(index) == marked { " <" } else { "" };
        writeln!(
            f,
            "{:>8.2} - {:<8.2} {:>4} {}{}",
            bin.lower,
            bin.upper,
            bin.count,
            "#".repeat(bin.count),
            flag
        )?;
    }
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}
