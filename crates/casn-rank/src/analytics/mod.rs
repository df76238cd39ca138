//! Score-distribution analytics: summary statistics, histograms and the
//! per-province / per-position comparisons shown next to a rank lookup.

pub mod distribution;
pub mod histogram;
pub mod stats;

pub use distribution::{
    AnalyticsOutcome, ComponentAverages, DistributionFilter, DistributionReport,
    JabatanComparison, ProvinceBoxPlot, ProvinceDetail, SKD_PASSING_GRADE,
};
pub use histogram::{Histogram, HistogramBin};
pub use stats::ScoreSummary;
