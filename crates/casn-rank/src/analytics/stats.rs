use serde::Serialize;

/// max/mean/median/min over one score column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
}

impl ScoreSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        Some(Self {
            max: *sorted.last()?,
            mean: mean(&sorted)?,
            median: quantile(&sorted, 0.5)?,
            min: *sorted.first()?,
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some((squared / (values.len() - 1) as f64).sqrt())
}

/// Linear interpolation between the two closest ranks; `sorted` must be ascending.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_even_count_averages_middle_pair() {
        let summary = ScoreSummary::from_values(&[82.125, 79.5, 74.25, 79.5]).expect("summary");
        assert_eq!(summary.max, 82.125);
        assert_eq!(summary.min, 74.25);
        assert_eq!(summary.mean, 78.84375);
        assert_eq!(summary.median, 79.5);
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(ScoreSummary::from_values(&[]).is_none());
        assert!(mean(&[]).is_none());
        assert!(quantile(&[], 0.5).is_none());
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let sorted = [350.0, 362.0, 376.0, 398.0, 410.0, 420.0];
        assert_eq!(quantile(&sorted, 0.25), Some(365.5));
        assert_eq!(quantile(&sorted, 0.5), Some(387.0));
        assert_eq!(quantile(&sorted, 0.75), Some(407.0));
        assert_eq!(quantile(&sorted, 0.0), Some(350.0));
        assert_eq!(quantile(&sorted, 1.0), Some(420.0));
        assert_eq!(quantile(&sorted, 1.5), None);
    }

    #[test]
    fn sample_std_dev_needs_two_values() {
        assert_eq!(sample_std_dev(&[400.0]), None);
        let std = sample_std_dev(&[420.0, 398.0, 410.0, 376.0, 350.0, 362.0]).expect("std");
        assert!((std - 769.6_f64.sqrt()).abs() < 1e-9);
    }
}
