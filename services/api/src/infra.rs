use casn_rank::config::DataConfig;
use casn_rank::dataset::Dataset;
use casn_rank::error::AppError;
use casn_rank::ranking::RankingService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the dataset once; every request and command reads the same snapshot.
pub(crate) fn load_service(config: &DataConfig) -> Result<Arc<RankingService<Dataset>>, AppError> {
    let dataset = Dataset::load(config)?;
    Ok(Arc::new(RankingService::new(Arc::new(dataset))))
}

pub(crate) fn parse_score(raw: &str) -> Result<f64, String> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a score ({err})"))?;
    if !score.is_finite() {
        return Err(format!("score must be a finite number, got '{raw}'"));
    }
    Ok(score)
}
