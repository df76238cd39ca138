use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::domain::RankOutcome;
use super::service::{RankingService, ReferenceView};
use crate::analytics::{AnalyticsOutcome, DistributionReport, ProvinceDetail};
use crate::dataset::{DatasetProvider, DatasetSnapshot};
use crate::error::AppError;

/// Router builder exposing the rank lookup and distribution endpoints.
pub fn ranking_router<P>(service: Arc<RankingService<P>>) -> Router
where
    P: DatasetProvider + 'static,
{
    Router::new()
        .route("/api/v1/rank", get(rank_handler::<P>))
        .route("/api/v1/distribution", get(distribution_handler::<P>))
        .route(
            "/api/v1/distribution/province",
            get(province_detail_handler::<P>),
        )
        .route("/api/v1/reference", get(reference_handler::<P>))
        .route("/api/v1/dataset", get(dataset_handler::<P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct RankParams {
    /// Job-position label as listed in the reference endpoint.
    pub jabatan: String,
    pub province: String,
    pub score: f64,
}

/// Comma-separated multi-select values.
#[derive(Debug, Default, Deserialize)]
pub struct DistributionParams {
    #[serde(default)]
    pub provinces: Option<String>,
    #[serde(default)]
    pub jabatan: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProvinceDetailParams {
    pub province: String,
    #[serde(default)]
    pub bins: Option<usize>,
    #[serde(default)]
    pub provinces: Option<String>,
    #[serde(default)]
    pub jabatan: Option<String>,
}

pub(crate) async fn rank_handler<P>(
    State(service): State<Arc<RankingService<P>>>,
    Query(params): Query<RankParams>,
) -> Result<Json<RankOutcome>, AppError>
where
    P: DatasetProvider + 'static,
{
    let outcome = service.rank_by_label(&params.jabatan, &params.province, params.score)?;
    Ok(Json(outcome))
}

pub(crate) async fn distribution_handler<P>(
    State(service): State<Arc<RankingService<P>>>,
    Query(params): Query<DistributionParams>,
) -> Json<AnalyticsOutcome<DistributionReport>>
where
    P: DatasetProvider + 'static,
{
    let filter = service.filter_from_labels(
        split_list(params.provinces.as_deref()),
        &split_list(params.jabatan.as_deref()),
    );
    Json(service.distribution(&filter))
}

pub(crate) async fn province_detail_handler<P>(
    State(service): State<Arc<RankingService<P>>>,
    Query(params): Query<ProvinceDetailParams>,
) -> Json<AnalyticsOutcome<ProvinceDetail>>
where
    P: DatasetProvider + 'static,
{
    let filter = service.filter_from_labels(
        split_list(params.provinces.as_deref()),
        &split_list(params.jabatan.as_deref()),
    );
    Json(service.province_detail(&filter, &params.province, params.bins))
}

pub(crate) async fn reference_handler<P>(
    State(service): State<Arc<RankingService<P>>>,
) -> Json<ReferenceView>
where
    P: DatasetProvider + 'static,
{
    Json(service.reference())
}

pub(crate) async fn dataset_handler<P>(
    State(service): State<Arc<RankingService<P>>>,
) -> Json<DatasetSnapshot>
where
    P: DatasetProvider + 'static,
{
    Json(service.snapshot())
}

/// Whitespace around separators belongs to the list syntax, not the values.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
