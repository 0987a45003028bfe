use crate::infra::{AppState, RegionalEnvironmentalData};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use rainwise::workflows::assessment::{
    assessment_router, AssessmentService, EnvironmentalDataSource, PartnerDirectory,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes<E, D>(
    service: Arc<AssessmentService<E, D>>,
    catalog: Arc<RegionalEnvironmentalData>,
) -> axum::Router
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/regions", axum::routing::get(regions_endpoint))
        .layer(Extension(catalog))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn regions_endpoint(
    Extension(catalog): Extension<Arc<RegionalEnvironmentalData>>,
) -> impl IntoResponse {
    Json(json!({ "regions": catalog.regions() }))
}
