use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::AssessmentBundle;
use super::intake::{self, SurveySubmission};
use super::providers::{EnvironmentalDataSource, PartnerDirectory};
use super::service::AssessmentService;
use crate::error::AppError;

pub const LOOKUP_FAILURE_MESSAGE: &str = "unable to complete assessment for this location";

/// Survey fields at the top level plus an optional dashboard session id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub survey: SurveySubmission,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub location: String,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub bundle: AssessmentBundle,
}

/// Router builder exposing the assessment engine over HTTP.
pub fn assessment_router<E, D>(service: Arc<AssessmentService<E, D>>) -> Router
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<E, D>))
        .route(
            "/api/v1/assessments/sessions/:session_id",
            delete(release_session_handler::<E, D>),
        )
        .with_state(service)
}

pub(crate) async fn assess_handler<E, D>(
    State(service): State<Arc<AssessmentService<E, D>>>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError>
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    let AssessmentRequest { survey, session_id } = request;
    let survey = intake::validate(survey)?;

    let bundle = match session_id.as_deref() {
        Some(session_id) => service.run_in_session(session_id, &survey).await?,
        None => service.run(&survey).await?,
    };

    Ok(Json(AssessmentResponse {
        location: survey.location,
        generated_at: Utc::now(),
        bundle,
    }))
}

pub(crate) async fn release_session_handler<E, D>(
    State(service): State<Arc<AssessmentService<E, D>>>,
    Path(session_id): Path<String>,
) -> StatusCode
where
    E: EnvironmentalDataSource + 'static,
    D: PartnerDirectory + 'static,
{
    if service.sessions().release(&session_id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
