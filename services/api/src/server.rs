use crate::cli::ServeArgs;
use crate::infra::{AppState, RegionalEnvironmentalData, StaticPartnerDirectory};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rainwise::config::AppConfig;
use rainwise::error::AppError;
use rainwise::telemetry;
use rainwise::workflows::assessment::AssessmentService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let environment = Arc::new(RegionalEnvironmentalData::default());
    let assessment_service = Arc::new(AssessmentService::new(
        environment.clone(),
        Arc::new(StaticPartnerDirectory),
        config.assessment,
    ));

    let app = with_assessment_routes(assessment_service, environment)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        lookup_timeout_ms = config.assessment.lookup_timeout.as_millis() as u64,
        "rainwater assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
