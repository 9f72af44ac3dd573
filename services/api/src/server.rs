use crate::cli::ServeArgs;
use crate::infra::{AppState, TracingDispatcher};
use crate::routes::with_inquiry_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_intake::config::AppConfig;
use lead_intake::error::AppError;
use lead_intake::telemetry;
use lead_intake::workflows::inquiry::InquiryIntakeService;
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

    let thresholds = config.intake.evaluation.thresholds;
    let intake_service = Arc::new(InquiryIntakeService::new(
        Arc::new(TracingDispatcher::default()),
        config.intake.evaluation,
        config.intake.delivery,
        config.intake.fallback,
    ));

    let app = with_inquiry_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        high_threshold = thresholds.high,
        medium_threshold = thresholds.medium,
        "lead intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
