use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::error;

use super::delivery::NotificationDispatcher;
use super::domain::InquiryInput;
use super::service::{InquiryIntakeService, IntakeReceipt, IntakeServiceError};
use super::validation::ValidationError;

/// Router builder exposing HTTP endpoints for inquiry intake.
///
/// Redelivery is not routed: it takes a full evaluation, so it stays a server-side call on
/// [`InquiryIntakeService::redeliver`].
pub fn inquiry_router<D>(service: Arc<InquiryIntakeService<D>>) -> Router
where
    D: NotificationDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/inquiries", post(submit_handler::<D>))
        .route("/api/v1/inquiries/evaluate", post(preview_handler::<D>))
        .with_state(service)
}

pub(crate) async fn submit_handler<D>(
    State(service): State<Arc<InquiryIntakeService<D>>>,
    axum::Json(input): axum::Json<InquiryInput>,
) -> Response
where
    D: NotificationDispatcher + 'static,
{
    // Dispatchers block on the provider; keep that off the async workers.
    let worker = Arc::clone(&service);
    match tokio::task::spawn_blocking(move || worker.submit(&input)).await {
        Ok(result) => intake_response(&service, result),
        Err(err) => {
            error!(%err, "inquiry intake worker failed");
            let payload = json!({ "error": service.fallback().failure_message() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preview_handler<D>(
    State(service): State<Arc<InquiryIntakeService<D>>>,
    axum::Json(input): axum::Json<InquiryInput>,
) -> Response
where
    D: NotificationDispatcher + 'static,
{
    match service.preview(&input) {
        Ok(evaluation) => {
            (StatusCode::OK, axum::Json(evaluation.submitter_view())).into_response()
        }
        Err(error) => validation_response(&error),
    }
}

fn intake_response<D>(
    service: &InquiryIntakeService<D>,
    result: Result<IntakeReceipt, IntakeServiceError>,
) -> Response
where
    D: NotificationDispatcher + 'static,
{
    match result {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt.status_view())).into_response(),
        Err(IntakeServiceError::Validation(error)) => validation_response(&error),
        Err(IntakeServiceError::Delivery { evaluation, report }) => {
            let payload = json!({
                "error": service.fallback().failure_message(),
                "evaluation": evaluation.submitter_view(),
                "delivery": report,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

fn validation_response(error: &ValidationError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "field": error.field(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
