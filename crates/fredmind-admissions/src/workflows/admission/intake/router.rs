use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, info};

use super::super::payload::{ApiResponse, StudentApplicationRequest};
use super::repository::{ApplicationId, ApplicationRepository, RepositoryError};
use super::service::{IntakeError, IntakeService};

/// Router exposing the student application intake endpoints.
pub fn intake_router<R>(service: Arc<IntakeService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/student-applications", post(submit_handler::<R>))
        .route(
            "/student-applications/:application_id",
            get(status_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    payload: Result<Json<StudentApplicationRequest>, JsonRejection>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            info!(reason = %rejection.body_text(), "malformed application payload");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match service.submit(request) {
        Ok(record) => {
            let data = match serde_json::to_value(record.receipt()) {
                Ok(data) => data,
                Err(err) => {
                    error!(error = %err, "failed to encode application receipt");
                    return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
                }
            };
            let body = ApiResponse {
                message: "Application submitted successfully".to_string(),
                data,
                payment_url: record.payment_url,
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(IntakeError::Repository(err)) => {
            error!(error = %err, "application repository failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(rejected) => {
            info!(reason = %rejected, "student application rejected");
            error_response(StatusCode::BAD_REQUEST, rejected.to_string())
        }
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<IntakeService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record.receipt())).into_response(),
        Err(IntakeError::Repository(RepositoryError::NotFound)) => error_response(
            StatusCode::NOT_FOUND,
            format!("application {} not found", id.0),
        ),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}
