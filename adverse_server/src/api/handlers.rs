//! API request handlers

use adverse_core::{GraphSnapshot, InferenceResult, SharedEngine};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use clinical_signals::{ClinicalSubmission, SubmissionId};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Plain status reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Liveness check
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse::new("BDH System Online"))
}

/// Score a submission; confirmed adverse events are also learned from
pub async fn submit(
    State(engine): State<SharedEngine>,
    Json(submission): Json<ClinicalSubmission>,
) -> Result<Json<InferenceResult>, AppError> {
    let id = SubmissionId::new();
    info!(
        submission = %id,
        patient = %submission.patient_id,
        adverse = submission.is_adverse_event,
        "submission received"
    );

    let result = tokio::task::spawn_blocking(move || engine.submit(&submission)).await??;

    info!(submission = %id, risk_score = result.risk_score, "submission scored");
    Ok(Json(result))
}

/// Full graph, regardless of fired state
pub async fn network(State(engine): State<SharedEngine>) -> Result<Json<GraphSnapshot>, AppError> {
    let snapshot = tokio::task::spawn_blocking(move || engine.snapshot()).await?;
    Ok(Json(snapshot))
}

/// Forget everything learned
pub async fn reset(State(engine): State<SharedEngine>) -> Result<Json<StatusResponse>, AppError> {
    tokio::task::spawn_blocking(move || engine.reset()).await??;
    Ok(Json(StatusResponse::new("Network reset")))
}

/// Error returned by handlers; rendered as `{"error": message}`.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        error!(error = %self.0, "request failed");

        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}
