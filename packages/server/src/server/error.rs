//! Mapping of pipeline failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geopolitic::PipelineError;
use serde_json::json;

/// A failed request, rendered as `{"detail": message}`.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
            PipelineError::Collaborator(_) => StatusCode::BAD_GATEWAY,
            PipelineError::Configuration(_) | PipelineError::StateConflict { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client errors carry the bare message; everything else its full text.
    pub fn detail(&self) -> String {
        match &self.0 {
            PipelineError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = %status, "Pipeline request failed");
        } else {
            tracing::warn!(error = %self.0, status = %status, "Pipeline request rejected");
        }

        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
