//! Pipeline endpoint.
//!
//! POST /run_pipeline {"query": "...", "infosphere": "english"}
//!
//! Runs the full pipeline for one query and returns the rendered report.
//! Seed sources may be supplied to skip live search for some or all scopes.
//! Unreadable bodies and blank queries get a 400 with a `detail` message.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use geopolitic::{Infosphere, PipelineError, SeedSources};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;

fn default_infosphere() -> String {
    "english".to_string()
}

#[derive(Debug, Deserialize)]
pub struct RunPipelineRequest {
    /// Query to analyze; a missing query is rejected like an empty one
    #[serde(default)]
    pub query: String,

    /// Which infosphere sources to use: english or polish
    #[serde(default = "default_infosphere")]
    pub infosphere: String,

    #[serde(default)]
    pub seed_sources: Option<SeedSources>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunPipelineResponse {
    pub output: String,
}

pub async fn run_pipeline_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RunPipelineRequest>, JsonRejection>,
) -> Result<Json<RunPipelineResponse>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| PipelineError::Validation(rejection.body_text()))?;
    if payload.query.trim().is_empty() {
        return Err(PipelineError::Validation("Query must not be empty.".into()).into());
    }
    let infosphere: Infosphere = payload.infosphere.parse()?;

    tracing::info!(infosphere = %infosphere, "Pipeline request received");
    let output = state
        .pipeline
        .run(&payload.query, payload.seed_sources.as_ref(), infosphere)
        .await?;

    Ok(Json(RunPipelineResponse { output }))
}
