//! Axum route handlers for the Resume Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::validation::validate_request;
use crate::models::resume::{ResumeArtifact, ResumeRequest, ResumeStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Caller-side record id; echoed back, minted when absent.
    #[serde(default)]
    pub resume_id: Option<Uuid>,
    #[serde(flatten)]
    pub resume: ResumeRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub resume_id: Uuid,
    pub status: ResumeStatus,
    pub pdf_base64: String,
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Full pipeline: validate → prompt → model → contract check → HTML → PDF.
/// Returns the PDF base64-encoded alongside the HTML it was printed from.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_id = request.resume_id.unwrap_or_else(Uuid::new_v4);

    let artifact = run_pipeline(&state, resume_id, &request.resume).await?;

    Ok(Json(GenerateResponse {
        resume_id,
        status: ResumeStatus::Completed,
        pdf_base64: STANDARD.encode(&artifact.pdf),
        html: artifact.html,
        generated_at: Utc::now(),
    }))
}

/// POST /api/v1/resumes/generate/pdf
///
/// Same pipeline, but streams back the raw PDF as a download.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let resume_id = request.resume_id.unwrap_or_else(Uuid::new_v4);

    let artifact = run_pipeline(&state, resume_id, &request.resume).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        pdf_filename(&request.resume.candidate.name)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.pdf,
    )
        .into_response())
}

/// Validates the input, then runs the generator under the configured deadline.
async fn run_pipeline(
    state: &AppState,
    resume_id: Uuid,
    request: &ResumeRequest,
) -> Result<ResumeArtifact, AppError> {
    let issues = validate_request(request);
    if !issues.is_empty() {
        return Err(AppError::invalid_fields(&issues));
    }

    info!("Generating resume {resume_id}");
    let artifact = tokio::time::timeout(
        state.generation_timeout(),
        state.generator.generate(request),
    )
    .await
    .map_err(|_| AppError::Timeout(state.config.generation_timeout_secs))??;

    info!("Resume {resume_id} completed");
    Ok(artifact)
}

/// `Jane  Doe` → `Jane_Doe.pdf`. Keeps ASCII alphanumerics, collapses
/// whitespace runs into one underscore, and drops everything else.
pub fn pdf_filename(name: &str) -> String {
    let stem = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}
