//! Axum route handlers for résumé parsing and evaluation.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::evaluator::evaluate;
use crate::evaluation::models::EvaluationResult;
use crate::sections::{parse_sections, ParseMode, SectionMap};
use crate::state::AppState;
use crate::text_extraction::extract_text;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseQuery {
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub filename: String,
    pub method: ParseMode,
    pub parsed: SectionMap,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateSectionsRequest {
    pub sections: SectionMap,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub sections: SectionMap,
    pub evaluation: EvaluationResult,
}

/// Multipart fields accepted by the upload endpoints.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    job_description: Option<String>,
    method: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/parse-resume?method=heuristic|llm
///
/// Extracts text from the uploaded file (field `file`) and splits it into sections.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Query(query): Query<ParseQuery>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let mode = parse_mode(query.method.as_deref().or(form.method.as_deref()))?;
    let (filename, data) = form
        .file
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    let text = extract_in_background(data, filename.clone()).await?;
    let parsed = parse_sections(&text, mode, state.collaborator.as_ref()).await?;

    Ok(Json(ParseResumeResponse {
        filename,
        method: mode,
        parsed,
    }))
}

/// POST /api/v1/evaluate
///
/// Full pipeline: file → text → sections → metrics → LLM verdict.
/// Fields: `resume` (file), `job_description` (text), optional `method`.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluateResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let mode = parse_mode(form.method.as_deref())?;
    let job_description = require_job_description(form.job_description)?;
    let (filename, data) = form
        .file
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    let evaluation_id = Uuid::new_v4();
    info!("Evaluation {evaluation_id}: received '{filename}' ({} bytes)", data.len());

    let text = extract_in_background(data, filename.clone()).await?;
    let sections = parse_sections(&text, mode, state.collaborator.as_ref()).await?;
    let evaluation = evaluate(state.collaborator.as_ref(), &sections, &job_description).await;

    Ok(Json(EvaluateResponse {
        evaluation_id,
        evaluated_at: Utc::now(),
        filename: Some(filename),
        sections,
        evaluation,
    }))
}

/// POST /api/v1/evaluate/sections
///
/// Re-scores already parsed sections against a job description.
pub async fn handle_evaluate_sections(
    State(state): State<AppState>,
    Json(request): Json<EvaluateSectionsRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let job_description = require_job_description(Some(request.job_description))?;
    if request.sections.is_empty() {
        return Err(AppError::UnsupportedInput(
            "sections cannot be empty".to_string(),
        ));
    }

    let evaluation_id = Uuid::new_v4();
    info!(
        "Evaluation {evaluation_id}: scoring {} pre-parsed sections",
        request.sections.len()
    );
    let evaluation = evaluate(
        state.collaborator.as_ref(),
        &request.sections,
        &job_description,
    )
    .await;

    Ok(Json(EvaluateResponse {
        evaluation_id,
        evaluated_at: Utc::now(),
        filename: None,
        sections: request.sections,
        evaluation,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation(format!("Field '{name}' must be a file")))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;
                form.file = Some((filename, data));
            }
            "job_description" | "job_desc" => {
                form.job_description = Some(read_text_field(field).await?);
            }
            "method" => form.method = Some(read_text_field(field).await?),
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

fn parse_mode(method: Option<&str>) -> Result<ParseMode, AppError> {
    method
        .map(|m| m.parse::<ParseMode>().map_err(AppError::Validation))
        .transpose()
        .map(Option::unwrap_or_default)
}

fn require_job_description(job_description: Option<String>) -> Result<String, AppError> {
    match job_description {
        Some(jd) if !jd.trim().is_empty() => Ok(jd),
        _ => Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        )),
    }
}

/// PDF decoding is CPU-bound; keep it off the async workers.
async fn extract_in_background(data: Bytes, filename: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_text(&data, &filename))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("text extraction task failed: {e}")))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_defaults_to_heuristic() {
        assert_eq!(parse_mode(None).unwrap(), ParseMode::Heuristic);
        assert_eq!(parse_mode(Some("llm")).unwrap(), ParseMode::Llm);
        assert!(matches!(
            parse_mode(Some("magic")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_require_job_description_rejects_blank() {
        assert!(require_job_description(None).is_err());
        assert!(require_job_description(Some("  ".to_string())).is_err());
        assert_eq!(
            require_job_description(Some("Rust dev".to_string())).unwrap(),
            "Rust dev"
        );
    }
}
