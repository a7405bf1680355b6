//! Axum route handlers for the Analysis API.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::{DocumentFormat, TextExtractor};
use crate::state::AppState;
use crate::suggestions::SuggestionRecord;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub use_model: bool,
}

#[derive(Debug)]
struct Upload {
    file_name: String,
    data: Bytes,
}

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    resume: Option<Upload>,
    job_file: Option<Upload>,
    job_text: Option<String>,
    use_model: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (file), `job_text` or `job_file`, optional `use_model`.
/// Unreadable documents are analyzed as empty text rather than rejected.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuggestionRecord>, AppError> {
    let form = read_form(multipart).await?;

    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let job_description = match (form.job_text, form.job_file) {
        (Some(text), _) => text,
        (None, Some(upload)) => extract_upload(&state.extractor, upload).await,
        (None, None) => {
            return Err(AppError::Validation(
                "job_text or job_file is required".to_string(),
            ))
        }
    };

    let resume_name = resume.file_name.clone();
    let resume_text = extract_upload(&state.extractor, resume).await;
    if resume_text.trim().is_empty() {
        warn!("No text extracted from resume {resume_name}; analyzing empty text");
    }

    info!(
        "Analyzing resume {} ({} chars) against job description ({} chars), use_model={}",
        resume_name,
        resume_text.len(),
        job_description.len(),
        form.use_model
    );

    let record = state
        .models
        .suggest(&resume_text, &job_description, form.use_model)
        .await;

    Ok(Json(record))
}

/// POST /api/v1/analyze/text
///
/// Same analysis for callers that already hold plain text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<SuggestionRecord>, AppError> {
    let record = state
        .models
        .suggest(&request.resume_text, &request.job_description, request.use_model)
        .await;

    Ok(Json(record))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" | "job_file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;
                // Browsers send an empty part for an untouched file input.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                let upload = Some(Upload { file_name, data });
                if name == "resume" {
                    form.resume = upload;
                } else {
                    form.job_file = upload;
                }
            }
            "job_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_text: {e}")))?;
                if !text.trim().is_empty() {
                    form.job_text = Some(text);
                }
            }
            "use_model" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid use_model: {e}")))?;
                form.use_model = parse_flag(&value);
            }
            other => debug!("Ignoring unknown form field {other:?}"),
        }
    }

    Ok(form)
}

/// Runs the blocking extractor off the async runtime.
async fn extract_upload(extractor: &TextExtractor, upload: Upload) -> String {
    let extractor = extractor.clone();
    let format = DocumentFormat::from_file_name(&upload.file_name);
    let result =
        tokio::task::spawn_blocking(move || extractor.extract(&upload.data, &format)).await;

    result.unwrap_or_else(|e| {
        warn!("Extraction task failed: {e}");
        String::new()
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}
