//! Multipart form readers for the scoring endpoints.
//!
//! Every file is classified as it is read, so an unsupported extension fails
//! the request before any extraction starts.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::extract::Document;

pub const CRITERIA_FIELD: &str = "criteria";
pub const FILES_FIELD: &str = "files";
pub const FILE_FIELD: &str = "file";

/// The `/score-resumes` form: criteria in declared order, then the uploads.
#[derive(Debug)]
pub struct ScoreForm {
    pub criteria: Vec<String>,
    pub files: Vec<Document>,
}

pub async fn read_score_form(mut multipart: Multipart) -> Result<ScoreForm, AppError> {
    let mut criteria: Vec<String> = Vec::new();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CRITERIA_FIELD) => {
                let value = field.text().await.map_err(multipart_error)?;
                let value = value.trim();
                if !value.is_empty() && !criteria.iter().any(|c| c == value) {
                    criteria.push(value.to_string());
                }
            }
            Some(FILES_FIELD) => files.push(read_document(field).await?),
            other => debug!(field = ?other, "Ignoring unexpected form field"),
        }
    }

    if criteria.is_empty() {
        return Err(AppError::Validation(
            "at least one criteria value is required".to_string(),
        ));
    }
    if files.is_empty() {
        return Err(AppError::Validation(
            "at least one file must be uploaded".to_string(),
        ));
    }

    Ok(ScoreForm { criteria, files })
}

/// Reads the single upload stored under `name`.
pub async fn read_single_file(mut multipart: Multipart, name: &str) -> Result<Document, AppError> {
    let mut document = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(name) && document.is_none() {
            document = Some(read_document(field).await?);
        } else {
            debug!(field = ?field.name(), "Ignoring unexpected form field");
        }
    }

    document.ok_or_else(|| AppError::Validation(format!("missing '{name}' upload")))
}

async fn read_document(field: Field<'_>) -> Result<Document, AppError> {
    let file_name = field
        .file_name()
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::Validation("uploaded file has no filename".to_string()))?;

    // Classify before buffering the body.
    crate::extract::DocumentKind::from_filename(&file_name)?;

    let content = field.bytes().await.map_err(multipart_error)?;
    Ok(Document::new(file_name, content)?)
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::Validation(format!("Failed to read multipart: {err}"))
}
