//! Axum route handlers for the scoring API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::scoring::criteria::{extract_criteria, CriteriaSet};
use crate::scoring::report::Report;
use crate::scoring::score::score_document;
use crate::scoring::upload::{read_score_form, read_single_file, FILE_FIELD};
use crate::state::AppState;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const REPORT_DISPOSITION: &str = "attachment; filename=resume_scores.xlsx";

/// POST /score-resumes
///
/// Scores every uploaded resume against the declared criteria and returns the
/// results as a spreadsheet. The first failing document aborts the batch.
pub async fn handle_score_resumes(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_score_form(multipart).await?;
    let mut report = Report::new(form.criteria.clone());

    for document in &form.files {
        let text = extract_text(document).await?;
        let scores = score_document(&text, &form.criteria, state.model.as_ref()).await?;
        info!(
            file = %document.name,
            total = scores.total(),
            "Scored resume"
        );
        report.push(document.name.clone(), &scores);
    }

    let bytes = report.to_xlsx()?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, REPORT_DISPOSITION),
        ],
        bytes,
    )
        .into_response())
}

/// POST /extract-criteria
///
/// Extracts ranking criteria from a single job description upload.
pub async fn handle_extract_criteria(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CriteriaSet>, AppError> {
    let document = read_single_file(multipart, FILE_FIELD).await?;
    let text = extract_text(&document).await?;
    let criteria = extract_criteria(&text, state.model.as_ref()).await?;
    Ok(Json(criteria))
}
