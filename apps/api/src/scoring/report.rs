//! Report builder: tabulates per-document scores and renders them as `.xlsx`.
//!
//! Column order is fixed once per batch from the request's criteria, never
//! from whichever score map happened to be computed last.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::errors::AppError;
use crate::scoring::score::ScoreMap;

pub const NAME_HEADER: &str = "Candidate Name";
pub const TOTAL_HEADER: &str = "Total Score";
const SHEET_NAME: &str = "Scores";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unable to build the score workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::Report(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub scores: Vec<u32>,
    pub total: u32,
}

#[derive(Debug, Clone)]
pub struct Report {
    criteria: Vec<String>,
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(criteria: Vec<String>) -> Self {
        Self {
            criteria,
            rows: Vec::new(),
        }
    }

    /// Appends a row; criteria absent from `scores` count as 0.
    pub fn push(&mut self, name: impl Into<String>, scores: &ScoreMap) {
        let ordered: Vec<u32> = self
            .criteria
            .iter()
            .map(|c| scores.get(c).unwrap_or(0))
            .collect();
        let total = ordered.iter().sum();

        self.rows.push(ReportRow {
            name: name.into(),
            scores: ordered,
            total,
        });
    }

    pub fn header(&self) -> Vec<String> {
        std::iter::once(NAME_HEADER.to_string())
            .chain(self.criteria.iter().cloned())
            .chain(std::iter::once(TOTAL_HEADER.to_string()))
            .collect()
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Serializes the table into an in-memory workbook.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, ReportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        {
            let sheet = workbook.add_worksheet();
            sheet.set_name(SHEET_NAME)?;

            for (col, title) in self.header().iter().enumerate() {
                sheet.write_string_with_format(0, col as u16, title, &header_format)?;
            }

            for (index, row) in self.rows().iter().enumerate() {
                let r = index as u32 + 1;
                sheet.write_string(r, 0, &row.name)?;
                for (offset, score) in row.scores.iter().enumerate() {
                    sheet.write_number(r, offset as u16 + 1, *score)?;
                }
                sheet.write_number(r, row.scores.len() as u16 + 1, row.total)?;
            }

            sheet.set_freeze_panes(1, 0)?;
            sheet.autofit();
        }

        Ok(workbook.save_to_buffer()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_header_wraps_criteria() {
        let report = Report::new(criteria());
        assert_eq!(
            report.header(),
            vec!["Candidate Name", "A", "B", "Total Score"]
        );
    }

    #[test]
    fn test_rows_follow_fixed_criteria_order() {
        let mut report = Report::new(criteria());
        report.push("doc1.pdf", &ScoreMap::from_iter([("A", 3), ("B", 5)]));
        // Reversed map order must not shift columns.
        report.push("doc2.docx", &ScoreMap::from_iter([("B", 1), ("A", 4)]));

        assert_eq!(
            report.rows(),
            &[
                ReportRow {
                    name: "doc1.pdf".to_string(),
                    scores: vec![3, 5],
                    total: 8,
                },
                ReportRow {
                    name: "doc2.docx".to_string(),
                    scores: vec![4, 1],
                    total: 5,
                },
            ]
        );
    }

    #[test]
    fn test_missing_criterion_counts_as_zero() {
        let mut report = Report::new(criteria());
        report.push("doc.pdf", &ScoreMap::from_iter([("A", 2)]));
        assert_eq!(report.rows()[0].scores, vec![2, 0]);
        assert_eq!(report.rows()[0].total, 2);
    }

    #[test]
    fn test_xlsx_is_a_zip_package() {
        let mut report = Report::new(criteria());
        report.push("doc1.pdf", &ScoreMap::from_iter([("A", 3), ("B", 5)]));

        let bytes = report.to_xlsx().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_report_still_renders_header() {
        let bytes = Report::new(criteria()).to_xlsx().unwrap();
        assert!(!bytes.is_empty());
    }
}
