//! Text extraction for uploaded resumes and job descriptions.
//!
//! Supported inputs are PDF and DOCX, classified by file extension. Parsing is
//! CPU-bound and runs on the blocking pool so a slow or panicking parser never
//! stalls the async workers.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

mod docx;
mod pdf;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error extracting text from DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classifies a file by its extension, ignoring case.
    pub fn from_filename(name: &str) -> Result<Self, ExtractError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ExtractError::UnsupportedFormat(name.to_string())),
        }
    }

    fn failure(self, cause: String) -> ExtractError {
        match self {
            DocumentKind::Pdf => ExtractError::Pdf(cause),
            DocumentKind::Docx => ExtractError::Docx(cause),
        }
    }
}

/// An uploaded file whose extension has already been classified.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub content: Bytes,
}

impl Document {
    pub fn new(name: impl Into<String>, content: Bytes) -> Result<Self, ExtractError> {
        let name = name.into();
        let kind = DocumentKind::from_filename(&name)?;
        Ok(Self {
            name,
            kind,
            content,
        })
    }
}

/// Extracts the visible text of a document, trimmed. A document with no
/// extractable text (e.g. a scanned PDF) yields an empty string.
pub async fn extract_text(document: &Document) -> Result<String, ExtractError> {
    let kind = document.kind;
    let content = document.content.clone();

    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract(&content),
        DocumentKind::Docx => docx::extract(&content),
    })
    .await
    .map_err(|e| kind.failure(format!("parser aborted: {e}")))??;

    if text.is_empty() {
        warn!(file = %document.name, "Document has no extractable text");
    }

    debug!(
        file = %document.name,
        chars = text.len(),
        "Extracted document text"
    );

    Ok(text)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run};

    /// Builds an in-memory DOCX with one paragraph per entry.
    pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
        let mut doc = Docx::new();
        for text in paragraphs {
            doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }

        let mut buffer = Cursor::new(Vec::new());
        doc.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }
}
