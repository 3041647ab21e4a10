use super::ExtractError;

/// Page text in document order, one newline per page boundary.
/// Image-only pages yield nothing and are skipped.
pub(super) fn extract(content: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(content)
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim_end())
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
