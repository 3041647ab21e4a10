use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild,
};

use super::ExtractError;

/// Paragraph text in reading order, one paragraph per line; empty
/// paragraphs stay as blank lines. Table cells and content controls are
/// walked in place.
pub(super) fn extract(content: &[u8]) -> Result<String, ExtractError> {
    let package = read_docx(content).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &package.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut lines),
            DocumentChild::Table(table) => push_table(table, &mut lines),
            DocumentChild::StructuredDataTag(tag) => push_tag(tag, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

fn push_paragraph(paragraph: &Paragraph, lines: &mut Vec<String>) {
    let mut buffer = String::new();
    for child in &paragraph.children {
        append_paragraph_child(child, &mut buffer);
    }
    lines.push(buffer);
}

fn append_paragraph_child(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => append_run(run, buffer),
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                append_paragraph_child(inner, buffer);
            }
        }
        ParagraphChild::Insert(insert) => {
            for inner in &insert.children {
                if let docx_rs::InsertChild::Run(run) = inner {
                    append_run(run, buffer);
                }
            }
        }
        _ => {}
    }
}

fn append_run(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Break(_) => buffer.push('\n'),
            RunChild::Tab(_) => buffer.push('\t'),
            _ => {}
        }
    }
}

fn push_table(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let row = match row {
            TableChild::TableRow(row) => row,
        };
        for cell in &row.cells {
            let cell = match cell {
                TableRowChild::TableCell(cell) => cell,
            };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => push_paragraph(paragraph, lines),
                    TableCellContent::Table(inner) => push_table(inner, lines),
                    _ => {}
                }
            }
        }
    }
}

fn push_tag(tag: &StructuredDataTag, lines: &mut Vec<String>) {
    let mut inline = String::new();
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => append_run(run, &mut inline),
            StructuredDataTagChild::Paragraph(paragraph) => push_paragraph(paragraph, lines),
            StructuredDataTagChild::Table(table) => push_table(table, lines),
            StructuredDataTagChild::StructuredDataTag(inner) => push_tag(inner, lines),
            _ => {}
        }
    }
    if !inline.trim().is_empty() {
        lines.push(inline);
    }
}
