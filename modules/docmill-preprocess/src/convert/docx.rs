use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

use docmill_common::DocmillError;

use crate::element::DocElement;

/// Build an element tree from a DOCX file. Paragraphs are labeled with
/// their (lowercased) paragraph style when one is set; tables become a
/// "table" element whose children are the cell paragraphs in row order.
pub fn docx_elements(bytes: &[u8]) -> Result<Vec<DocElement>, DocmillError> {
    let docx = read_docx(bytes).map_err(|e| DocmillError::Conversion(e.to_string()))?;

    let mut elements = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => {
                if let Some(elem) = paragraph_element(p) {
                    elements.push(elem);
                }
            }
            DocumentChild::Table(t) => {
                if let Some(elem) = table_element(t) {
                    elements.push(elem);
                }
            }
            _ => {}
        }
    }
    Ok(elements)
}

fn paragraph_element(p: &Paragraph) -> Option<DocElement> {
    let mut text = String::new();
    collect_paragraph_text(&p.children, &mut text);
    let text = text.trim().to_string();
    if text.is_empty() {
        return None;
    }

    let label = p
        .property
        .style
        .as_ref()
        .map(|s| s.val.to_ascii_lowercase());

    Some(DocElement {
        label,
        text: Some(text),
        children: Vec::new(),
    })
}

fn collect_paragraph_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        out.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_paragraph_text(&link.children, out),
            _ => {}
        }
    }
}

fn table_element(table: &Table) -> Option<DocElement> {
    let mut cells = Vec::new();
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                if let TableCellContent::Paragraph(p) = content {
                    if let Some(elem) = paragraph_element(p) {
                        cells.push(elem);
                    }
                }
            }
        }
    }

    if cells.is_empty() {
        None
    } else {
        Some(DocElement::branch("table", cells))
    }
}
