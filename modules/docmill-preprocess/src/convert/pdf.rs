use docmill_common::DocmillError;

use crate::element::DocElement;

/// Extract the text layer of a PDF and split it into paragraph elements.
/// Extraction quality varies by PDF (text layer vs scanned images); a PDF
/// without a text layer yields an empty element list, not an error.
pub fn pdf_elements(bytes: &[u8]) -> Result<Vec<DocElement>, DocmillError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocmillError::Conversion(e.to_string()))?;
    Ok(paragraphs(&text))
}

/// Split raw extracted text on blank lines into "paragraph" elements.
pub(crate) fn paragraphs(text: &str) -> Vec<DocElement> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| DocElement::leaf("paragraph", p))
        .collect()
}
