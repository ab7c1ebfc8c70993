pub mod docx;
pub mod html;
pub mod pdf;

use std::path::Path;

use docmill_common::DocmillError;

use crate::element::DocElement;

/// Supported upload formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Pdf,
    Docx,
    Html,
    Txt,
}

impl DocFormat {
    /// Map a filename to a supported format via its (case-insensitive)
    /// extension. `None` means the format is not allowed.
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "html" => Some(Self::Html),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

/// Name/origin attributes of a converted document. Either may be absent;
/// absent values surface as JSON null in the response.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub document_name: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug)]
pub struct ConvertedDocument {
    pub meta: DocumentMeta,
    pub elements: Vec<DocElement>,
}

/// Convert a staged file into an element tree.
///
/// `.txt` is read directly and wrapped as a single text element; the other
/// formats go through their converter adapters.
pub fn convert_file(path: &Path, original_name: &str) -> Result<ConvertedDocument, DocmillError> {
    let format = DocFormat::from_filename(original_name).ok_or_else(|| {
        DocmillError::Validation(format!("File format not allowed: {original_name}"))
    })?;

    let meta = DocumentMeta {
        document_name: Path::new(original_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned()),
        origin: Some(original_name.to_string()),
    };

    let bytes = std::fs::read(path)?;
    let elements = match format {
        DocFormat::Txt => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            vec![DocElement::leaf("text", text)]
        }
        DocFormat::Html => html::html_elements(&String::from_utf8_lossy(&bytes)),
        DocFormat::Pdf => pdf::pdf_elements(&bytes)?,
        DocFormat::Docx => docx::docx_elements(&bytes)?,
    };

    Ok(ConvertedDocument { meta, elements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::flatten_texts;

    #[test]
    fn extension_allow_list() {
        assert_eq!(DocFormat::from_filename("report.pdf"), Some(DocFormat::Pdf));
        assert_eq!(DocFormat::from_filename("Report.DOCX"), Some(DocFormat::Docx));
        assert_eq!(DocFormat::from_filename("page.html"), Some(DocFormat::Html));
        assert_eq!(DocFormat::from_filename("notes.txt"), Some(DocFormat::Txt));
        assert_eq!(DocFormat::from_filename("report.exe"), None);
        assert_eq!(DocFormat::from_filename("noextension"), None);
    }

    #[test]
    fn txt_wraps_contents_as_single_text_element() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain file contents").unwrap();

        let converted = convert_file(&path, "notes.txt").unwrap();
        assert_eq!(converted.meta.document_name.as_deref(), Some("notes"));
        assert_eq!(converted.meta.origin.as_deref(), Some("notes.txt"));

        let records = flatten_texts(&converted.elements);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "text");
        assert_eq!(records[0].text, "plain file contents");
    }

    #[test]
    fn disallowed_extension_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.exe");
        std::fs::write(&path, b"MZ").unwrap();

        let err = convert_file(&path, "report.exe").unwrap_err();
        assert!(err.to_string().contains("File format not allowed"));
    }
}
