//! Text extraction — turns an uploaded résumé file into plain text.
//!
//! The file type comes from the filename extension only; content sniffing is
//! not attempted.

mod docx;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload a PDF, DOCX or TXT file.")]
    UnsupportedFileType(String),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),

    #[error("No text could be extracted from '{0}'")]
    Empty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
}

impl FileType {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(FileType::Pdf),
            "docx" => Ok(FileType::Docx),
            "txt" => Ok(FileType::Text),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// Extracts plain text from an uploaded file.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractionError> {
    let file_type = FileType::from_filename(filename)?;

    let text = match file_type {
        FileType::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
        FileType::Docx => docx::extract_docx_text(bytes)?,
        FileType::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty(filename.to_string()));
    }

    debug!(
        "Extracted {} chars from {} ({:?})",
        text.len(),
        filename,
        file_type
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_is_case_insensitive() {
        assert_eq!(FileType::from_filename("CV.PDF").unwrap(), FileType::Pdf);
        assert_eq!(FileType::from_filename("cv.Docx").unwrap(), FileType::Docx);
        assert_eq!(FileType::from_filename("cv.txt").unwrap(), FileType::Text);
    }

    #[test]
    fn test_legacy_doc_is_unsupported() {
        assert!(matches!(
            FileType::from_filename("resume.doc"),
            Err(ExtractionError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let err = extract_text(b"hello", "resume").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text(b"John Doe\nSKILLS\nRust", "resume.txt").unwrap();
        assert_eq!(text, "John Doe\nSKILLS\nRust");
    }

    #[test]
    fn test_whitespace_only_text_is_empty_error() {
        let err = extract_text(b"  \n\t ", "resume.txt").unwrap_err();
        assert!(matches!(err, ExtractionError::Empty(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_pdf_error() {
        let err = extract_text(b"not a pdf", "resume.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
