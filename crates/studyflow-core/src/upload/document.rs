//! Candidate syllabus documents.

use crate::error::{Result, ValidationError};
use std::fmt;
use std::path::Path;

/// Accepted document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Canonical MIME type sent with the upload.
    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::PlainText => "text/plain",
        }
    }

    /// Resolves the kind from the file extension, then from the declared MIME type.
    pub fn detect(file_name: &str, mime_type: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("pdf") => return Some(DocumentKind::Pdf),
            Some("txt") => return Some(DocumentKind::PlainText),
            _ => {}
        }

        // Ignore parameters such as "; charset=utf-8"
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            "text/plain" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// A document picked by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a document from disk, guessing its MIME type from the path.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Checks the document against the pdf/plain-text allow-list.
    pub fn validate(&self) -> std::result::Result<DocumentKind, ValidationError> {
        DocumentKind::detect(&self.file_name, &self.mime_type).ok_or_else(|| {
            ValidationError::UnsupportedFileType {
                file_name: self.file_name.clone(),
                mime_type: self.mime_type.clone(),
            }
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            DocumentKind::detect("Syllabus.PDF", "application/octet-stream"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::detect("notes.txt", ""),
            Some(DocumentKind::PlainText)
        );
    }

    #[test]
    fn test_detect_by_mime() {
        assert_eq!(
            DocumentKind::detect("syllabus", "text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::detect("blob", "application/pdf"), Some(DocumentKind::Pdf));
    }

    #[test]
    fn test_detect_rejects_other_types() {
        assert_eq!(DocumentKind::detect("slides.pptx", "application/vnd.ms-powerpoint"), None);
        assert_eq!(DocumentKind::detect("photo.png", "image/png"), None);
    }

    #[test]
    fn test_validate_reports_file_name() {
        let doc = Document::new("photo.png", "image/png", vec![1, 2, 3]);
        match doc.validate() {
            Err(ValidationError::UnsupportedFileType { file_name, .. }) => {
                assert_eq!(file_name, "photo.png")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_bytes() {
        let doc = Document::new("notes.txt", "text/plain", vec![b'a'; 4096]);
        let rendered = format!("{doc:?}");
        assert!(rendered.contains("len: 4096"));
        assert!(rendered.len() < 200);
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("syllabus.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"Unit 1: Algebra").unwrap();

        let doc = Document::from_path(&path).await.expect("Should load document");
        assert_eq!(doc.file_name(), "syllabus.txt");
        assert_eq!(doc.mime_type(), "text/plain");
        assert_eq!(doc.bytes(), b"Unit 1: Algebra");
        assert_eq!(doc.validate(), Ok(DocumentKind::PlainText));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_io_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = Document::from_path(temp_dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::StudyflowError::Io { .. }));
    }
}
