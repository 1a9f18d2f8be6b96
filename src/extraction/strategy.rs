//! Core trait and types for extraction strategies.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use super::category::{Category, extension_of};

/// A file uploaded by a client and persisted to temporary storage.
///
/// The caller owns the stored file and deletes it once extraction is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as supplied by the client.
    pub original_name: String,
    /// Where the upload was written on disk.
    pub stored_path: PathBuf,
    /// Size of the stored file in bytes.
    pub size_bytes: u64,
    /// MIME type guessed from the original name.
    pub mime_type: String,
}

impl UploadedFile {
    /// Describe a stored upload, guessing its MIME type from `original_name`.
    pub fn new(original_name: impl Into<String>, stored_path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let original_name = original_name.into();
        let mime_type = mime_guess::from_path(&original_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            original_name,
            stored_path: stored_path.into(),
            size_bytes,
            mime_type,
        }
    }

    /// Category of this file, from its original name.
    pub fn category(&self) -> Category {
        Category::from_file_name(&self.original_name)
    }

    /// Lower-cased extension of the original name, with the dot.
    pub fn extension(&self) -> String {
        extension_of(&self.original_name)
    }

    /// Size in kilobytes formatted with two decimals, e.g. `200.00`.
    pub fn size_kb(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let kb = self.size_bytes as f64 / 1024.0;
        format!("{kb:.2}")
    }
}

/// Errors a strategy can report. The dispatcher turns these into text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The stored file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be parsed.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// PDF parsing ran past its time budget.
    #[error("PDF parsing timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The blocking parse task failed or panicked.
    #[error("extraction task failed: {0}")]
    Task(String),

    /// No strategy is registered for the file's category.
    #[error("no extraction strategy registered for {0} files")]
    NoStrategy(Category),
}

/// A format-specific way of summarising an uploaded file as prompt text.
///
/// Implementations are stateless apart from their configuration and only
/// ever read the file they are given.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync + std::fmt::Debug {
    /// Produce the descriptive summary for `file`.
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_kb_rounds_to_two_decimals() {
        assert_eq!(UploadedFile::new("a.png", "/tmp/a", 204_800).size_kb(), "200.00");
        assert_eq!(UploadedFile::new("a.png", "/tmp/a", 1_500).size_kb(), "1.46");
        assert_eq!(UploadedFile::new("a.png", "/tmp/a", 0).size_kb(), "0.00");
    }

    #[test]
    fn test_mime_type_is_guessed_from_name() {
        assert_eq!(UploadedFile::new("doc.pdf", "/tmp/x", 1).mime_type, "application/pdf");
        assert_eq!(UploadedFile::new("photo.png", "/tmp/x", 1).mime_type, "image/png");
        assert_eq!(
            UploadedFile::new("blob", "/tmp/x", 1).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExtractionError::Timeout(Duration::from_secs(30)).to_string(),
            "PDF parsing timed out after 30s"
        );
        assert_eq!(
            ExtractionError::NoStrategy(Category::Pdf).to_string(),
            "no extraction strategy registered for pdf files"
        );
    }
}
