//! Plain text and Markdown strategy.

use async_trait::async_trait;

use super::strategy::{ExtractionError, ExtractionStrategy, UploadedFile};
use super::truncate::truncate;

/// Strategy for `.txt` and `.md` uploads.
///
/// Invalid UTF-8 is replaced rather than rejected, so only I/O can fail.
#[derive(Debug, Clone)]
pub struct TextStrategy {
    excerpt_limit: usize,
}

impl TextStrategy {
    /// Create a text strategy that keeps at most `excerpt_limit` characters.
    pub fn new(excerpt_limit: usize) -> Self {
        Self { excerpt_limit }
    }
}

#[async_trait]
impl ExtractionStrategy for TextStrategy {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(&file.stored_path).await?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(format!(
            "[Text File] Name: {}\n\nContent: {}",
            file.original_name,
            truncate(&content, self.excerpt_limit)
        ))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}
