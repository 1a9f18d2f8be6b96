//! Strategies that describe a file from its metadata alone.
//!
//! None of these read the stored file, so none of them can fail.

use async_trait::async_trait;

use super::strategy::{ExtractionError, ExtractionStrategy, UploadedFile};

/// Images are reported by name and size; pixels are never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageStrategy;

#[async_trait]
impl ExtractionStrategy for ImageStrategy {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        Ok(format!(
            "[Image Analysis] Name: {}, Size: {} KB",
            file.original_name,
            file.size_kb()
        ))
    }

    fn name(&self) -> &'static str {
        "image"
    }
}

/// Word documents get a placeholder noting that deep parsing is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStrategy;

#[async_trait]
impl ExtractionStrategy for DocumentStrategy {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        Ok(format!(
            "[Document Analysis] Name: {}, Size: {} KB. Note: detailed document parsing would be available in the full version.",
            file.original_name,
            file.size_kb()
        ))
    }

    fn name(&self) -> &'static str {
        "document"
    }
}

/// Fallback for any extension without a dedicated strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

#[async_trait]
impl ExtractionStrategy for GenericStrategy {
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        Ok(format!(
            "[File Analysis] Name: {}, Size: {} KB, Type: {}",
            file.original_name,
            file.size_kb(),
            file.extension()
        ))
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Paths that do not exist: metadata strategies must never touch them.
    fn upload(name: &str, size_bytes: u64) -> UploadedFile {
        UploadedFile::new(name, "/nonexistent/upload", size_bytes)
    }

    #[tokio::test]
    async fn test_image_summary() {
        let result = ImageStrategy.extract(&upload("photo.png", 204_800)).await.unwrap();
        assert_eq!(result, "[Image Analysis] Name: photo.png, Size: 200.00 KB");
    }

    #[tokio::test]
    async fn test_document_placeholder() {
        let result = DocumentStrategy
            .extract(&upload("report.docx", 51_200))
            .await
            .unwrap();
        assert!(result.starts_with("[Document Analysis] Name: report.docx, Size: 50.00 KB."));
        assert!(result.contains("detailed document parsing would be available"));
    }

    #[tokio::test]
    async fn test_generic_reports_extension() {
        let result = GenericStrategy.extract(&upload("Slides.KEY", 2048)).await.unwrap();
        assert_eq!(result, "[File Analysis] Name: Slides.KEY, Size: 2.00 KB, Type: .key");
    }

    #[tokio::test]
    async fn test_generic_without_extension() {
        let result = GenericStrategy.extract(&upload("Makefile", 512)).await.unwrap();
        assert_eq!(result, "[File Analysis] Name: Makefile, Size: 0.50 KB, Type: ");
    }
}
