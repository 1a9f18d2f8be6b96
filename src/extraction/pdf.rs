//! PDF extraction strategy.
//!
//! Uses `lopdf` for the page tree and `pdf-extract` for the text layer. Both
//! are synchronous and can be slow on malformed input, so parsing runs on the
//! blocking pool under a timeout.

use async_trait::async_trait;
use std::time::Duration;

use super::strategy::{ExtractionError, ExtractionStrategy, UploadedFile};
use super::truncate::truncate;

/// Text and page count recovered from a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPdf {
    /// Full extracted text, untruncated.
    pub text: String,
    /// Number of pages in the document.
    pub page_count: usize,
}

/// Strategy for `.pdf` uploads.
#[derive(Debug, Clone)]
pub struct PdfStrategy {
    excerpt_limit: usize,
    timeout: Duration,
}

impl PdfStrategy {
    /// Create a PDF strategy with the given excerpt budget and parse timeout.
    pub fn new(excerpt_limit: usize, timeout: Duration) -> Self {
        Self {
            excerpt_limit,
            timeout,
        }
    }

    /// Render the summary line for an already parsed document.
    pub fn render(&self, name: &str, parsed: &ParsedPdf) -> String {
        format!(
            "[PDF Analysis] Name: {name}, Pages: {}\n\nContent: {}",
            parsed.page_count,
            truncate(&parsed.text, self.excerpt_limit)
        )
    }
}

#[async_trait]
impl ExtractionStrategy for PdfStrategy {
    #[tracing::instrument(skip(self, file), fields(filename = %file.original_name))]
    async fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(&file.stored_path).await?;

        let parsed = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || parse_pdf(&bytes)),
        )
        .await
        .map_err(|_| ExtractionError::Timeout(self.timeout))?
        .map_err(|e| ExtractionError::Task(e.to_string()))??;

        tracing::debug!(
            page_count = parsed.page_count,
            text_length = parsed.text.chars().count(),
            "PDF text extraction complete"
        );

        Ok(self.render(&file.original_name, &parsed))
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// Parse PDF bytes into text and a page count.
pub fn parse_pdf(bytes: &[u8]) -> Result<ParsedPdf, ExtractionError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    let page_count = document.get_pages().len();

    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    Ok(ParsedPdf { text, page_count })
}
