//! Category-keyed strategy dispatch.

use futures::FutureExt;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use super::category::Category;
use super::metadata::{DocumentStrategy, GenericStrategy, ImageStrategy};
use super::pdf::PdfStrategy;
use super::strategy::{ExtractionError, ExtractionStrategy, UploadedFile};
use super::text::TextStrategy;
use crate::config::ExtractionConfig;

/// Structured outcome of one extraction.
///
/// `detail` is always the prompt-ready string, whether or not the strategy
/// succeeded; `ok` only says which of the two it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Category the file was classified as.
    pub category: Category,
    /// Name of the strategy that handled it.
    pub strategy: &'static str,
    /// Whether the strategy produced its normal summary.
    pub ok: bool,
    /// The summary or the flattened error text.
    pub detail: String,
}

/// Routes uploaded files to the strategy registered for their category.
///
/// Extraction never fails: strategy errors and panics are converted into a
/// descriptive string naming the file.
#[derive(Debug, Clone)]
pub struct Extractor {
    strategies: HashMap<Category, Arc<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Build an extractor with the default strategy for every category.
    pub fn new(config: &ExtractionConfig) -> Self {
        let pdf_timeout = Duration::from_secs(config.pdf_timeout_secs);
        let mut strategies: HashMap<Category, Arc<dyn ExtractionStrategy>> = HashMap::new();
        strategies.insert(
            Category::Pdf,
            Arc::new(PdfStrategy::new(config.excerpt_limit, pdf_timeout)),
        );
        strategies.insert(Category::Image, Arc::new(ImageStrategy));
        strategies.insert(Category::Text, Arc::new(TextStrategy::new(config.excerpt_limit)));
        strategies.insert(Category::Document, Arc::new(DocumentStrategy));
        strategies.insert(Category::Other, Arc::new(GenericStrategy));
        Self { strategies }
    }

    /// Replace the strategy used for `category`.
    #[must_use]
    pub fn with_strategy(mut self, category: Category, strategy: Arc<dyn ExtractionStrategy>) -> Self {
        self.strategies.insert(category, strategy);
        self
    }

    /// Prompt-ready summary of `file`.
    pub async fn extract(&self, file: &UploadedFile) -> String {
        self.analyze(file).await.detail
    }

    /// Classify `file`, run its strategy and report the outcome.
    pub async fn analyze(&self, file: &UploadedFile) -> ExtractionReport {
        let category = file.category();
        let Some(strategy) = self.strategies.get(&category) else {
            let err = ExtractionError::NoStrategy(category);
            return Self::failed(file, category, "none", &err.to_string());
        };

        let outcome = AssertUnwindSafe(strategy.extract(file))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(detail)) => {
                tracing::info!(
                    name: "extraction.completed",
                    filename = %file.original_name,
                    category = %category,
                    strategy = strategy.name(),
                    size_bytes = file.size_bytes,
                    "File extracted"
                );
                ExtractionReport {
                    category,
                    strategy: strategy.name(),
                    ok: true,
                    detail,
                }
            }
            Ok(Err(err)) => Self::failed(file, category, strategy.name(), &err.to_string()),
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                Self::failed(file, category, strategy.name(), &message)
            }
        }
    }

    fn failed(
        file: &UploadedFile,
        category: Category,
        strategy: &'static str,
        message: &str,
    ) -> ExtractionReport {
        tracing::warn!(
            name: "extraction.failed",
            filename = %file.original_name,
            category = %category,
            strategy,
            error = %message,
            "Error processing file"
        );
        ExtractionReport {
            category,
            strategy,
            ok: false,
            detail: error_summary(&file.original_name, message),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// The uniform failure text embedded in prompts.
pub fn error_summary(name: &str, message: &str) -> String {
    format!("[File Analysis Error] There was an issue processing the file {name}. Error: {message}")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic during extraction".to_string()
    }
}
