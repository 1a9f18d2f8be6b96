//! File-to-text extraction for chat uploads.
//!
//! An uploaded file is classified by extension into a [`Category`] and handed
//! to the matching [`ExtractionStrategy`]. Every strategy produces a short,
//! bounded description suitable for embedding in an LLM prompt.
//!
//! # Strategies
//!
//! - [`PdfStrategy`] - page count plus the first part of the text layer
//! - [`TextStrategy`] - first part of a `.txt`/`.md` file
//! - [`ImageStrategy`] - name and size only (no OCR)
//! - [`DocumentStrategy`] - placeholder for Word documents
//! - [`GenericStrategy`] - name, size and extension for everything else
//!
//! # Usage
//!
//! ```rust,ignore
//! use sancho_bot::extraction::{Extractor, UploadedFile};
//!
//! let extractor = Extractor::default();
//! let summary = extractor.extract(&UploadedFile::new("notes.txt", path, size)).await;
//! ```
//!
//! [`Extractor::extract`] never fails. Read errors, corrupt PDFs and even
//! panicking strategies come back as a `[File Analysis Error]` string.

mod category;
mod dispatcher;
mod metadata;
mod pdf;
mod strategy;
mod text;
mod truncate;

pub use category::{Category, extension_of};
pub use dispatcher::{ExtractionReport, Extractor, error_summary};
pub use metadata::{DocumentStrategy, GenericStrategy, ImageStrategy};
pub use pdf::{ParsedPdf, PdfStrategy, parse_pdf};
pub use strategy::{ExtractionError, ExtractionStrategy, UploadedFile};
pub use text::TextStrategy;
pub use truncate::{DEFAULT_EXCERPT_LIMIT, Excerpt, TRUNCATION_MARKER, truncate};
