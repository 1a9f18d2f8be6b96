//! Sancho's Bot
//!
//! A small chat back-end for a study assistant. The browser sends a message
//! and optionally a file; the server turns the file into a short text summary,
//! wraps everything in a prompt and relays the model's reply.
//!
//! # Modules
//!
//! - [`extraction`]: file classification and per-format text extraction
//! - [`llm`]: `OpenAI`-compatible completion client
//! - [`api`]: HTTP handlers for chat and health
//! - [`upload`]: temporary storage for uploaded files
//! - [`prompt`]: system prompt and user prompt assembly

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::map_err_ignore)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod extraction;
pub mod llm;
pub mod prompt;
pub mod server;
pub mod telemetry;
pub mod upload;

use crate::config::AppConfig;

use extraction::Extractor;
use llm::ChatCompletion;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Completion service the chat endpoint talks to.
    pub llm: Arc<dyn ChatCompletion>,
    /// File-to-text extraction dispatcher.
    pub extractor: Arc<Extractor>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
