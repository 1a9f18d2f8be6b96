//! JSON API handlers.

pub mod chat;
pub mod error;
pub mod health;

pub use chat::{ChatReply, ChatSubmission, chat_handler};
pub use error::ApiError;
pub use health::{HealthResponse, health_handler};
