//! LLM completion client.
//!
//! The chat endpoint only needs one thing from a model: send a system prompt
//! plus a single user message and get text back. [`ChatCompletion`] is that
//! seam; [`ChatCompletionsDriver`] implements it against any
//! `OpenAI`-compatible `/v1/chat/completions` endpoint (`OpenAI`, Azure, Groq,
//! `OpenRouter`, local servers).
//!
//! # Example
//!
//! ```rust,ignore
//! use sancho_bot::llm::{ChatCompletion, ChatCompletionsDriver, LlmSettings, Message, Provider};
//!
//! let settings = LlmSettings {
//!     base_url: "https://api.groq.com/openai".to_string(),
//!     api_key: Some("gsk-...".to_string()),
//!     model: "llama3-70b-8192".to_string(),
//!     provider: Provider::Groq,
//!     temperature: 0.7,
//!     max_tokens: 1000,
//! };
//! let reply = ChatCompletionsDriver::new(settings)
//!     .complete(vec![Message::user("Hello!")])
//!     .await?;
//! ```

pub mod chat_completions;
pub mod provider;

pub use chat_completions::ChatCompletionsDriver;
pub use provider::Provider;

/// LLM connection and generation settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `llama3-70b-8192`).
    pub model: String,
    /// Provider type, detected from `base_url`.
    pub provider: Provider,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// A message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: MessageRole,
    /// Plain text content.
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt.
    System,
    /// User message.
    User,
}

/// Errors from the completion service.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with an error status.
    #[error("{status}: {message}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Provider error message, or the raw body.
        message: String,
    },

    /// The response did not contain a reply.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// A service that turns a conversation into a single reply.
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync + std::fmt::Debug {
    /// Request a completion for `messages` and return the reply text.
    async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError>;

    /// Whether credentials are configured (reported by the health check).
    fn is_configured(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_like_openai() {
        let value = serde_json::to_value(Message::system("be nice")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "system", "content": "be nice"}));
    }

    #[test]
    fn test_api_error_display() {
        let err = LlmError::Api {
            status: 401,
            message: "Invalid API Key".to_string(),
        };
        assert_eq!(err.to_string(), "401: Invalid API Key");
    }
}
