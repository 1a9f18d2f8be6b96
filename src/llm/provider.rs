//! Provider detection and URL construction.
//!
//! All supported providers speak the chat completions wire format; they only
//! differ in where the endpoint lives.

/// Supported LLM providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// `OpenAI` (api.openai.com)
    OpenAI,
    /// Azure `OpenAI` Service
    AzureOpenAI {
        /// Deployment name (required for Azure)
        deployment_name: String,
        /// API version (e.g., "2024-08-01-preview")
        api_version: String,
    },
    /// Groq (groq.com)
    Groq,
    /// `OpenRouter` (openrouter.ai)
    OpenRouter,
    /// Generic OpenAI-compatible provider
    Generic,
}

impl Provider {
    /// Detect provider from base URL.
    #[must_use]
    pub fn detect_from_url(base_url: &str) -> Self {
        let lower = base_url.to_lowercase();

        if lower.contains("azure.com") {
            Self::AzureOpenAI {
                deployment_name: String::new(),
                api_version: "2024-08-01-preview".to_string(),
            }
        } else if lower.contains("groq.com") {
            Self::Groq
        } else if lower.contains("openrouter.ai") {
            Self::OpenRouter
        } else if lower.contains("openai.com") {
            Self::OpenAI
        } else {
            Self::Generic
        }
    }

    /// Build the chat completions URL for this provider.
    ///
    /// Groq's compatible API lives under `/openai`, so its base URL is
    /// expected to include that segment (`https://api.groq.com/openai`).
    #[must_use]
    pub fn build_chat_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        match self {
            Self::AzureOpenAI {
                deployment_name,
                api_version,
            } => format!(
                "{base}/openai/deployments/{deployment_name}/chat/completions?api-version={api_version}"
            ),
            _ => format!("{base}/v1/chat/completions"),
        }
    }

    /// Azure expects an `api-key` header instead of bearer auth.
    #[must_use]
    pub fn uses_api_key_header(&self) -> bool {
        matches!(self, Self::AzureOpenAI { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_groq() {
        assert_eq!(Provider::detect_from_url("https://api.groq.com/openai"), Provider::Groq);
    }

    #[test]
    fn test_detect_openai() {
        assert_eq!(Provider::detect_from_url("https://api.openai.com"), Provider::OpenAI);
    }

    #[test]
    fn test_detect_azure() {
        let provider = Provider::detect_from_url("https://my-resource.openai.azure.com");
        assert!(matches!(provider, Provider::AzureOpenAI { .. }));
        assert!(provider.uses_api_key_header());
    }

    #[test]
    fn test_detect_local_is_generic() {
        assert_eq!(Provider::detect_from_url("http://127.0.0.1:1234"), Provider::Generic);
    }

    #[test]
    fn test_build_url_trims_slash() {
        let url = Provider::Groq.build_chat_url("https://api.groq.com/openai/");
        assert_eq!(url, "https://api.groq.com/openai/v1/chat/completions");
    }

    #[test]
    fn test_build_url_azure() {
        let provider = Provider::AzureOpenAI {
            deployment_name: "gpt-4o".to_string(),
            api_version: "2024-08-01-preview".to_string(),
        };
        assert_eq!(
            provider.build_chat_url("https://my-resource.openai.azure.com"),
            "https://my-resource.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-08-01-preview"
        );
    }
}
