use crate::llm::{LlmSettings, Provider};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub extraction: ExtractionConfig,
    pub resilience: ResilienceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory the chat front-end is served from.
    pub static_dir: String,
    /// `development` exposes internal error messages in 500 responses.
    pub environment: String,
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Temporary storage for uploaded files.
    pub dir: String,
    /// Largest accepted upload in bytes.
    pub max_file_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Characters of file content embedded in a prompt.
    pub excerpt_limit: usize,
    /// Upper bound on PDF parsing time, in seconds.
    pub pdf_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excerpt_limit: crate::extraction::DEFAULT_EXCERPT_LIMIT,
            pdf_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub timeout_disabled: bool,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "public")?
            .set_default("server.environment", "production")?
            .set_default("uploads.dir", "uploads")?
            .set_default("uploads.max_file_size", 10 * 1024 * 1024)?
            .set_default("extraction.excerpt_limit", 2000)?
            .set_default("extraction.pdf_timeout_secs", 30)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.request_timeout_secs", 60)?
            .set_default("logging.json", false)?;

        // 2. Config file: explicit path must exist, ./config.* is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment variables, e.g. SANCHO_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("SANCHO")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and their env fallbacks) win over everything else
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

/// Problems with the LLM environment variables.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LlmSettingsError {
    #[error("Missing required env var: {0}")]
    Missing(&'static str),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

pub fn load_llm_settings() -> Result<LlmSettings, LlmSettingsError> {
    let base_url = required_var("LLM_BASE_URL")?;
    let model = required_var("LLM_MODEL")?;

    let api_key = env::var("LLM_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let temperature = parsed_var("LLM_TEMPERATURE")?.unwrap_or(0.7);
    let max_tokens = parsed_var("LLM_MAX_TOKENS")?.unwrap_or(1000);

    // Auto-detect provider from base URL
    let mut provider = Provider::detect_from_url(&base_url);

    // Azure routes by deployment rather than model
    if let Provider::AzureOpenAI {
        deployment_name,
        api_version,
    } = &mut provider
    {
        *deployment_name = env::var("AZURE_DEPLOYMENT_NAME").unwrap_or_else(|_| model.clone());
        if let Ok(version) = env::var("AZURE_API_VERSION") {
            *api_version = version;
        }
    }

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
        provider,
        temperature,
        max_tokens,
    })
}

fn required_var(var: &'static str) -> Result<String, LlmSettingsError> {
    let value = env::var(var).map_err(|_| LlmSettingsError::Missing(var))?;
    if value.trim().is_empty() {
        return Err(LlmSettingsError::Empty(var));
    }
    Ok(value)
}

fn parsed_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, LlmSettingsError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LlmSettingsError::Invalid { var, value }),
        _ => Ok(None),
    }
}
