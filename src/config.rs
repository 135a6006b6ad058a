use anyhow::{anyhow, Result};
use std::env;
use tracing::{info, warn};

use crate::llm_providers::LLMProviderType;

// Import logging macros
use crate::{log_system_event, log_validation};

/// Complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LLMConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub study: StudyConfig,
}

/// Generative-language service configuration. `api_key` is `None` when the
/// credential is absent; the definition service degrades in that case
/// instead of failing.
#[derive(Debug, Clone)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub provider: LLMProviderType,
    pub model: Option<String>,
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Logging system configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub log_directory: String,
}

/// Interactive-session tuning.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Visual-transition delay between clearing the flip and moving the
    /// flashcard index, in milliseconds.
    pub flashcard_transition_ms: u64,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        log_system_event!(config, "Loading application configuration from environment variables");

        let config = Config {
            llm: LLMConfig::from_env(),
            server: ServerConfig::from_env()?,
            logging: LoggingConfig::from_env(),
            study: StudyConfig::from_env()?,
        };

        log_system_event!(config, "Configuration loaded successfully");
        config.log_configuration_summary();

        Ok(config)
    }

    /// Log a summary of loaded configuration (without sensitive data).
    fn log_configuration_summary(&self) {
        info!(
            llm_api_key_masked = %self
                .llm
                .api_key
                .as_deref()
                .map(mask_sensitive_data)
                .unwrap_or_else(|| "<absent>".to_string()),
            llm_provider = ?self.llm.provider,
            llm_model = ?self.llm.model,
            server_address = %format!("{}:{}", self.server.host, self.server.port),
            log_level = %self.logging.level,
            flashcard_transition_ms = self.study.flashcard_transition_ms,
            "Configuration summary"
        );
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(anyhow!("Server port must be greater than 0"));
        }

        if self.llm.api_key.is_none() {
            warn!("LLM API key is absent - glossary definitions will be unavailable");
        }

        if !["trace", "debug", "info", "warn", "error"]
            .contains(&self.logging.level.to_lowercase().as_str())
            && !self.logging.level.contains(',')
        {
            warn!("Invalid log level '{}', using 'info' as fallback", self.logging.level);
        }

        log_validation!(success, "configuration", "Configuration validation completed successfully");
        Ok(())
    }
}

impl LLMConfig {
    fn from_env() -> Self {
        let api_key = env::var("LLM_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = env::var("LLM_BASE_URL").ok();
        let provider = env::var("LLM_PROVIDER")
            .map(|name| LLMProviderType::from_name(&name))
            .unwrap_or(LLMProviderType::Gemini);
        let model = env::var("LLM_MODEL").ok();

        LLMConfig {
            api_key,
            base_url,
            provider,
            model,
        }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            anyhow!(
                "Invalid PORT value: '{}'. Must be a number between 1-65535",
                port_str
            )
        })?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(ServerConfig { port, host })
    }
}

impl LoggingConfig {
    fn from_env() -> Self {
        let level =
            env::var("RUST_LOG").unwrap_or_else(|_| "info,memo_fiche=debug".to_string());

        let file_enabled = env::var("LOG_FILE_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let log_directory = env::var("LOG_DIRECTORY").unwrap_or_else(|_| "logs".to_string());

        LoggingConfig {
            level,
            file_enabled,
            log_directory,
        }
    }
}

impl StudyConfig {
    fn from_env() -> Result<Self> {
        let ms_str = env::var("FLASHCARD_TRANSITION_MS").unwrap_or_else(|_| "200".to_string());
        let flashcard_transition_ms = ms_str.parse::<u64>().map_err(|_| {
            anyhow!(
                "Invalid FLASHCARD_TRANSITION_MS value: '{}'. Must be a duration in milliseconds",
                ms_str
            )
        })?;

        Ok(StudyConfig {
            flashcard_transition_ms,
        })
    }
}

/// Mask sensitive data in configuration for safe logging.
fn mask_sensitive_data(data: &str) -> String {
    if data.len() <= 8 {
        "*".repeat(data.len())
    } else {
        format!("{}***{}", &data[..4], &data[data.len() - 4..])
    }
}
