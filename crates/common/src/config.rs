use crate::error::CallAssistError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Call assistant application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Scratch directory for uploaded media
    pub upload_dir: PathBuf,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,

    /// AssemblyAI API key
    #[serde(skip_serializing)]
    pub assemblyai_api_key: String,

    /// AssemblyAI API base URL
    pub assemblyai_base_url: String,

    /// Speech models in order of preference
    pub speech_models: Vec<String>,

    /// Let the service detect the spoken language
    pub language_detection: bool,

    /// Delay between transcript status polls
    pub transcript_poll_interval_ms: u64,

    /// Anthropic API key
    #[serde(skip_serializing)]
    pub anthropic_api_key: String,

    /// Anthropic API base URL
    pub anthropic_base_url: String,

    /// Model used to draft follow-up emails
    pub llm_model: String,

    /// Output token cap for email drafting
    pub llm_max_tokens: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            assemblyai_api_key: String::new(),
            assemblyai_base_url: "https://api.assemblyai.com".to_string(),
            speech_models: vec!["universal-3-pro".to_string(), "universal-2".to_string()],
            language_detection: true,
            transcript_poll_interval_ms: 3000,
            anthropic_api_key: String::new(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            llm_model: "claude-sonnet-4-20250514".to_string(),
            llm_max_tokens: 1024,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, CallAssistError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            upload_dir: Self::get_env_path("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.cors_origins),
            assemblyai_api_key: std::env::var("ASSEMBLYAI_API_KEY").unwrap_or_default(),
            assemblyai_base_url: std::env::var("ASSEMBLYAI_BASE_URL")
                .unwrap_or(defaults.assemblyai_base_url),
            speech_models: std::env::var("SPEECH_MODELS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.speech_models),
            language_detection: Self::get_env_parsed("LANGUAGE_DETECTION")
                .unwrap_or(defaults.language_detection),
            transcript_poll_interval_ms: Self::get_env_parsed("TRANSCRIPT_POLL_INTERVAL_MS")
                .unwrap_or(defaults.transcript_poll_interval_ms),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or(defaults.anthropic_base_url),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_max_tokens: Self::get_env_parsed("LLM_MAX_TOKENS")
                .unwrap_or(defaults.llm_max_tokens),
        };

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), CallAssistError> {
        let dirs = vec![&self.upload_dir, &self.log_dir];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    CallAssistError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get full path for uploaded file
    pub fn get_upload_path(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Names of API keys that are not configured
    pub fn missing_api_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.assemblyai_api_key.trim().is_empty() {
            missing.push("ASSEMBLYAI_API_KEY");
        }
        if self.anthropic_api_key.trim().is_empty() {
            missing.push("ANTHROPIC_API_KEY");
        }
        missing
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CallAssistError> {
        for (name, url) in [
            ("AssemblyAI", &self.assemblyai_base_url),
            ("Anthropic", &self.anthropic_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CallAssistError::config(format!(
                    "{} base URL must start with http:// or https://",
                    name
                )));
            }
        }

        if self.speech_models.is_empty() {
            return Err(CallAssistError::config("At least one speech model is required"));
        }

        if self.llm_model.is_empty() {
            return Err(CallAssistError::config("LLM model name cannot be empty"));
        }

        if self.llm_max_tokens == 0 {
            return Err(CallAssistError::config("LLM max tokens must be greater than 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(CallAssistError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

/// Split a comma separated list, dropping blanks
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
