use anyhow::{Context, Result};

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_model: optional_env("OPENAI_MODEL", DEFAULT_MODEL),
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_BASE_URL),
            port: optional_env("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_mb: optional_env("MAX_UPLOAD_MB", "25")
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_upload_bytes_converts_megabytes() {
        let config = Config {
            openai_api_key: "sk-test".to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            port: 8000,
            max_upload_mb: 25,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.max_upload_bytes(), 25 * 1024 * 1024);
    }

    #[test]
    fn test_require_env_rejects_missing_variable() {
        let err = require_env("RESUME_SCORER_SURELY_UNSET_VARIABLE").unwrap_err();
        assert!(err.to_string().contains("RESUME_SCORER_SURELY_UNSET_VARIABLE"));
    }

    #[test]
    fn test_optional_env_falls_back_to_default() {
        assert_eq!(
            optional_env("RESUME_SCORER_SURELY_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
