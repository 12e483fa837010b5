//! Engine configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use crate::infrastructure::openai_compat::{DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};
use crate::use_cases::hint::DEFAULT_MAX_HINT_CHARS;

const DEFAULT_DATABASE_URL: &str = "sqlite:charades.db";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BLOB_DIR: &str = "uploads";
const DEFAULT_BLOB_PUBLIC_URL: &str = "/uploads";
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub database_url: String,
    pub llm_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub blob_dir: String,
    pub blob_public_url: String,
    pub server_addr: SocketAddr,
    /// Raw `CORS_ALLOWED_ORIGINS`; unset disables the CORS layer.
    pub cors_allowed_origins: Option<String>,
    pub max_hint_chars: usize,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());
        let port = parse_number("SERVER_PORT", var("SERVER_PORT"), DEFAULT_SERVER_PORT)?;
        let server_addr = format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidAddress(format!("{}:{} ({})", host, port, e)))?;

        Ok(Self {
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            llm_base_url: var("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_api_key: var("LLM_API_KEY").or_else(|| var("GROQ_API_KEY")),
            llm_model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: Duration::from_secs(parse_number(
                "LLM_TIMEOUT_SECS",
                var("LLM_TIMEOUT_SECS"),
                DEFAULT_LLM_TIMEOUT_SECS,
            )?),
            blob_dir: var("BLOB_DIR").unwrap_or_else(|| DEFAULT_BLOB_DIR.to_string()),
            blob_public_url: normalize_public_url(
                var("BLOB_PUBLIC_URL").unwrap_or_else(|| DEFAULT_BLOB_PUBLIC_URL.to_string()),
            ),
            server_addr,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            max_hint_chars: parse_number("MAX_HINT_CHARS", var("MAX_HINT_CHARS"), DEFAULT_MAX_HINT_CHARS)?,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

/// `/uploads/` and `uploads` both become `/uploads`.
fn normalize_public_url(url: String) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.starts_with('/') || trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("config");
        assert_eq!(config.database_url, "sqlite:charades.db");
        assert_eq!(config.llm_base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(config.llm_model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm_api_key, None);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.blob_dir, "uploads");
        assert_eq!(config.blob_public_url, "/uploads");
        assert_eq!(config.server_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.cors_allowed_origins, None);
        assert_eq!(config.max_hint_chars, 500);
    }

    #[test]
    fn groq_key_is_a_fallback_for_the_api_key() {
        let config = config_from(&[("GROQ_API_KEY", "gsk_1")]).expect("config");
        assert_eq!(config.llm_api_key.as_deref(), Some("gsk_1"));

        let config = config_from(&[("GROQ_API_KEY", "gsk_1"), ("LLM_API_KEY", "sk_2")]).expect("config");
        assert_eq!(config.llm_api_key.as_deref(), Some("sk_2"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("LLM_API_KEY", "  "), ("SERVER_PORT", "")]).expect("config");
        assert_eq!(config.llm_api_key, None);
        assert_eq!(config.server_addr.port(), 3000);
    }

    #[test]
    fn bad_numbers_are_reported() {
        assert!(matches!(
            config_from(&[("MAX_HINT_CHARS", "lots")]),
            Err(ConfigError::InvalidNumber { name: "MAX_HINT_CHARS", .. })
        ));
        assert!(matches!(
            config_from(&[("SERVER_HOST", "not a host")]),
            Err(ConfigError::InvalidAddress(_))
        ));
    }

    #[test]
    fn public_url_is_normalized() {
        let config = config_from(&[("BLOB_PUBLIC_URL", "media/")]).expect("config");
        assert_eq!(config.blob_public_url, "/media");
    }
}
