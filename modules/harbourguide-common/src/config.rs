use std::env;
use std::path::PathBuf;

use crate::error::HarbourGuideError;

const DEFAULT_AI_BASE_URL: &str = "https://api.deepseek.com";
const DEFAULT_AI_MODEL: &str = "deepseek-chat";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Datasets
    pub data_dir: PathBuf,
    pub gazetteer_path: Option<PathBuf>,

    // AI completion
    pub deepseek_api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_max_tokens: u32,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, HarbourGuideError> {
        dotenvy::dotenv().ok();

        let config = Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public")),
            gazetteer_path: optional_env("GAZETTEER_PATH").map(PathBuf::from),
            deepseek_api_key: optional_env("DEEPSEEK_API_KEY"),
            ai_base_url: env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string()),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            ai_max_tokens: parse_env("AI_MAX_TOKENS", 1024)?,
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: parse_env("PORT", 3001)?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &Option<String>) -> String {
            match val {
                Some(v) => {
                    let n = v.len().min(5);
                    format!("{}...({} chars)", v.get(..n).unwrap_or(""), v.len())
                }
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  DATA_DIR: {}", self.data_dir.display());
        tracing::info!("  DEEPSEEK_API_KEY: {}", preview(&self.deepseek_api_key));
        tracing::info!("  AI_BASE_URL: {}", self.ai_base_url);
        tracing::info!("  AI_MODEL: {}", self.ai_model);
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, HarbourGuideError> {
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| HarbourGuideError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("HARBOURGUIDE_TEST_UNSET_PORT", 3001).unwrap();
        assert_eq!(port, 3001);
    }

    #[test]
    fn parse_env_rejects_non_numeric() {
        env::set_var("HARBOURGUIDE_TEST_BAD_PORT", "three-thousand");
        let result: Result<u16, _> = parse_env("HARBOURGUIDE_TEST_BAD_PORT", 3001);
        assert!(matches!(result, Err(HarbourGuideError::Config(_))));
    }

    #[test]
    fn parse_env_reads_value() {
        env::set_var("HARBOURGUIDE_TEST_GOOD_TOKENS", " 2048 ");
        let tokens: u32 = parse_env("HARBOURGUIDE_TEST_GOOD_TOKENS", 1024).unwrap();
        assert_eq!(tokens, 2048);
    }
}
