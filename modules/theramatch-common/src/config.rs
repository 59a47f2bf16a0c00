use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::signal::DEFAULT_MATCH_TOOL;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_CONFIRM_THRESHOLD: u64 = 500;
pub const DEFAULT_HIDE_CONTROLS_MS: u64 = 3000;
pub const DEFAULT_PLAYER_ORIGIN: &str = "https://player.vimeo.com";
pub const DEFAULT_SESSION_DIR: &str = ".theramatch-session";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the app serving `/api/match`.
    pub api_url: String,
    /// Tool whose results carry the running match count.
    pub match_tool: String,
    /// Match counts above this ask the visitor before ranking.
    pub confirm_threshold: u64,
    pub hide_controls_after: Duration,
    /// Only player messages from this origin are trusted.
    pub player_origin: String,
    pub session_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            match_tool: DEFAULT_MATCH_TOOL.to_string(),
            confirm_threshold: DEFAULT_CONFIRM_THRESHOLD,
            hide_controls_after: Duration::from_millis(DEFAULT_HIDE_CONTROLS_MS),
            player_origin: DEFAULT_PLAYER_ORIGIN.to_string(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Ok(Self {
            api_url: std::env::var("THERAMATCH_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            match_tool: std::env::var("THERAMATCH_MATCH_TOOL").unwrap_or(defaults.match_tool),
            confirm_threshold: parse_env("THERAMATCH_CONFIRM_THRESHOLD")?
                .unwrap_or(defaults.confirm_threshold),
            hide_controls_after: parse_env("THERAMATCH_HIDE_CONTROLS_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.hide_controls_after),
            player_origin: std::env::var("THERAMATCH_PLAYER_ORIGIN")
                .unwrap_or(defaults.player_origin),
            session_dir: std::env::var("THERAMATCH_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_dir),
        })
    }

    pub fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  THERAMATCH_API_URL: {}", self.api_url);
        tracing::info!("  THERAMATCH_MATCH_TOOL: {}", self.match_tool);
        tracing::info!("  THERAMATCH_CONFIRM_THRESHOLD: {}", self.confirm_threshold);
        tracing::info!(
            "  THERAMATCH_HIDE_CONTROLS_MS: {}",
            self.hide_controls_after.as_millis()
        );
        tracing::info!("  THERAMATCH_PLAYER_ORIGIN: {}", self.player_origin);
        tracing::info!("  THERAMATCH_SESSION_DIR: {}", self.session_dir.display());
    }
}

fn parse_env(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{key} must be a non-negative integer, got {raw:?}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_behaviour() {
        let config = Config::default();
        assert_eq!(config.confirm_threshold, 500);
        assert_eq!(config.hide_controls_after, Duration::from_secs(3));
        assert_eq!(config.player_origin, "https://player.vimeo.com");
        assert_eq!(config.match_tool, DEFAULT_MATCH_TOOL);
    }

    #[test]
    fn parse_env_rejects_garbage() {
        std::env::set_var("THERAMATCH_TEST_PARSE_GARBAGE", "lots");
        assert!(parse_env("THERAMATCH_TEST_PARSE_GARBAGE").is_err());
        std::env::set_var("THERAMATCH_TEST_PARSE_OK", " 750 ");
        assert_eq!(parse_env("THERAMATCH_TEST_PARSE_OK").unwrap(), Some(750));
        assert_eq!(parse_env("THERAMATCH_TEST_PARSE_UNSET").unwrap(), None);
    }
}
