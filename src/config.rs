use crate::client::PagePolicy;
use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub policy: PagePolicy,
    pub request_timeout: Duration,
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let number = |key: &str, default: u64| -> Result<u64> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} must be a valid number")),
                None => Ok(default),
            }
        };

        let policy = PagePolicy {
            initial_limit: number("SCOUT_INITIAL_LIMIT", 15)? as usize,
            page_limit: number("SCOUT_PAGE_LIMIT", 10)? as usize,
        };
        ensure!(policy.initial_limit > 0, "SCOUT_INITIAL_LIMIT must be positive");
        ensure!(policy.page_limit > 0, "SCOUT_PAGE_LIMIT must be positive");

        Ok(Self {
            api_url: lookup("SCOUT_API_URL").unwrap_or_else(|| "http://localhost:5001".to_string()),
            policy,
            request_timeout: Duration::from_secs(number("SCOUT_TIMEOUT_SECS", 30)?),
            output_dir: lookup("SCOUT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("scout_output")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:5001");
        assert_eq!(config.policy, PagePolicy::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("scout_output"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SCOUT_API_URL", "https://scout.example.com"),
            ("SCOUT_INITIAL_LIMIT", "20"),
            ("SCOUT_PAGE_LIMIT", " 5 "),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://scout.example.com");
        assert_eq!(config.policy.initial_limit, 20);
        assert_eq!(config.policy.page_limit, 5);
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(load(&[("SCOUT_PAGE_LIMIT", "0")]).is_err());
        assert!(load(&[("SCOUT_INITIAL_LIMIT", "lots")]).is_err());
    }
}
