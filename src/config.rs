use std::time::Duration;

use serde::Deserialize;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommender backend
    #[serde(default = "default_api_url")]
    pub recommender_api_url: String,

    /// Per-request timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub recommender_timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub recommender_log_filter: String,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recommender_api_url: default_api_url(),
            recommender_timeout_secs: default_timeout_secs(),
            recommender_log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        Ok(config.normalized())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.to_lowercase(), v));
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.recommender_api_url.trim().trim_end_matches('/');
        self.recommender_api_url = trimmed.to_string();
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.recommender_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.recommender_api_url, "http://localhost:8000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_vars(vars(&[
            ("RECOMMENDER_API_URL", "http://10.0.0.5:9000/"),
            ("RECOMMENDER_TIMEOUT_SECS", "0"),
            ("RECOMMENDER_LOG_FILTER", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.recommender_api_url, "http://10.0.0.5:9000");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.recommender_log_filter, "debug");
    }

    #[test]
    fn test_invalid_timeout_fails() {
        let result = Config::from_vars(vars(&[("RECOMMENDER_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }
}
