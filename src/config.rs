//! Runtime configuration loaded from the environment

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Local backend used when `RECOMMENDER_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HEALTH_PATH: &str = "/health";
pub const DEFAULT_HEALTHY_STATUS: &str = "healthy";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RECOMMENDER_API_URL '{value}' is not a valid http(s) URL")]
    InvalidUrl { value: String },

    #[error("RECOMMENDER_TIMEOUT_SECS '{value}' must be a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// Client configuration. Built once at startup and handed to the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base endpoint of the recommendation service, without trailing slash
    pub api_url: String,
    /// Ceiling for a single request, after which it counts as unreachable
    pub timeout: Duration,
    pub health_path: String,
    /// Value of the health body's `status` field that means the service is up
    pub healthy_status: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            healthy_status: DEFAULT_HEALTHY_STATUS.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = match get("RECOMMENDER_API_URL") {
            Some(value) => parse_api_url(&value)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let timeout = match get("RECOMMENDER_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout { value }),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let health_path = get("RECOMMENDER_HEALTH_PATH")
            .map(|p| if p.starts_with('/') { p } else { format!("/{p}") })
            .unwrap_or_else(|| DEFAULT_HEALTH_PATH.to_string());

        let healthy_status =
            get("RECOMMENDER_HEALTHY_STATUS").unwrap_or_else(|| DEFAULT_HEALTHY_STATUS.to_string());

        Ok(Config {
            api_url,
            timeout,
            health_path,
            healthy_status,
        })
    }
}

fn parse_api_url(value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        value: value.to_string(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(value.trim_end_matches('/').to_string())
}
