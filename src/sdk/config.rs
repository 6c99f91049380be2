use std::env;
use thiserror::Error;

pub const API_KEY_VAR: &str = "TOMTOM_API_KEY";
pub const BASE_URL_VAR: &str = "TOMTOM_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.tomtom.com";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOMTOM_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid service base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where and how to reach the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Reads the key (required) and base URL (optional) from the environment.
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let config = Self::new(api_key);
        match lookup(BASE_URL_VAR) {
            Some(url) => config.with_base_url(url),
            None => Ok(config),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let parsed = reqwest::Url::parse(&url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url,
                reason: "not a base URL".to_string(),
            });
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }
}
