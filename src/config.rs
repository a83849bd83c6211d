use crate::error::AppResult;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Default base URL of the remote event service
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote event service (the `/events` resource lives under it)
    pub api_base_url: String,
    /// Timeout applied to every remote request, in seconds
    pub request_timeout_secs: u64,
}

/// Optional overrides read from `config/eventlist.toml`
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from the config file and environment.
    ///
    /// Precedence: defaults, then `config/eventlist.toml` if present,
    /// then environment variables.
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut api_base_url = DEFAULT_API_URL.to_string();
        let mut request_timeout_secs = DEFAULT_TIMEOUT_SECS;

        // Apply file overrides if the config file exists
        if let Ok(content) = fs::read_to_string("config/eventlist.toml") {
            let overrides: FileOverrides = toml::from_str(&content)?;
            if let Some(url) = overrides.api_base_url {
                api_base_url = url;
            }
            if let Some(timeout) = overrides.request_timeout_secs {
                request_timeout_secs = timeout;
            }
        }

        // Environment wins over the file
        if let Ok(url) = env::var("EVENTS_API_URL") {
            api_base_url = url;
        }
        if let Ok(timeout) = env::var("EVENTS_API_TIMEOUT_SECS") {
            request_timeout_secs = timeout
                .parse::<u64>()
                .map_err(|_| crate::error::config_error("Invalid EVENTS_API_TIMEOUT_SECS format"))?;
        }

        Ok(Config {
            api_base_url,
            request_timeout_secs,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
