use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Event API error: {0}")]
    #[diagnostic(code(eventlist::api))]
    Api(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(eventlist::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(eventlist::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(eventlist::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(eventlist::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(eventlist::other))]
    Other(String),
}

// Implement From for JSON body errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
#[allow(dead_code)]
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create remote API errors
pub fn api_error(message: &str) -> Error {
    Error::Api(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
