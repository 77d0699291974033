use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(calmate::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(calmate::config))]
    Config(String),

    #[error("Language model error: {0}")]
    #[diagnostic(code(calmate::model))]
    Model(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(calmate::google_calendar))]
    Calendar(String),

    #[error("Time error: {0}")]
    #[diagnostic(code(calmate::time))]
    Time(String),

    #[error(transparent)]
    #[diagnostic(code(calmate::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(calmate::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(calmate::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AssistantResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create language model errors
pub fn model_error(message: &str) -> Error {
    Error::Model(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn calendar_error(message: &str) -> Error {
    Error::Calendar(message.to_string())
}

/// Helper to create time parsing errors
pub fn time_error(message: &str) -> Error {
    Error::Time(message.to_string())
}
