//! Error types for the rentbook CLI.

use rentbook::ApiError;
use rentbook::config::ConfigError;
use std::fmt;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug)]
pub enum CliError {
    /// Request or data-layer failure
    Api(ApiError),

    /// Configuration could not be loaded
    Config(String),

    /// Interactive prompt failed (no terminal, interrupted)
    Prompt(String),

    /// Invalid argument
    InvalidArgument(String),

    /// The current session may not open this page
    Forbidden(String),

    /// An action completed with an error message from the view
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Api(e) => write!(f, "{}", e.user_message("Request failed")),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Prompt(msg) => write!(f, "Prompt error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Forbidden(msg) => write!(f, "{}", msg),
            CliError::Failed(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(e: dialoguer::Error) -> Self {
        CliError::Prompt(e.to_string())
    }
}
