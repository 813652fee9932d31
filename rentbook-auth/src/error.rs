// Error types for authorization

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Missing required role: {0}")]
    MissingRole(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
