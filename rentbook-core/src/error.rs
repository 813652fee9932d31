//! Client-side form validation errors.

use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejections raised before a request is ever sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Capacity must be at least 1")]
    InvalidCapacity,

    #[error("Choose a listing and a date")]
    MissingSelection,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown booking status '{0}'")]
    UnknownStatus(String),

    #[error("{0} is required")]
    Required(&'static str),
}
