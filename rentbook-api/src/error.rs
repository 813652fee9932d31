//! Data-layer errors.

use rentbook_cache::CacheError;
use rentbook_core::ValidationError;
use rentbook_http_client::HttpClientError;
use rentbook_session::SessionError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Shown by login and register when the request times out.
pub const TIMEOUT_MESSAGE: &str =
    "Request timed out. Please check your network or that the backend is running.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] HttpClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Http(e) if e.is_timeout())
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => e.status_code(),
            _ => None,
        }
    }

    /// Server message, else the error text, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let ApiError::Http(e) = self
            && let Some(msg) = e.server_message()
        {
            return msg.to_string();
        }
        let text = self.to_string();
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }

    /// Login/register wording: timeouts get a fixed hint.
    pub fn auth_message(&self) -> String {
        if self.is_timeout() {
            TIMEOUT_MESSAGE.to_string()
        } else {
            self.user_message("Request failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_user_message_prefers_server() {
        let err = ApiError::from(HttpClientError::Response {
            status: 400,
            message: Some("Room is closed".to_string()),
        });
        assert_eq!(err.user_message("Error loading rooms"), "Room is closed");

        let err = ApiError::from(HttpClientError::Response {
            status: 500,
            message: None,
        });
        assert_eq!(
            err.user_message("Error loading rooms"),
            "Request failed with status code 500"
        );
    }

    #[test]
    fn test_auth_message_timeout() {
        let err = ApiError::from(HttpClientError::Timeout(Duration::from_secs(60)));
        assert_eq!(err.auth_message(), TIMEOUT_MESSAGE);

        let err = ApiError::from(ValidationError::Required("Email"));
        assert_eq!(err.auth_message(), "Email is required");
    }
}
