//! Request and response interceptors.

use crate::{HttpClientError, Response, Result};
use async_trait::async_trait;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use reqwest::Request;
use rentbook_session::SessionContext;

/// Legacy header carrying the raw session user when there is no token.
pub const SESSION_USER_HEADER: &str = "x-session-user";

/// Interceptor trait for modifying requests and observing responses.
///
/// Interceptors run in registration order. `on_error` is an observer only;
/// the error is always returned to the caller unchanged.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Intercept and optionally modify the request before sending.
    async fn intercept_request(&self, request: Request) -> Result<Request> {
        Ok(request)
    }

    /// Intercept and optionally modify the response after receiving.
    async fn intercept_response(&self, response: Response) -> Result<Response> {
        Ok(response)
    }

    /// Observe a failed request.
    fn on_error(&self, _method: &http::Method, _url: &url::Url, _error: &HttpClientError) {}
}

/// Logs every request, response and failure through `tracing`.
pub struct LoggingInterceptor {
    log_headers: bool,
    log_body: bool,
}

impl LoggingInterceptor {
    /// Create a new logging interceptor. Payloads are logged, headers are not.
    pub fn new() -> Self {
        Self {
            log_headers: false,
            log_body: true,
        }
    }

    /// Enable logging of headers.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }

    /// Disable logging of request payloads.
    pub fn without_body(mut self) -> Self {
        self.log_body = false;
        self
    }

    fn payload(&self, request: &Request) -> Option<String> {
        if !self.log_body {
            return None;
        }
        request
            .body()
            .and_then(|body| body.as_bytes())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept_request(&self, request: Request) -> Result<Request> {
        tracing::debug!(
            timestamp = %timestamp(),
            method = %request.method(),
            url = %request.url(),
            payload = ?self.payload(&request),
            "Sending HTTP request"
        );

        if self.log_headers {
            for (name, value) in request.headers() {
                if name == AUTHORIZATION {
                    continue;
                }
                tracing::trace!(header = %name, value = ?value, "Request header");
            }
        }

        Ok(request)
    }

    async fn intercept_response(&self, response: Response) -> Result<Response> {
        tracing::debug!(
            timestamp = %timestamp(),
            status = %response.status(),
            url = %response.url(),
            "Received HTTP response"
        );

        if self.log_headers {
            for (name, value) in response.headers() {
                tracing::trace!(header = %name, value = ?value, "Response header");
            }
        }

        Ok(response)
    }

    fn on_error(&self, method: &http::Method, url: &url::Url, error: &HttpClientError) {
        tracing::warn!(
            timestamp = %timestamp(),
            method = %method,
            url = %url,
            status = ?error.status_code(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Attaches credentials from the session to every request.
///
/// A stored token becomes `Authorization: Bearer <token>`. Without one, the
/// stored user record is forwarded verbatim in `x-session-user`.
pub struct AuthInterceptor {
    session: SessionContext,
}

impl AuthInterceptor {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Interceptor for AuthInterceptor {
    async fn intercept_request(&self, mut request: Request) -> Result<Request> {
        if let Some(token) = self.session.read_token() {
            let value = HeaderValue::try_from(format!("Bearer {}", token))
                .map_err(|e| HttpClientError::Interceptor(e.to_string()))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        } else if let Some(raw) = self.session.raw_session_user() {
            match HeaderValue::try_from(raw) {
                Ok(value) => {
                    request.headers_mut().insert(SESSION_USER_HEADER, value);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session user is not a valid header value, skipping");
                }
            }
        }
        Ok(request)
    }
}
