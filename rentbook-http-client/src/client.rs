//! HTTP client implementation.

use crate::interceptor::{AuthInterceptor, Interceptor, LoggingInterceptor};
use crate::{HttpClientConfig, HttpClientError, RequestBuilder, Response, Result};
use http::Method;
use reqwest::Request;
use rentbook_session::SessionContext;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client with interceptors and a fixed timeout. Requests are never
/// retried.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.gzip);

        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        let inner = builder
            .build()
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            interceptors: Vec::new(),
        })
    }

    /// Client with the standard interceptor chain: session auth, then logging.
    pub fn with_session(config: HttpClientConfig, session: SessionContext) -> Result<Self> {
        Ok(Self::new(config)?
            .with_interceptor(AuthInterceptor::new(session))
            .with_interceptor(LoggingInterceptor::new()))
    }

    /// Append an interceptor to the chain.
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, url.into())
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, url.into())
    }

    /// Create a PUT request builder.
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PUT, url.into())
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PATCH, url.into())
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::DELETE, url.into())
    }

    /// Create a request builder with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder::new(self, method, url.into())
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Run the interceptor chain around a single attempt.
    ///
    /// Non-2xx responses become [`HttpClientError::Response`].
    pub(crate) async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        let timeout = request.timeout().copied().unwrap_or(self.config.timeout);

        let result = self.execute_once(request, timeout).await;
        if let Err(e) = &result {
            for interceptor in &self.interceptors {
                interceptor.on_error(&method, &url, e);
            }
        }
        result
    }

    async fn execute_once(&self, mut request: Request, timeout: Duration) -> Result<Response> {
        for interceptor in &self.interceptors {
            request = interceptor.intercept_request(request).await?;
        }

        let response = self
            .inner
            .execute(request)
            .await
            .map_err(|e| classify(e, timeout))?;
        let mut response = Response::from_reqwest(response)
            .await
            .map_err(|e| match e {
                HttpClientError::Http(inner) => classify(inner, timeout),
                other => other,
            })?;

        for interceptor in &self.interceptors {
            response = interceptor.intercept_response(response).await?;
        }

        response.error_for_status()
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> HttpClientError {
    if error.is_timeout() {
        HttpClientError::Timeout(timeout)
    } else if error.is_connect() {
        HttpClientError::Connection(error.to_string())
    } else {
        HttpClientError::Http(error)
    }
}
