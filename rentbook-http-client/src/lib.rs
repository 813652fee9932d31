//! # Rentbook HTTP Client
//!
//! A thin wrapper over `reqwest` that resolves logical API paths against the
//! configured base URL, attaches session credentials and logs every exchange.
//!
//! ## Features
//!
//! - **Base URL resolution**: paths such as `/products` are appended to the
//!   base chosen by [`rentbook_config::AppConfig`]
//! - **Timeouts**: one fixed timeout per client, overridable per request
//! - **Interceptors**: bearer-token or session-user auth, request logging
//! - **Errors**: non-2xx responses carry the status and server message
//!
//! Nothing is retried. Failures reach the caller exactly once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rentbook_http_client::{HttpClient, HttpClientConfig};
//! use rentbook_session::SessionContext;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("http://localhost:3000")
//!         .build();
//!     let client = HttpClient::with_session(config, SessionContext::in_memory())?;
//!
//!     let response = client.get("/products").send().await?;
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod interceptor;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};
pub use interceptor::{AuthInterceptor, Interceptor, LoggingInterceptor, SESSION_USER_HEADER};
pub use request::RequestBuilder;
pub use response::Response;

// Re-export common types
pub use bytes::Bytes;
pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use rentbook_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::interceptor::{AuthInterceptor, Interceptor, LoggingInterceptor};
    pub use crate::request::RequestBuilder;
    pub use crate::response::Response;
    pub use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
}
