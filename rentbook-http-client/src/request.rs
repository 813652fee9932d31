//! Request builder.

use crate::{HttpClient, HttpClientError, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

/// HTTP request builder.
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    error: Option<HttpClientError>,
}

impl<'a> RequestBuilder<'a> {
    /// Create a new request builder.
    pub(crate) fn new(client: &'a HttpClient, method: Method, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            error: None,
        }
    }

    /// Add a header to the request. Invalid names or values fail at send.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error
                    .get_or_insert(HttpClientError::RequestBuild(format!("invalid header '{name}'")));
            }
        }
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.query.push((k.into(), v.into()));
        }
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(bytes);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize JSON body");
                self.error.get_or_insert(HttpClientError::Json(e.to_string()));
            }
        }
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the path against the base URL and append query parameters.
    ///
    /// The base path is kept: `/products` on `http://host/api/` is
    /// `http://host/api/products`.
    pub(crate) fn build_url(&self) -> Result<url::Url> {
        let absolute = self.url.starts_with("http://") || self.url.starts_with("https://");
        let raw = match self.client.config().base_url.as_deref() {
            Some(base) if !absolute => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                self.url.trim_start_matches('/')
            ),
            _ => self.url.clone(),
        };

        let mut url =
            url::Url::parse(&raw).map_err(|e| HttpClientError::InvalidUrl(format!("{raw}: {e}")))?;

        if !self.query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send the request.
    pub async fn send(self) -> Result<Response> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let url = self.build_url()?;

        let mut request = self.client.inner().request(self.method.clone(), url);

        for (name, value) in &self.client.config().default_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        if let Some(body) = self.body {
            request = request.body(body);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        self.client.execute(request.build()?).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{HttpClient, HttpClientConfig};

    fn client(base: Option<&str>) -> HttpClient {
        let mut builder = HttpClientConfig::builder();
        if let Some(base) = base {
            builder = builder.base_url(base);
        }
        HttpClient::new(builder.build()).unwrap()
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let client = client(Some("http://localhost:5173/api/"));
        let url = client.get("/products").build_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:5173/api/products");
    }

    #[test]
    fn test_build_url_appends_query() {
        let client = client(Some("http://localhost:3000"));
        let url = client
            .get("/book/availability")
            .query("room_id", "4")
            .query("date", "2025-03-05")
            .build_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/book/availability?room_id=4&date=2025-03-05"
        );
    }

    #[test]
    fn test_absolute_url_ignores_base() {
        let client = client(Some("http://localhost:3000"));
        let url = client.get("https://other.example/health").build_url().unwrap();
        assert_eq!(url.as_str(), "https://other.example/health");
    }

    #[test]
    fn test_relative_without_base_is_invalid() {
        let client = client(None);
        assert!(client.get("/products").build_url().is_err());
    }
}
