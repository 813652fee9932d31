//! The data-layer entry point.

use crate::error::{ApiError, ApiResult};
use crate::mutation::Mutation;
use rentbook_cache::QueryCache;
use rentbook_config::AppConfig;
use rentbook_http_client::{HttpClient, HttpClientConfig, Response};
use rentbook_session::SessionContext;
use serde::de::DeserializeOwned;

/// Default collection path for listings.
pub const DEFAULT_LISTINGS_PATH: &str = "/products";

/// Typed reads and writes against the backend.
///
/// Reads go through the [`QueryCache`]; writes hit the network and, once
/// they succeed, invalidate the affected resources. Clones share the
/// client, cache and session.
#[derive(Clone)]
pub struct RentbookApi {
    pub(crate) http: HttpClient,
    pub(crate) cache: QueryCache,
    pub(crate) session: SessionContext,
    pub(crate) listings_path: String,
}

impl RentbookApi {
    pub fn new(http: HttpClient, session: SessionContext) -> Self {
        Self {
            http,
            cache: QueryCache::in_memory(),
            session,
            listings_path: DEFAULT_LISTINGS_PATH.to_string(),
        }
    }

    /// Client with auth and logging interceptors, configured from `app`.
    pub fn from_config(app: &AppConfig, session: SessionContext) -> ApiResult<Self> {
        let config = HttpClientConfig::from_app(app)?;
        let http = HttpClient::with_session(config, session.clone())?;
        Ok(Self::new(http, session).with_listings_path(&app.listings_path))
    }

    /// Use `/rooms` (or any other path) for the listings collection.
    pub fn with_listings_path(mut self, path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        self.listings_path = if trimmed.is_empty() {
            DEFAULT_LISTINGS_PATH.to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn listings_path(&self) -> &str {
        &self.listings_path
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> ApiResult<T> {
        let response = self.http.get(path).queries(query).send().await?;
        decode(&response)
    }

    /// Invalidate everything `mutation` made stale.
    pub(crate) async fn commit(&self, mutation: Mutation) -> ApiResult<()> {
        rentbook_log::debug!("{:?} succeeded, invalidating cached reads", mutation);
        self.cache.invalidate(&mutation.invalidates()).await?;
        Ok(())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(response: &Response) -> ApiResult<T> {
    response.json().map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parse a write's response body when it has one.
pub(crate) fn decode_optional<T: DeserializeOwned>(response: &Response) -> Option<T> {
    if response.bytes().is_empty() {
        return None;
    }
    response.json().ok()
}
