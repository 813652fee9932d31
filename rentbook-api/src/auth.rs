//! Sign-in, registration, sign-out and health.

use crate::client::{RentbookApi, decode};
use crate::error::ApiResult;
use rentbook_cache::{QueryKey, Resource};
use rentbook_core::{AuthResponse, Credentials, HealthInfo, Registration};

impl RentbookApi {
    /// Log in and persist the returned token and user.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        let response = self.http.post("/auth/login").json(credentials).send().await?;
        self.sign_in(decode(&response)?).await
    }

    /// Register and persist the returned token and user.
    pub async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        let response = self
            .http
            .post("/auth/register")
            .json(registration)
            .send()
            .await?;
        self.sign_in(decode(&response)?).await
    }

    async fn sign_in(&self, auth: AuthResponse) -> ApiResult<AuthResponse> {
        self.session.store_auth(&auth)?;
        // Cached reads belong to whoever was signed in before.
        self.cache.clear().await?;
        if let Some(user) = &auth.user {
            rentbook_log::info!("Signed in as {}", user.display_name());
        }
        Ok(auth)
    }

    /// Clear the session user and token.
    pub async fn logout(&self) -> ApiResult<()> {
        self.session.logout()?;
        self.cache.clear().await?;
        Ok(())
    }

    /// Backend health metadata.
    pub async fn health(&self) -> ApiResult<HealthInfo> {
        let key = QueryKey::new(Resource::Health);
        self.cache.fetch(&key, || self.get_json("/health", Vec::new())).await
    }
}
