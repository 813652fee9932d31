//! Wiring of config, session, data layer and router.

use crate::router::{Route, Router};
use crate::views::NavBar;
use rentbook_api::{ApiResult, RentbookApi};
use rentbook_config::AppConfig;
use rentbook_session::{FileStorage, SessionContext};

/// One client process.
pub struct App {
    config: AppConfig,
    api: RentbookApi,
    router: Router,
}

impl App {
    pub fn new(config: AppConfig, api: RentbookApi) -> Self {
        Self {
            config,
            api,
            router: Router::new(),
        }
    }

    /// Session backed by the configured storage file.
    pub fn open(config: AppConfig) -> ApiResult<Self> {
        let storage = FileStorage::open(config.storage_path.clone());
        Self::with_session(config, SessionContext::new(storage))
    }

    pub fn with_session(config: AppConfig, session: SessionContext) -> ApiResult<Self> {
        let api = RentbookApi::from_config(&config, session)?;
        Ok(Self::new(config, api))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api(&self) -> &RentbookApi {
        &self.api
    }

    pub fn session(&self) -> &SessionContext {
        self.api.session()
    }

    pub fn nav(&self) -> NavBar {
        NavBar::for_state(&self.session().state())
    }

    /// Resolve `path` against the current session, gate included.
    pub fn navigate(&self, path: &str) -> Route {
        let route = self.router.navigate(path, self.session());
        rentbook_log::debug!("navigate {} -> {}", path, route);
        route
    }

    pub async fn logout(&self) -> ApiResult<Route> {
        self.api.logout().await?;
        Ok(Route::Home)
    }
}
