//! Typed application settings and API base selection.

use crate::{ConfigError, ConfigManager, ENV_PREFIX, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::{Host, Url};

/// Path prefix used for API calls when the base is relative.
pub const DEFAULT_API_PREFIX: &str = "/api";

const DEFAULT_API_PROXY: &str = "http://localhost:3000";
const DEFAULT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_LISTINGS_PATH: &str = "/products";

/// Which base URL strategy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Debug builds default to development, release builds to production.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => f.write_str("development"),
            BuildMode::Production => f.write_str("production"),
        }
    }
}

/// Where API paths are resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    /// Path on the application origin, e.g. `/api`.
    Relative(String),
    /// Fully qualified API location.
    Absolute(Url),
}

/// True for `localhost`, loopback addresses and the unspecified address.
pub fn is_loopback_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_unspecified(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback() || ip.is_unspecified(),
        None => false,
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Settings for one client process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub mode: BuildMode,
    /// Production API location; absolute URL or a path on the origin.
    pub api_url: Option<String>,
    /// Development target that `/api/*` is forwarded to, prefix stripped.
    pub api_proxy: String,
    /// Origin that relative production bases are resolved against.
    pub origin: String,
    pub timeout_secs: u64,
    /// Collection path for listings (`/products` or `/rooms`).
    pub listings_path: String,
    /// File backing the local session store.
    pub storage_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::from_build(),
            api_url: None,
            api_proxy: DEFAULT_API_PROXY.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            listings_path: DEFAULT_LISTINGS_PATH.to_string(),
            storage_path: default_storage_path(),
        }
    }
}

/// `<data dir>/rentbook/storage.json`, or `.rentbook/storage.json` when the
/// platform has no data directory.
pub fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("rentbook"))
        .unwrap_or_else(|| PathBuf::from(".rentbook"))
        .join("storage.json")
}

impl AppConfig {
    /// Load from an optional config file, `.env`, then `RENTBOOK_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        if let Some(path) = file {
            manager.load_file(path)?;
        }
        manager.load_dotenv(None)?;
        Self::from_manager(&manager)
    }

    /// Build typed settings, falling back to defaults for absent keys.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            mode: manager.get_parsed("mode")?.unwrap_or(defaults.mode),
            api_url: manager
                .get_parsed::<String>("api_url")?
                .filter(|url| !url.trim().is_empty()),
            api_proxy: manager
                .get_parsed("api_proxy")?
                .unwrap_or(defaults.api_proxy),
            origin: manager.get_parsed("origin")?.unwrap_or(defaults.origin),
            timeout_secs: manager
                .get_parsed("timeout_secs")?
                .unwrap_or(defaults.timeout_secs),
            listings_path: manager
                .get_parsed("listings_path")?
                .unwrap_or(defaults.listings_path),
            storage_path: manager
                .get_parsed::<String>("storage_path")?
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
        };

        if config.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Select the API base for the current mode.
    ///
    /// A production URL pointing at a loopback host is discarded in favour of
    /// the relative `/api` path.
    pub fn api_base(&self) -> Result<ApiBase> {
        match self.mode {
            BuildMode::Development => Ok(ApiBase::Relative(DEFAULT_API_PREFIX.to_string())),
            BuildMode::Production => {
                let Some(raw) = self.api_url.as_deref().map(str::trim) else {
                    return Ok(ApiBase::Relative(DEFAULT_API_PREFIX.to_string()));
                };

                if raw.starts_with('/') {
                    return Ok(ApiBase::Relative(raw.to_string()));
                }

                let url = parse_url(raw)?;
                if is_loopback_host(&url) {
                    rentbook_log::warn!(
                        "Production API URL {} points at a loopback host, using {} instead",
                        url,
                        DEFAULT_API_PREFIX
                    );
                    return Ok(ApiBase::Relative(DEFAULT_API_PREFIX.to_string()));
                }

                Ok(ApiBase::Absolute(url))
            }
        }
    }

    /// Concrete URL that endpoint paths are appended to.
    ///
    /// In development the `/api` prefix is rewritten onto the proxy target,
    /// so `/api/products` reaches `<api_proxy>/products`.
    pub fn resolve_base_url(&self) -> Result<Url> {
        let url = match (self.mode, self.api_base()?) {
            (_, ApiBase::Absolute(url)) => url,
            (BuildMode::Development, ApiBase::Relative(_)) => parse_url(&self.api_proxy)?,
            (BuildMode::Production, ApiBase::Relative(path)) => {
                let origin = parse_url(&self.origin)?;
                origin.join(&path).map_err(|source| ConfigError::InvalidUrl {
                    url: path.clone(),
                    source,
                })?
            }
        };

        rentbook_log::debug!("API base {} (mode {})", url, self.mode);
        Ok(url)
    }
}
