//! Backend health page.

use rentbook_api::RentbookApi;
use rentbook_core::{HealthInfo, display_value};
use std::fmt;

pub struct HealthView {
    api: RentbookApi,
    info: Option<HealthInfo>,
}

impl HealthView {
    pub fn new(api: RentbookApi) -> Self {
        Self { api, info: None }
    }

    /// Any failure renders as `status: error`.
    pub async fn load(&mut self) {
        let info = self.api.health().await.unwrap_or_else(|e| {
            rentbook_log::warn!("Health check failed: {}", e);
            HealthInfo::unreachable()
        });
        self.info = Some(info);
    }

    pub fn info(&self) -> Option<&HealthInfo> {
        self.info.as_ref()
    }
}

impl fmt::Display for HealthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(info) = &self.info else {
            return writeln!(f, "Loading health...");
        };

        writeln!(f, "Application Health")?;
        writeln!(f, "  Status:         {}", display_value(info.status.as_ref()))?;
        writeln!(f, "  Database:       {}", display_value(info.db.as_ref()))?;
        writeln!(f, "  Backend image:  {}", display_value(info.backend_image.as_ref()))?;
        writeln!(f, "  Frontend image: {}", display_value(info.frontend_image.as_ref()))
    }
}
