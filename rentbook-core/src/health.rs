//! Backend health metadata.
//!
//! The backend reports free-form JSON here, so every field keeps the raw
//! value and is only turned into text for display.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_image: Option<Value>,
}

/// Strings print unquoted, `null` and absent print empty, anything else as JSON.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

impl HealthInfo {
    /// What the health view shows when the backend cannot be reached.
    pub fn unreachable() -> Self {
        Self {
            status: Some(Value::String("error".to_string())),
            ..Self::default()
        }
    }

    /// The status when the backend reported it as a string.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status_text(), Some("ok") | Some("healthy"))
    }

    pub fn is_error(&self) -> bool {
        self.status_text() == Some("error")
    }
}
