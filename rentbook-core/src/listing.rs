//! Rentable listings.

use crate::error::{ValidationError, ValidationResult};
use crate::Id;
use serde::{Deserialize, Deserializer, Serialize};

fn default_capacity() -> i64 {
    1
}

/// Absent and `null` capacities both read as the default.
fn capacity_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(default_capacity))
}

/// A rentable item or room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_capacity", deserialize_with = "capacity_or_default")]
    pub capacity: i64,
}

/// Payload for creating a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub capacity: i64,
}

impl ListingDraft {
    /// Validate raw form input. The name is trimmed and must not be blank;
    /// a missing capacity becomes 1.
    pub fn new(
        name: &str,
        description: Option<&str>,
        capacity: Option<i64>,
    ) -> ValidationResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let capacity = match capacity {
            None | Some(0) => default_capacity(),
            Some(c) if c < 0 => return Err(ValidationError::InvalidCapacity),
            Some(c) => c,
        };

        Ok(Self {
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
            capacity,
        })
    }
}

/// Partial update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
}

impl ListingUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.capacity.is_none()
    }
}
