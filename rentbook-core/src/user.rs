//! The signed-in user as returned by the auth endpoints.

use crate::Id;
use serde::{Deserialize, Serialize};

/// Session user record. Only `id` is guaranteed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            email: None,
            name: None,
            role: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Name, else email, else `"User"`.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref().filter(|e| !e.is_empty()))
            .unwrap_or("User")
    }

    pub fn role(&self) -> Role {
        Role::from_claim(self.role.as_deref())
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

/// Tagged view of the free-form role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    /// Any other role string, or none at all.
    Other(Option<String>),
}

impl Role {
    pub const ADMIN: &'static str = "admin";

    /// Exact, case-sensitive match on `"admin"`.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(Self::ADMIN) => Role::Admin,
            other => Role::Other(other.map(str::to_string)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Role::Admin => Some(Self::ADMIN),
            Role::Other(name) => name.as_deref(),
        }
    }
}
