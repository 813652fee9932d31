//! Login and registration payloads.

use crate::error::{ValidationError, ValidationResult};
use crate::user::User;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> ValidationResult<Self> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if password.is_empty() {
            return Err(ValidationError::Required("Password"));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Registration {
    pub fn new(email: &str, name: &str, password: &str) -> ValidationResult<Self> {
        let Credentials { email, password } = Credentials::new(email, password)?;
        Ok(Self {
            email,
            name: name.trim().to_string(),
            password,
        })
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

/// Body of a successful login or register call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}
