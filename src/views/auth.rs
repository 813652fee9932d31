//! Login and register forms.

use crate::router::Route;
use rentbook_api::RentbookApi;
use rentbook_core::{Credentials, Registration};
use std::fmt;

pub struct LoginView {
    api: RentbookApi,
    error: Option<String>,
}

impl LoginView {
    pub fn new(api: RentbookApi) -> Self {
        Self { api, error: None }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in. On success the session is persisted and home is next.
    pub async fn submit(&mut self, email: &str, password: &str) -> Option<Route> {
        self.error = None;
        let credentials = match Credentials::new(email, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        match self.api.login(&credentials).await {
            Ok(_) => Some(Route::Home),
            Err(e) => {
                self.error = Some(e.auth_message());
                None
            }
        }
    }
}

impl fmt::Display for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Login")?;
        if let Some(error) = &self.error {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

pub struct RegisterView {
    api: RentbookApi,
    error: Option<String>,
}

impl RegisterView {
    pub fn new(api: RentbookApi) -> Self {
        Self { api, error: None }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn submit(&mut self, email: &str, name: &str, password: &str) -> Option<Route> {
        self.error = None;
        let registration = match Registration::new(email, name, password) {
            Ok(registration) => registration,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        match self.api.register(&registration).await {
            Ok(_) => Some(Route::Home),
            Err(e) => {
                self.error = Some(e.auth_message());
                None
            }
        }
    }
}

impl fmt::Display for RegisterView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Register")?;
        if let Some(error) = &self.error {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
