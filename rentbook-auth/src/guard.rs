// Route guards

use crate::{AuthError, AuthUser, Result};
use rentbook_session::{SessionContext, SessionState};

/// Guard trait for protecting routes
pub trait Guard: Send + Sync {
    /// Check if the current session can proceed
    fn can_activate(&self, state: &SessionState) -> Result<()>;
}

/// Authentication guard - ensures someone is signed in
#[derive(Debug, Clone, Default)]
pub struct AuthGuard;

impl AuthGuard {
    pub fn new() -> Self {
        Self
    }
}

impl Guard for AuthGuard {
    fn can_activate(&self, state: &SessionState) -> Result<()> {
        match state {
            SessionState::Authenticated { .. } => Ok(()),
            SessionState::Anonymous => Err(AuthError::Unauthorized),
        }
    }
}

/// Role-based authorization guard
#[derive(Debug, Clone)]
pub struct RoleGuard {
    required_roles: Vec<String>,
    require_all: bool,
}

impl RoleGuard {
    /// Create a guard that requires ANY of the roles
    pub fn any(roles: Vec<String>) -> Self {
        Self {
            required_roles: roles,
            require_all: false,
        }
    }

    /// Create a guard that requires ALL of the roles
    pub fn all(roles: Vec<String>) -> Self {
        Self {
            required_roles: roles,
            require_all: true,
        }
    }

    /// Guard for the `admin` role
    pub fn admin() -> Self {
        Self::any(vec![rentbook_core::Role::ADMIN.to_string()])
    }

    /// Check if user has required roles
    pub fn check_roles<T: AuthUser>(&self, user: &T) -> bool {
        let role_refs: Vec<&str> = self.required_roles.iter().map(|s| s.as_str()).collect();

        if self.require_all {
            user.has_all_roles(&role_refs)
        } else {
            user.has_any_role(&role_refs)
        }
    }
}

impl Guard for RoleGuard {
    fn can_activate(&self, state: &SessionState) -> Result<()> {
        AuthGuard.can_activate(state)?;

        match state.user() {
            Some(user) if self.check_roles(user) => Ok(()),
            _ => Err(AuthError::MissingRole(self.required_roles.join(", "))),
        }
    }
}

/// What a gated route should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Show the protected view.
    Render,
    /// Navigate to this route instead.
    Redirect(String),
}

/// Wraps a guard with the route to fall back to when it refuses.
///
/// Evaluated against a fresh read of the session every time; nothing is
/// cached between navigations.
pub struct RouteGate<G: Guard> {
    guard: G,
    fallback: String,
}

impl<G: Guard> RouteGate<G> {
    pub fn new(guard: G, fallback: impl Into<String>) -> Self {
        Self {
            guard,
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn evaluate_state(&self, state: &SessionState) -> GuardOutcome {
        match self.guard.can_activate(state) {
            Ok(()) => GuardOutcome::Render,
            Err(e) => {
                rentbook_log::debug!("Route refused ({}), redirecting to {}", e, self.fallback);
                GuardOutcome::Redirect(self.fallback.clone())
            }
        }
    }

    pub fn evaluate(&self, session: &SessionContext) -> GuardOutcome {
        self.evaluate_state(&session.state())
    }
}

/// Admin-only gate redirecting to `fallback`.
pub fn require_admin(fallback: impl Into<String>) -> RouteGate<RoleGuard> {
    RouteGate::new(RoleGuard::admin(), fallback)
}
