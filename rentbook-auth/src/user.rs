// User traits

use rentbook_core::{Role, User};

/// Trait for authenticated users
pub trait AuthUser: Send + Sync {
    /// Get user ID
    fn user_id(&self) -> String;

    /// Check if user has a role
    fn has_role(&self, role: &str) -> bool;

    /// Check if user has any of the roles
    fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Check if user has all roles
    fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }
}

// A session user carries at most one role string.
impl AuthUser for User {
    fn user_id(&self) -> String {
        self.id.to_string()
    }

    fn has_role(&self, role: &str) -> bool {
        match self.role() {
            Role::Admin => role == Role::ADMIN,
            Role::Other(Some(name)) => name == role,
            Role::Other(None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_roles() {
        let admin = User::new(1).with_role("admin");
        assert!(admin.has_role("admin"));
        assert!(admin.has_any_role(&["staff", "admin"]));
        assert!(!admin.has_all_roles(&["staff", "admin"]));

        let staff = User::new(2).with_role("staff");
        assert!(staff.has_role("staff"));
        assert!(!staff.has_role("admin"));

        let plain = User::new(3);
        assert!(!plain.has_any_role(&["admin", "staff"]));
        assert_eq!(plain.user_id(), "3");
    }
}
