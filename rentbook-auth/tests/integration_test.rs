//! Integration tests for rentbook-auth

use rentbook_auth::*;
use rentbook_core::User;
use rentbook_session::{LocalStorage, MemoryStorage, SESSION_USER_KEY, SessionContext};

#[test]
fn test_gate_follows_session_changes() {
    let session = SessionContext::in_memory();
    let gate = require_admin("/products");

    assert_eq!(gate.evaluate(&session), GuardOutcome::Redirect("/products".into()));

    session.write_session(&User::new(1).with_role("admin")).unwrap();
    assert_eq!(gate.evaluate(&session), GuardOutcome::Render);

    session.logout().unwrap();
    assert_eq!(gate.evaluate(&session), GuardOutcome::Redirect("/products".into()));
}

#[test]
fn test_malformed_session_is_redirected() {
    let storage = MemoryStorage::new();
    storage.set_item(SESSION_USER_KEY, "{\"role\":\"admin\"").unwrap();
    let session = SessionContext::new(storage);

    assert_eq!(
        require_admin("/products").evaluate(&session),
        GuardOutcome::Redirect("/products".into())
    );
}

#[test]
fn test_signed_in_gate() {
    let session = SessionContext::in_memory();
    let gate = RouteGate::new(AuthGuard::new(), "/login");
    assert_eq!(gate.evaluate(&session), GuardOutcome::Redirect("/login".into()));

    session.write_session(&User::new(4)).unwrap();
    assert_eq!(gate.evaluate(&session), GuardOutcome::Render);
}
