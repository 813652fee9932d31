//! Client-side session for rentbook.
//!
//! The session is two entries in a [`LocalStorage`]: the bearer token under
//! `token` and the signed-in user, JSON encoded, under `sessionUser`. There
//! is no expiry and no signature check; the backend is the authority.
//!
//! # Examples
//!
//! ```
//! use rentbook_session::*;
//! use rentbook_core::User;
//!
//! let session = SessionContext::in_memory();
//! assert_eq!(session.state(), SessionState::Anonymous);
//!
//! session.write_session(&User::new(1).with_role("admin")).unwrap();
//! assert!(session.state().is_admin());
//!
//! session.logout().unwrap();
//! assert!(!session.state().is_authenticated());
//! ```

pub mod context;
pub mod error;
pub mod storage;

pub use context::{SESSION_USER_KEY, SessionContext, SessionState, TOKEN_KEY};
pub use error::{SessionError, SessionResult};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
