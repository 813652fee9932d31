//! Authorization for the rentbook client.
//!
//! Guards are pure checks over a [`SessionState`](rentbook_session::SessionState).
//! They decide what the UI shows and are not a security boundary: the
//! backend re-checks every request.
//!
//! ```
//! use rentbook_auth::{GuardOutcome, require_admin};
//! use rentbook_session::SessionContext;
//!
//! let gate = require_admin("/products");
//! let session = SessionContext::in_memory();
//! assert_eq!(gate.evaluate(&session), GuardOutcome::Redirect("/products".into()));
//! ```

pub mod error;
pub mod guard;
pub mod user;

pub use error::{AuthError, Result};
pub use guard::{AuthGuard, Guard, GuardOutcome, RoleGuard, RouteGate, require_admin};
pub use user::AuthUser;
