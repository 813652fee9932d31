//! Domain types shared by every rentbook crate.
//!
//! These are client-side shapes only. The remote API owns the real records;
//! nothing here enforces the booking invariants, it only describes them.
//!
//! ```
//! use rentbook_core::{Booking, find_overlaps};
//!
//! let bookings: Vec<Booking> = serde_json::from_str(r#"[
//!     {"id": 1, "room_id": 4, "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T10:30:00Z"},
//!     {"id": 2, "room_id": 4, "start_time": "2025-03-05T10:00:00Z", "end_time": "2025-03-05T11:00:00Z"}
//! ]"#).unwrap();
//!
//! let flagged = find_overlaps(&bookings);
//! assert!(flagged.contains(&1) && flagged.contains(&2));
//! ```

pub mod auth;
pub mod booking;
pub mod error;
pub mod health;
pub mod listing;
pub mod schedule;
pub mod user;

pub use auth::{AuthResponse, Credentials, Registration};
pub use booking::{Availability, Booking, BookingFilter, BookingRequest, BookingStatus, StatusChange};
pub use error::{ValidationError, ValidationResult};
pub use health::{HealthInfo, display_value};
pub use listing::{Listing, ListingDraft, ListingUpdate};
pub use schedule::{TimeRange, find_overlaps, format_timestamp, parse_timestamp};
pub use user::{Role, User};

/// Identifier type used by the remote API for every record.
pub type Id = i64;
