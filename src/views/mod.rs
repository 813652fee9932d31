//! Text-rendered page models.
//!
//! Each view owns a clone of the [`RentbookApi`](rentbook_api::RentbookApi),
//! loads through it, and renders itself via `Display`. Load failures are
//! caught here and shown inline with a per-view prefix; nothing is retried.

use rentbook_api::ApiError;
use std::fmt;

pub mod auth;
pub mod book;
pub mod bookings;
pub mod health;
pub mod home;
pub mod listing_detail;
pub mod listings;
pub mod nav;
pub mod reservations;

pub use auth::{LoginView, RegisterView};
pub use book::BookView;
pub use bookings::{BookingAction, BookingsView};
pub use health::HealthView;
pub use home::HomeView;
pub use listing_detail::ListingDetailView;
pub use listings::ListingsView;
pub use nav::{Account, NavBar, NavItem};
pub use reservations::ReservationsView;

/// Placeholder shown while a read is in flight.
pub const LOADING: &str = "Loading...";

/// Lifecycle of one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    /// Inline error text, already prefixed for the view.
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Map a read result, prefixing failures with `prefix: `.
    pub fn from_result(result: Result<T, ApiError>, prefix: &str, fallback: &str) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(e) => {
                rentbook_log::debug!("{}: {}", prefix, e);
                ViewState::Failed(format!("{}: {}", prefix, e.user_message(fallback)))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Transient feedback after an action (toast or alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(msg: impl Into<String>) -> Self {
        Notice::Success(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Notice::Error(msg.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "[ok] {}", msg),
            Notice::Error(msg) => write!(f, "[error] {}", msg),
        }
    }
}

fn write_notice(f: &mut fmt::Formatter<'_>, notice: Option<&Notice>) -> fmt::Result {
    match notice {
        Some(notice) => writeln!(f, "{}", notice),
        None => Ok(()),
    }
}
