//! Rentbook - a listing rental and booking client.
//!
//! This crate ties the workspace together: the [`App`] owns configuration,
//! the session and the data layer; [`views`] holds one text-rendered model
//! per page; [`router`] maps paths to pages and applies the admin gate.
//!
//! ```rust,no_run
//! use rentbook::prelude::*;
//!
//! # async fn run() -> rentbook::ApiResult<()> {
//! let app = App::with_session(AppConfig::default(), SessionContext::in_memory())?;
//! let mut view = ListingsView::new(app.api().clone());
//! view.load().await;
//! println!("{}", app.nav());
//! println!("{}", view);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod router;
pub mod views;

pub use app::App;
pub use router::{Route, Router};

pub use rentbook_api::{ApiError, ApiResult, RentbookApi};
pub use rentbook_api as api;
pub use rentbook_auth as auth;
pub use rentbook_cache as cache;
pub use rentbook_config as config;
pub use rentbook_core as domain;
pub use rentbook_http_client as http_client;
pub use rentbook_log as log;
pub use rentbook_session as session;

/// Commonly used types.
pub mod prelude {
    pub use crate::app::App;
    pub use crate::router::{Route, Router};
    pub use crate::views::{
        BookView, BookingAction, BookingsView, HealthView, HomeView, ListingDetailView,
        ListingsView, LoginView, NavBar, Notice, RegisterView, ReservationsView, ViewState,
    };
    pub use rentbook_api::{ApiError, ApiResult, RentbookApi};
    pub use rentbook_config::AppConfig;
    pub use rentbook_core::{
        Booking, BookingFilter, BookingStatus, Id, Listing, ListingDraft, ListingUpdate, User,
    };
    pub use rentbook_session::{SessionContext, SessionState};
}
