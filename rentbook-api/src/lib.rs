//! Typed access to the rentbook backend.
//!
//! [`RentbookApi`] wraps the HTTP client, the query cache and the session.
//! Every read is cached per resource and filter set; every successful write
//! invalidates the resources listed by its [`Mutation`].
//!
//! ```rust,no_run
//! use rentbook_api::RentbookApi;
//! use rentbook_config::AppConfig;
//! use rentbook_session::SessionContext;
//!
//! # async fn run() -> rentbook_api::ApiResult<()> {
//! let api = RentbookApi::from_config(&AppConfig::default(), SessionContext::in_memory())?;
//! for listing in api.listings().await? {
//!     println!("{}", listing.name);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod bookings;
mod client;
mod listings;

pub mod error;
pub mod mutation;

pub use client::{DEFAULT_LISTINGS_PATH, RentbookApi};
pub use error::{ApiError, ApiResult, TIMEOUT_MESSAGE};
pub use mutation::Mutation;
