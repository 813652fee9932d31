//! Path-based navigation with the admin gate.

use rentbook_auth::{GuardOutcome, RoleGuard, RouteGate, require_admin};
use rentbook_core::Id;
use rentbook_session::SessionContext;
use std::fmt;

/// Pages reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Listings,
    ListingDetail(Id),
    /// Admin booking table.
    Bookings,
    BookListing,
    MyReservations,
    Health,
}

impl Route {
    /// Parse a path. Unknown paths land on [`Route::Home`].
    ///
    /// Both the `/products` and legacy `/rooms` spellings are accepted.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["products" | "rooms"] => Route::Listings,
            ["products" | "rooms", id] => id
                .parse()
                .map(Route::ListingDetail)
                .unwrap_or(Route::Home),
            ["bookings"] => Route::Bookings,
            ["rent-product" | "book-room"] => Route::BookListing,
            ["my-reservations"] => Route::MyReservations,
            ["health"] => Route::Health,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Listings => "/products".to_string(),
            Route::ListingDetail(id) => format!("/products/{}", id),
            Route::Bookings => "/bookings".to_string(),
            Route::BookListing => "/rent-product".to_string(),
            Route::MyReservations => "/my-reservations".to_string(),
            Route::Health => "/health".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolves paths to routes, applying the admin gate on every call.
pub struct Router {
    admin_gate: RouteGate<RoleGuard>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            admin_gate: require_admin(Route::Listings.path()),
        }
    }

    /// The route that will actually render for `path` under the current
    /// session.
    pub fn navigate(&self, path: &str, session: &SessionContext) -> Route {
        let route = Route::parse(path);
        if route != Route::Bookings {
            return route;
        }

        match self.admin_gate.evaluate(session) {
            GuardOutcome::Render => route,
            GuardOutcome::Redirect(to) => Route::parse(&to),
        }
    }
}
