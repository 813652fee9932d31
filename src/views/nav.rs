//! Navigation bar.

use crate::router::Route;
use rentbook_session::SessionState;
use std::fmt;

pub const BRAND: &str = "Product Rental App";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub route: Route,
}

impl NavItem {
    fn new(label: &str, route: Route) -> Self {
        Self {
            label: label.to_string(),
            route,
        }
    }
}

/// Links for the current session.
///
/// Listings are always visible, the admin table only for admins, booking
/// pages for anyone signed in. The right-hand side is the user's display
/// name (with logout) or the login/register pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub items: Vec<NavItem>,
    pub account: Account,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    SignedIn { display_name: String },
    SignedOut { links: Vec<NavItem> },
}

impl NavBar {
    pub fn for_state(state: &SessionState) -> Self {
        let mut items = vec![NavItem::new("Products", Route::Listings)];

        let account = match state {
            SessionState::Anonymous => Account::SignedOut {
                links: vec![
                    NavItem::new("Login", Route::Login),
                    NavItem::new("Register", Route::Register),
                ],
            },
            SessionState::Authenticated { user, .. } => {
                if state.is_admin() {
                    items.push(NavItem::new("Bookings", Route::Bookings));
                }
                items.push(NavItem::new("Rent Product", Route::BookListing));
                items.push(NavItem::new("My Reservations", Route::MyReservations));
                Account::SignedIn {
                    display_name: user.display_name().to_string(),
                }
            }
        };

        Self { items, account }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

impl fmt::Display for NavBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} |", BRAND)?;
        for item in &self.items {
            write!(f, " {} ({})", item.label, item.route)?;
        }
        match &self.account {
            Account::SignedIn { display_name } => write!(f, " | {} [Logout]", display_name),
            Account::SignedOut { links } => {
                f.write_str(" |")?;
                for link in links {
                    write!(f, " {} ({})", link.label, link.route)?;
                }
                Ok(())
            }
        }
    }
}
