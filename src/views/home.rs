//! Landing page.

use crate::router::Route;
use crate::views::nav::BRAND;
use std::fmt;

#[derive(Debug, Clone, Copy, Default)]
pub struct HomeView;

impl HomeView {
    pub fn links(&self) -> [(&'static str, Route); 2] {
        [("Products", Route::Listings), ("Bookings", Route::Bookings)]
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", BRAND)?;
        writeln!(f, "Manage products and rentals with a simple interface.")?;
        for (label, route) in self.links() {
            writeln!(f, "  -> {} ({})", label, route)?;
        }
        Ok(())
    }
}
