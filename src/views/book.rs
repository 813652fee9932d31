//! Book a listing: pick one and a date, check availability, submit.

use crate::router::Route;
use crate::views::{Notice, write_notice};
use rentbook_api::RentbookApi;
use rentbook_core::{BookingRequest, Id, Listing};
use std::fmt;

pub const AVAILABLE: &str = "Available";
pub const NOT_AVAILABLE: &str = "Not available — please choose another date";

pub struct BookView {
    api: RentbookApi,
    listings: Vec<Listing>,
    room_id: Option<Id>,
    date: String,
    notes: String,
    /// `None` until both a listing and a date are chosen, or when the
    /// availability check failed.
    available: Option<bool>,
    notice: Option<Notice>,
}

impl BookView {
    pub fn new(api: RentbookApi) -> Self {
        Self {
            api,
            listings: Vec::new(),
            room_id: None,
            date: String::new(),
            notes: String::new(),
            available: None,
            notice: None,
        }
    }

    /// Load the listing picker. A failed load leaves it empty.
    pub async fn load(&mut self) {
        self.listings = match self.api.listings().await {
            Ok(listings) => listings,
            Err(e) => {
                rentbook_log::warn!("Could not load listings for booking: {}", e);
                Vec::new()
            }
        };
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub async fn select(&mut self, room_id: Id) {
        self.room_id = Some(room_id);
        self.refresh_availability().await;
    }

    pub async fn set_date(&mut self, date: &str) {
        self.date = date.trim().to_string();
        self.refresh_availability().await;
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Ask the server about the current selection. Never cached.
    pub async fn refresh_availability(&mut self) {
        self.available = None;
        let Some(room_id) = self.room_id else {
            return;
        };
        if self.date.is_empty() || BookingRequest::new(Some(room_id), &self.date).is_err() {
            return;
        }

        self.available = match self.api.availability(room_id, &self.date).await {
            Ok(availability) => Some(availability.is_available()),
            Err(e) => {
                rentbook_log::debug!("Availability check failed: {}", e);
                None
            }
        };
    }

    pub fn available(&self) -> Option<bool> {
        self.available
    }

    pub fn availability_label(&self) -> Option<&'static str> {
        self.available
            .map(|available| if available { AVAILABLE } else { NOT_AVAILABLE })
    }

    /// Submission is allowed only after the server reported `true`.
    pub fn can_submit(&self) -> bool {
        self.available == Some(true)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Create the booking. Returns the route to show next on success.
    pub async fn submit(&mut self) -> Option<Route> {
        if !self.can_submit() {
            return None;
        }

        let request = match BookingRequest::new(self.room_id, &self.date) {
            Ok(request) => request.with_notes(self.notes.as_str()),
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return None;
            }
        };

        match self.api.book(request).await {
            Ok(_) => {
                self.notice = Some(Notice::success("Booking created"));
                Some(Route::MyReservations)
            }
            Err(e) => {
                rentbook_log::error!("Booking error: {}", e);
                self.notice = Some(Notice::error(e.user_message("Booking failed")));
                None
            }
        }
    }
}

impl fmt::Display for BookView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Book a Product")?;
        let date = if self.date.is_empty() { "-" } else { self.date.as_str() };
        writeln!(f, "Date: {}", date)?;
        if let Some(label) = self.availability_label() {
            writeln!(f, "  {}", label)?;
        }

        let selected = self
            .room_id
            .map(|id| {
                self.listings
                    .iter()
                    .find(|l| l.id == id)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .unwrap_or_else(|| "Choose a product".to_string());
        writeln!(f, "Product: {}", selected)?;
        for listing in &self.listings {
            writeln!(f, "  [{}] {}", listing.id, listing.name)?;
        }

        if !self.notes.is_empty() {
            writeln!(f, "Notes: {}", self.notes)?;
        }
        writeln!(f, "{}", if self.can_submit() { "[Book]" } else { "[Book] (disabled)" })?;
        write_notice(f, self.notice.as_ref())
    }
}
