//! One listing with its bookings and an inline edit form.

use crate::views::{LOADING, Notice, ViewState, write_notice};
use rentbook_api::RentbookApi;
use rentbook_core::{Booking, Id, Listing, ListingUpdate, find_overlaps, format_timestamp};
use std::collections::BTreeSet;
use std::fmt;

const LOAD_ERROR: &str = "Error loading product";

pub struct ListingDetailView {
    api: RentbookApi,
    id: Id,
    state: ViewState<(Listing, Vec<Booking>)>,
    overlaps: BTreeSet<Id>,
    notice: Option<Notice>,
}

impl ListingDetailView {
    pub fn new(api: RentbookApi, id: Id) -> Self {
        Self {
            api,
            id,
            state: ViewState::Loading,
            overlaps: BTreeSet::new(),
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        let result = self.api.listing_detail(self.id).await;
        self.state = ViewState::from_result(result, LOAD_ERROR, LOAD_ERROR);
        self.overlaps = self
            .bookings()
            .map(find_overlaps)
            .unwrap_or_default();
    }

    pub fn state(&self) -> &ViewState<(Listing, Vec<Booking>)> {
        &self.state
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.state.ready().map(|(listing, _)| listing)
    }

    pub fn bookings(&self) -> Option<&[Booking]> {
        self.state.ready().map(|(_, bookings)| bookings.as_slice())
    }

    pub fn overlaps(&self) -> &BTreeSet<Id> {
        &self.overlaps
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Save name/description edits. Blank fields are left unchanged.
    pub async fn save(&mut self, name: &str, description: &str) {
        let update = ListingUpdate {
            name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
            description: Some(description.to_string()).filter(|d| !d.trim().is_empty()),
            capacity: None,
        };
        if update.is_empty() {
            self.notice = Some(Notice::error("Nothing to save"));
            return;
        }

        match self.api.update_listing(self.id, &update).await {
            Ok(_) => {
                self.notice = Some(Notice::success("Product updated"));
                self.load().await;
            }
            Err(e) => self.notice = Some(Notice::error(e.user_message("Failed to update product"))),
        }
    }
}

impl fmt::Display for ListingDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (listing, bookings) = match &self.state {
            ViewState::Loading => return writeln!(f, "{}", LOADING),
            ViewState::Failed(msg) => return writeln!(f, "{}", msg),
            ViewState::Ready(loaded) => loaded,
        };

        writeln!(f, "Product: {}", listing.name)?;
        if let Some(description) = &listing.description {
            writeln!(f, "{}", description)?;
        }
        writeln!(f, "Capacity: {}", listing.capacity)?;
        writeln!(f)?;
        writeln!(f, "Rentals")?;
        if bookings.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for booking in bookings {
            let flag = if self.overlaps.contains(&booking.id) { " !overlap" } else { "" };
            writeln!(
                f,
                "  - {} - {} [{}]{}",
                format_timestamp(&booking.start_time),
                format_timestamp(&booking.end_time),
                booking.status(),
                flag
            )?;
        }

        write_notice(f, self.notice.as_ref())
    }
}
