//! Admin booking table with filters, overlap flags and status actions.

use crate::views::{LOADING, Notice, ViewState, write_notice};
use rentbook_api::RentbookApi;
use rentbook_core::{Booking, BookingFilter, BookingStatus, Id, find_overlaps, format_timestamp};
use std::collections::BTreeSet;
use std::fmt;

const LOAD_ERROR: &str = "Error loading bookings";

/// Per-row buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Approve,
    Reject,
    Delete,
}

impl BookingAction {
    /// Approve unless already confirmed, reject unless already rejected,
    /// delete always.
    pub fn available_for(booking: &Booking) -> Vec<BookingAction> {
        let status = booking.status();
        let mut actions = Vec::with_capacity(3);
        if status != BookingStatus::Confirmed {
            actions.push(BookingAction::Approve);
        }
        if status != BookingStatus::Rejected {
            actions.push(BookingAction::Reject);
        }
        actions.push(BookingAction::Delete);
        actions
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Approve => "Approve",
            BookingAction::Reject => "Reject",
            BookingAction::Delete => "Delete",
        }
    }
}

pub struct BookingsView {
    api: RentbookApi,
    filter: BookingFilter,
    state: ViewState<Vec<Booking>>,
    overlaps: BTreeSet<Id>,
    notice: Option<Notice>,
}

impl BookingsView {
    pub fn new(api: RentbookApi) -> Self {
        Self {
            api,
            filter: BookingFilter::default(),
            state: ViewState::Loading,
            overlaps: BTreeSet::new(),
            notice: None,
        }
    }

    /// Load with the applied filters.
    pub async fn load(&mut self) {
        let result = self.api.bookings(&self.filter).await;
        self.state = ViewState::from_result(result, LOAD_ERROR, LOAD_ERROR);
        self.overlaps = self
            .state
            .ready()
            .map(|bookings| find_overlaps(bookings))
            .unwrap_or_default();
    }

    pub fn filter(&self) -> &BookingFilter {
        &self.filter
    }

    pub async fn apply_filters(&mut self, filter: BookingFilter) {
        if let Err(e) = filter.validate() {
            self.notice = Some(Notice::error(e.to_string()));
            return;
        }
        self.filter = filter;
        self.notice = Some(Notice::success("Filters applied"));
        self.load().await;
    }

    pub async fn reset_filters(&mut self) {
        self.filter = BookingFilter::default();
        self.notice = Some(Notice::success("Filters reset"));
        self.load().await;
    }

    pub fn state(&self) -> &ViewState<Vec<Booking>> {
        &self.state
    }

    pub fn rows(&self) -> &[Booking] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    /// True when the row overlaps another non-rejected booking of the same
    /// listing. Display only.
    pub fn is_overlapping(&self, id: Id) -> bool {
        self.overlaps.contains(&id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn perform(&mut self, id: Id, action: BookingAction) {
        match action {
            BookingAction::Approve => self.set_status(id, BookingStatus::Confirmed).await,
            BookingAction::Reject => self.set_status(id, BookingStatus::Rejected).await,
            BookingAction::Delete => self.delete(id).await,
        }
    }

    pub async fn set_status(&mut self, id: Id, status: BookingStatus) {
        match self.api.set_booking_status(id, status).await {
            Ok(reported) => {
                self.notice = Some(Notice::success(format!("Status updated: {}", reported)));
                self.load().await;
            }
            Err(e) => self.notice = Some(Notice::error(e.user_message("Failed to update status"))),
        }
    }

    pub async fn delete(&mut self, id: Id) {
        match self.api.delete_booking(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success("Booking deleted"));
                self.load().await;
            }
            Err(e) => self.notice = Some(Notice::error(e.user_message("Failed to delete booking"))),
        }
    }
}

impl fmt::Display for BookingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bookings = match &self.state {
            ViewState::Loading => return writeln!(f, "{}", LOADING),
            ViewState::Failed(msg) => return writeln!(f, "{}", msg),
            ViewState::Ready(bookings) => bookings,
        };

        writeln!(f, "Bookings")?;
        write_notice(f, self.notice.as_ref())?;
        if !self.filter.is_empty() {
            let applied: Vec<String> = self
                .filter
                .to_query()
                .into_iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            writeln!(f, "Filters: {}", applied.join(" "))?;
        }

        writeln!(f, "  ID | Room | User | Start | End | Status | Actions")?;
        for booking in bookings {
            let marker = if self.is_overlapping(booking.id) { "!" } else { " " };
            let actions: Vec<&str> = BookingAction::available_for(booking)
                .iter()
                .map(BookingAction::label)
                .collect();
            writeln!(
                f,
                "{} {} | {} | {} | {} | {} | {} | {}",
                marker,
                booking.id,
                booking.listing_label(),
                booking.user_label(),
                format_timestamp(&booking.start_time),
                format_timestamp(&booking.end_time),
                booking.status(),
                actions.join(" ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: Option<&str>) -> Booking {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "room_id": 2,
            "start_time": "2025-03-05T09:00:00Z",
            "end_time": "2025-03-05T10:00:00Z",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_actions_by_status() {
        use BookingAction::*;
        assert_eq!(BookingAction::available_for(&booking(None)), vec![Approve, Reject, Delete]);
        assert_eq!(BookingAction::available_for(&booking(Some("confirmed"))), vec![Reject, Delete]);
        assert_eq!(BookingAction::available_for(&booking(Some("rejected"))), vec![Approve, Delete]);
    }
}
