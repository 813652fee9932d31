//! The signed-in user's reservations.

use crate::views::{LOADING, Notice, ViewState, write_notice};
use rentbook_api::RentbookApi;
use rentbook_core::{Booking, Id, format_timestamp};
use std::fmt;

pub struct ReservationsView {
    api: RentbookApi,
    state: ViewState<Vec<Booking>>,
    notice: Option<Notice>,
}

impl ReservationsView {
    pub fn new(api: RentbookApi) -> Self {
        Self {
            api,
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        let result = self.api.my_bookings().await;
        self.state = ViewState::from_result(result, "Failed to load reservations", "Server error");
    }

    pub fn state(&self) -> &ViewState<Vec<Booking>> {
        &self.state
    }

    pub fn reservations(&self) -> &[Booking] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn cancel(&mut self, id: Id) {
        match self.api.cancel_booking(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success("Reservation cancelled"));
                self.load().await;
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.user_message("Failed to cancel reservation")))
            }
        }
    }
}

impl fmt::Display for ReservationsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bookings = match &self.state {
            ViewState::Loading => return writeln!(f, "{}", LOADING),
            ViewState::Failed(msg) => return writeln!(f, "{}", msg),
            ViewState::Ready(bookings) => bookings,
        };

        writeln!(f, "My Reservations")?;
        write_notice(f, self.notice.as_ref())?;
        if bookings.is_empty() {
            return writeln!(f, "No reservations found.");
        }

        for booking in bookings {
            writeln!(f)?;
            writeln!(f, "  Product: {}", booking.listing_label())?;
            writeln!(f, "  Start:   {}", format_timestamp(&booking.start_time))?;
            writeln!(f, "  End:     {}", format_timestamp(&booking.end_time))?;
            writeln!(f, "  Status:  {}", booking.status())?;
            writeln!(f, "  Notes:   {}", booking.notes.as_deref().unwrap_or_default())?;
            writeln!(f, "  [Cancel #{}]", booking.id)?;
        }
        Ok(())
    }
}
