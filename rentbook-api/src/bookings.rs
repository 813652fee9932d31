//! Booking queries and mutations.

use crate::client::{RentbookApi, decode_optional};
use crate::error::ApiResult;
use crate::mutation::Mutation;
use rentbook_cache::{QueryKey, Resource};
use rentbook_core::{
    Availability, Booking, BookingFilter, BookingRequest, BookingStatus, Id, StatusChange,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct StatusReply {
    status: Option<String>,
}

impl RentbookApi {
    /// Server-computed availability of a listing on a date. Never cached.
    pub async fn availability(&self, room_id: Id, date: &str) -> ApiResult<Availability> {
        self.get_json(
            "/book/availability",
            vec![("room_id", room_id.to_string()), ("date", date.to_string())],
        )
        .await
    }

    /// Create a booking. Without an explicit user the signed-in user is
    /// attached.
    pub async fn book(&self, request: BookingRequest) -> ApiResult<Option<Booking>> {
        let request = match request.user_id {
            Some(_) => request,
            None => {
                let user_id = self.session.read_session().map(|u| u.id);
                request.with_user(user_id)
            }
        };

        let response = self.http.post("/book").json(&request).send().await?;
        self.commit(Mutation::CreateBooking).await?;
        Ok(decode_optional(&response))
    }

    /// Bookings matching `filter` (admin table).
    pub async fn bookings(&self, filter: &BookingFilter) -> ApiResult<Vec<Booking>> {
        filter.validate()?;
        let query = filter.to_query();
        let key = QueryKey::with_params(Resource::Bookings, query.clone());
        self.cache.fetch(&key, || self.get_json("/book", query)).await
    }

    /// The signed-in user's bookings, keyed by user id.
    pub async fn my_bookings(&self) -> ApiResult<Vec<Booking>> {
        let query: Vec<(&'static str, String)> = self
            .session
            .read_session()
            .map(|user| vec![("user_id", user.id.to_string())])
            .unwrap_or_default();
        let key = QueryKey::with_params(Resource::MyBookings, query.clone());
        self.cache.fetch(&key, || self.get_json("/book/my", query)).await
    }

    /// Change a booking's status; returns the status the server reports.
    pub async fn set_booking_status(&self, id: Id, status: BookingStatus) -> ApiResult<BookingStatus> {
        let response = self
            .http
            .patch(format!("/book/{id}/status"))
            .json(&StatusChange { status })
            .send()
            .await?;
        self.commit(Mutation::ChangeBookingStatus(id)).await?;

        let reported = decode_optional::<StatusReply>(&response)
            .and_then(|reply| reply.status)
            .and_then(|s| s.parse().ok());
        Ok(reported.unwrap_or(status))
    }

    /// Cancel one of the signed-in user's bookings.
    pub async fn cancel_booking(&self, id: Id) -> ApiResult<()> {
        self.remove_booking(id).await
    }

    /// Delete any booking (admin).
    pub async fn delete_booking(&self, id: Id) -> ApiResult<()> {
        self.remove_booking(id).await
    }

    async fn remove_booking(&self, id: Id) -> ApiResult<()> {
        self.http.delete(format!("/book/{id}")).send().await?;
        self.commit(Mutation::CancelBooking(id)).await
    }
}
