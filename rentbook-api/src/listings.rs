//! Listing queries and admin mutations.

use crate::client::{RentbookApi, decode_optional};
use crate::error::ApiResult;
use crate::mutation::Mutation;
use rentbook_cache::{QueryKey, Resource};
use rentbook_core::{Booking, BookingFilter, Id, Listing, ListingDraft, ListingUpdate};

impl RentbookApi {
    fn listing_path(&self, id: Id) -> String {
        format!("{}/{}", self.listings_path, id)
    }

    /// All listings.
    pub async fn listings(&self) -> ApiResult<Vec<Listing>> {
        let key = QueryKey::new(Resource::Listings);
        self.cache
            .fetch(&key, || self.get_json(&self.listings_path, Vec::new()))
            .await
    }

    /// One listing by id.
    pub async fn listing(&self, id: Id) -> ApiResult<Listing> {
        let key = QueryKey::new(Resource::Listing(id));
        let path = self.listing_path(id);
        self.cache.fetch(&key, || self.get_json(&path, Vec::new())).await
    }

    /// Bookings for one listing.
    pub async fn listing_bookings(&self, id: Id) -> ApiResult<Vec<Booking>> {
        self.bookings(&BookingFilter {
            room_id: Some(id),
            ..BookingFilter::default()
        })
        .await
    }

    /// A listing and its bookings, fetched concurrently.
    pub async fn listing_detail(&self, id: Id) -> ApiResult<(Listing, Vec<Booking>)> {
        futures::future::try_join(self.listing(id), self.listing_bookings(id)).await
    }

    pub async fn create_listing(&self, draft: &ListingDraft) -> ApiResult<Option<Listing>> {
        let response = self.http.post(&self.listings_path).json(draft).send().await?;
        self.commit(Mutation::CreateListing).await?;
        Ok(decode_optional(&response))
    }

    pub async fn update_listing(&self, id: Id, update: &ListingUpdate) -> ApiResult<Option<Listing>> {
        let response = self.http.put(self.listing_path(id)).json(update).send().await?;
        self.commit(Mutation::UpdateListing(id)).await?;
        Ok(decode_optional(&response))
    }

    pub async fn delete_listing(&self, id: Id) -> ApiResult<()> {
        self.http.delete(self.listing_path(id)).send().await?;
        self.commit(Mutation::DeleteListing(id)).await
    }
}
