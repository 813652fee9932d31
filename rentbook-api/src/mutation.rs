//! Which cached resources each write invalidates.

use rentbook_cache::Resource;
use rentbook_core::Id;

/// A successful write against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateListing,
    UpdateListing(Id),
    DeleteListing(Id),
    CreateBooking,
    ChangeBookingStatus(Id),
    CancelBooking(Id),
}

impl Mutation {
    /// Resource families whose cached reads are stale after this write.
    pub fn invalidates(&self) -> Vec<Resource> {
        match self {
            Mutation::CreateListing => vec![Resource::Listings],
            Mutation::UpdateListing(id) | Mutation::DeleteListing(id) => {
                vec![Resource::Listings, Resource::Listing(*id)]
            }
            Mutation::CreateBooking
            | Mutation::ChangeBookingStatus(_)
            | Mutation::CancelBooking(_) => vec![Resource::Bookings, Resource::MyBookings],
        }
    }
}
