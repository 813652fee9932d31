//! Resource families and the keys queries are cached under.

use rentbook_core::Id;
use std::fmt;

/// A family of cached queries. Invalidating a resource drops every query
/// stored under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Listings,
    Listing(Id),
    Bookings,
    MyBookings,
    Availability,
    Health,
}

impl Resource {
    /// Whether reads of this resource may be served from the cache.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Resource::Availability)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Listings => "listings",
            Resource::Listing(_) => "listing",
            Resource::Bookings => "bookings",
            Resource::MyBookings => "my-bookings",
            Resource::Availability => "availability",
            Resource::Health => "health",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Listing(id) => write!(f, "listing:{id}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Resource plus the parameters that distinguish one query from another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Parameters are sorted so equal filter sets map to one key.
    pub fn with_params<I, K, V>(resource: Resource, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        params.sort();
        Self { resource, params }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

impl From<Resource> for QueryKey {
    fn from(resource: Resource) -> Self {
        QueryKey::new(resource)
    }
}

/// Sent to subscribers when a resource is invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceChanged {
    pub resource: Resource,
}
