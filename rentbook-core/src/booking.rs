//! Bookings, booking requests and admin filters.

use crate::error::{ValidationError, ValidationResult};
use crate::schedule::{TimeRange, parse_timestamp};
use crate::Id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" | "approved" => Ok(BookingStatus::Confirmed),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A reservation of one listing for a time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Id,
    pub room_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Booking {
    /// Parsed status; absent or unrecognised values read as pending.
    pub fn status(&self) -> BookingStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn interval(&self) -> Option<TimeRange> {
        TimeRange::parse(&self.start_time, &self.end_time)
    }

    /// Listing name, else `#<room_id>`.
    pub fn listing_label(&self) -> String {
        match self.room_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.room_id),
        }
    }

    /// User name, else email, else id, else `-`.
    pub fn user_label(&self) -> String {
        self.user_name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.user_email.clone().filter(|e| !e.is_empty()))
            .or_else(|| self.user_id.map(|id| format!("#{id}")))
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Payload for `POST /book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub room_id: Id,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Both a listing and a `YYYY-MM-DD` date are required.
    pub fn new(room_id: Option<Id>, date: &str) -> ValidationResult<Self> {
        let room_id = room_id.ok_or(ValidationError::MissingSelection)?;
        let date = date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingSelection);
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

        Ok(Self {
            room_id,
            date: date.to_string(),
            user_id: None,
            notes: None,
        })
    }

    pub fn with_user(mut self, user_id: Option<Id>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
        self
    }
}

/// Payload for `PATCH /book/:id/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub status: BookingStatus,
}

/// Admin list filters. Unset or blank fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub user: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<BookingStatus>,
    pub room_id: Option<Id>,
}

impl BookingFilter {
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// Query pairs in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let mut text = |key: &'static str, value: &Option<String>| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((key, v.to_string()));
            }
        };
        text("user", &self.user);
        text("date_from", &self.date_from);
        text("date_to", &self.date_to);
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(room_id) = self.room_id {
            query.push(("room_id", room_id.to_string()));
        }
        query
    }

    /// Reject dates the server would not understand.
    pub fn validate(&self) -> ValidationResult<()> {
        for date in [&self.date_from, &self.date_to].into_iter().flatten() {
            if !date.trim().is_empty() && parse_timestamp(date).is_none() {
                return Err(ValidationError::InvalidDate(date.clone()));
            }
        }
        Ok(())
    }
}

/// Server answer to an availability query.
///
/// Kept as raw JSON so only a literal `true` counts as available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default)]
    pub available: serde_json::Value,
}

impl Availability {
    pub fn new(available: bool) -> Self {
        Self {
            available: serde_json::Value::Bool(available),
        }
    }

    pub fn is_available(&self) -> bool {
        self.available == serde_json::Value::Bool(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        let booking: Booking = serde_json::from_str(
            r#"{"id":1,"room_id":2,"start_time":"2025-03-05T09:00:00Z","end_time":"2025-03-05T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.listing_label(), "#2");
        assert_eq!(booking.user_label(), "-");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert_eq!("Rejected".parse::<BookingStatus>().unwrap(), BookingStatus::Rejected);
        assert!("cancelled".parse::<BookingStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&StatusChange { status: BookingStatus::Confirmed }).unwrap(),
            r#"{"status":"confirmed"}"#
        );
    }

    #[test]
    fn test_booking_request_validation() {
        assert_eq!(
            BookingRequest::new(None, "2025-03-05"),
            Err(ValidationError::MissingSelection)
        );
        assert_eq!(BookingRequest::new(Some(1), " "), Err(ValidationError::MissingSelection));
        assert!(matches!(
            BookingRequest::new(Some(1), "05/03/2025"),
            Err(ValidationError::InvalidDate(_))
        ));

        let request = BookingRequest::new(Some(1), "2025-03-05")
            .unwrap()
            .with_user(Some(7))
            .with_notes("  ");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"room_id": 1, "date": "2025-03-05", "user_id": 7})
        );
    }

    #[test]
    fn test_filter_omits_absent_fields() {
        let filter = BookingFilter {
            user: Some(" ".to_string()),
            status: Some(BookingStatus::Pending),
            room_id: Some(3),
            ..BookingFilter::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("status", "pending".to_string()), ("room_id", "3".to_string())]
        );
        assert!(BookingFilter::default().is_empty());
    }

    #[test]
    fn test_availability_requires_literal_true() {
        let a: Availability = serde_json::from_str(r#"{"available":true}"#).unwrap();
        assert!(a.is_available());
        let a: Availability = serde_json::from_str(r#"{"available":"true"}"#).unwrap();
        assert!(!a.is_available());
        let a: Availability = serde_json::from_str("{}").unwrap();
        assert!(!a.is_available());
    }
}
