//! Canonical output types.
//!
//! Every field of [`CanonicalBooking`] is optional: `None` means the
//! upstream did not supply a usable value. Absent fields serialize as
//! explicit `null` so downstream code can tell "no data" apart from an
//! empty string or a zero amount.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

// ── Status ──────────────────────────────────────────────────────────

/// Booking lifecycle status as reported upstream.
///
/// The set is open: unrecognized values pass through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Vouchered,
    Confirmed,
    Completed,
    Cancelled,
    Pending,
    Other(String),
}

impl BookingStatus {
    /// Map an upstream status string. Matching is exact.
    pub fn from_text(text: &str) -> Self {
        match text {
            "Vouchered" => BookingStatus::Vouchered,
            "Confirmed" => BookingStatus::Confirmed,
            "Completed" => BookingStatus::Completed,
            "Cancelled" => BookingStatus::Cancelled,
            "Pending" => BookingStatus::Pending,
            other => BookingStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Vouchered => "Vouchered",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Pending => "Pending",
            BookingStatus::Other(text) => text,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BookingStatus {
    fn from(text: String) -> Self {
        BookingStatus::from_text(&text)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

// ── Canonical record ────────────────────────────────────────────────

/// The normalized booking record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalBooking {
    // Identity
    pub booking_id: Option<String>,
    pub confirmation_number: Option<String>,
    pub invoice_number: Option<String>,
    pub client_reference_number: Option<String>,

    // Status
    pub booking_status: Option<BookingStatus>,
    pub voucher_issued: Option<bool>,

    // Stay. Dates are kept in the upstream's textual form.
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub booking_date: Option<String>,

    // Property
    pub trip_or_hotel_name: Option<String>,
    pub hotel_city: Option<String>,
    pub hotel_rating: Option<String>,
    pub hotel_code: Option<String>,
    pub agency_name: Option<String>,

    // Commercial. No currency default is applied here.
    pub total_price: Option<Decimal>,
    pub currency_code: Option<String>,
    pub total_tax: Option<Decimal>,
    pub room_count: Option<u32>,
    pub room_type_name: Option<String>,
    pub inclusion: Option<String>,
    pub meal_type: Option<String>,
    pub is_refundable: Option<bool>,
    pub room_promotion_text: Option<String>,

    // Derived
    pub guest_names_joined: Option<String>,
    pub cancellation_policy_summary: Option<String>,
    pub rate_conditions_text: Option<String>,
}

// ── Lookup outcome ──────────────────────────────────────────────────

/// Result of classifying a single-booking lookup envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The envelope carried a booking detail object.
    Found(Box<CanonicalBooking>),
    /// The upstream's "no such booking" reply (status "200" plus a message).
    NotFound {
        #[serde(rename = "referenceId")]
        reference_id: String,
    },
    /// Neither shape matched; the raw envelope is kept for diagnosis.
    Malformed(serde_json::Value),
}

impl LookupOutcome {
    pub fn booking(&self) -> Option<&CanonicalBooking> {
        match self {
            LookupOutcome::Found(booking) => Some(booking),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, LookupOutcome::Malformed(_))
    }
}

// ── Batch result ────────────────────────────────────────────────────

/// A list element that was left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the element in the raw list.
    pub index: usize,
    pub reason: NormalizeError,
}

/// Bookings produced from a raw list, plus the elements that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNormalization {
    pub bookings: Vec<CanonicalBooking>,
    pub skipped: Vec<SkippedEntry>,
}

impl ListNormalization {
    pub fn into_bookings(self) -> Vec<CanonicalBooking> {
        self.bookings
    }
}
