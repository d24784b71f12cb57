//! Text rendering of canonical bookings for the terminal.
//!
//! Absent fields are left out. Presentation defaults (the "USD"
//! currency, the "Hotel Booking" title, "Pending" for a listing with no
//! status) live here, never in the engine.

use std::fmt::Write as _;

use staybook_core::{BookingStatus, CanonicalBooking, LookupOutcome};

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_TITLE: &str = "Hotel Booking";
const DEFAULT_LISTING_STATUS: &str = "Pending";

/// How a status should read at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusTone {
    Positive,
    Negative,
    Neutral,
}

impl StatusTone {
    pub(crate) fn of(status: Option<&BookingStatus>) -> Self {
        match status {
            Some(BookingStatus::Vouchered | BookingStatus::Confirmed | BookingStatus::Completed) => {
                StatusTone::Positive
            }
            Some(BookingStatus::Cancelled) => StatusTone::Negative,
            _ => StatusTone::Neutral,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            StatusTone::Positive => "[+]",
            StatusTone::Negative => "[x]",
            StatusTone::Neutral => "[ ]",
        }
    }
}

fn title(booking: &CanonicalBooking) -> &str {
    booking
        .trip_or_hotel_name
        .as_deref()
        .unwrap_or(DEFAULT_TITLE)
}

fn status_line(booking: &CanonicalBooking, fallback: Option<&str>) -> Option<String> {
    let tone = StatusTone::of(booking.booking_status.as_ref());
    let text = booking
        .booking_status
        .as_ref()
        .map(BookingStatus::as_str)
        .or(fallback)?;
    Some(format!("{} {}", tone.marker(), text))
}

fn money(booking: &CanonicalBooking, amount: &impl std::fmt::Display) -> String {
    format!(
        "{} {}",
        booking.currency_code.as_deref().unwrap_or(DEFAULT_CURRENCY),
        amount
    )
}

fn field(out: &mut String, label: &str, value: Option<impl std::fmt::Display>) {
    if let Some(value) = value {
        let _ = writeln!(out, "  {:<14} {}", format!("{}:", label), value);
    }
}

fn yes_no(value: bool, yes: &'static str, no: &'static str) -> &'static str {
    if value {
        yes
    } else {
        no
    }
}

/// Full detail view of one booking.
pub(crate) fn render_booking(booking: &CanonicalBooking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title(booking));
    if let Some(status) = status_line(booking, None) {
        let _ = writeln!(out, "  {}", status);
    }
    field(&mut out, "Booking ID", booking.booking_id.as_deref());
    field(&mut out, "Invoice", booking.invoice_number.as_deref());
    field(&mut out, "Confirmation", booking.confirmation_number.as_deref());
    field(&mut out, "Reference", booking.client_reference_number.as_deref());
    field(&mut out, "Check-in", booking.check_in_date.as_deref());
    field(&mut out, "Check-out", booking.check_out_date.as_deref());
    field(&mut out, "Booked on", booking.booking_date.as_deref());
    field(&mut out, "Price", booking.total_price.as_ref().map(|p| money(booking, p)));
    field(&mut out, "Tax", booking.total_tax.as_ref().map(|t| money(booking, t)));
    field(&mut out, "Rooms", booking.room_count);
    field(&mut out, "Room type", booking.room_type_name.as_deref());
    field(&mut out, "Inclusion", booking.inclusion.as_deref());
    field(&mut out, "Meal", booking.meal_type.as_deref());
    field(
        &mut out,
        "Voucher",
        booking
            .voucher_issued
            .map(|v| yes_no(v, "Issued", "Not issued")),
    );
    field(
        &mut out,
        "Refundable",
        booking.is_refundable.map(|v| yes_no(v, "Yes", "No")),
    );
    field(&mut out, "Hotel code", booking.hotel_code.as_deref());
    field(&mut out, "City", booking.hotel_city.as_deref());
    field(&mut out, "Rating", booking.hotel_rating.as_deref());
    field(&mut out, "Agency", booking.agency_name.as_deref());
    field(&mut out, "Guests", booking.guest_names_joined.as_deref());
    field(&mut out, "Promotion", booking.room_promotion_text.as_deref());
    field(
        &mut out,
        "Cancellation",
        booking.cancellation_policy_summary.as_deref(),
    );
    if let Some(conditions) = &booking.rate_conditions_text {
        let _ = writeln!(out, "  Rate conditions:");
        for line in conditions.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    out
}

/// Compact listing, one block per booking.
pub(crate) fn render_listing(bookings: &[CanonicalBooking]) -> String {
    if bookings.is_empty() {
        return "No bookings found.\n".to_string();
    }
    let mut out = String::new();
    for booking in bookings {
        let _ = write!(out, "{}", title(booking));
        if let Some(status) = status_line(booking, Some(DEFAULT_LISTING_STATUS)) {
            let _ = write!(out, "  {}", status);
        }
        let _ = writeln!(out);
        field(&mut out, "Booking ID", booking.booking_id.as_deref());
        field(&mut out, "Hotel code", booking.hotel_code.as_deref());
        field(&mut out, "Booked on", booking.booking_date.as_deref());
        field(&mut out, "Check-in", booking.check_in_date.as_deref());
        field(&mut out, "Check-out", booking.check_out_date.as_deref());
        field(&mut out, "Agency", booking.agency_name.as_deref());
        field(&mut out, "Price", booking.total_price.as_ref().map(|p| money(booking, p)));
        field(&mut out, "Confirmation", booking.confirmation_number.as_deref());
        field(&mut out, "Reference", booking.client_reference_number.as_deref());
        let _ = writeln!(out);
    }
    out
}

/// Human-readable view of a lookup outcome.
pub(crate) fn render_outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(booking) => render_booking(booking),
        LookupOutcome::NotFound { reference_id } => {
            format!("No booking found with reference ID: {}\n", reference_id)
        }
        LookupOutcome::Malformed(_) => "Booking not found or invalid response\n".to_string(),
    }
}
