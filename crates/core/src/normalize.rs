//! Normalizer: assemble [`CanonicalBooking`] records from raw payloads.
//!
//! The detail and list entry points share one per-record path, so both
//! pick up any alias added to the table. Missing data never fails a
//! record; only a root of the wrong JSON kind does.

use serde_json::Value;
use tracing::{debug, warn};

use crate::alias::{lookup_in, AliasTable, CanonicalField as F, FieldLookup};
use crate::derive;
use crate::error::{json_kind, NormalizeError};
use crate::shape::classify_rooms_shape;
use crate::types::{BookingStatus, CanonicalBooking, ListNormalization, SkippedEntry};

/// Envelope keys that may hold the booking list, in priority order.
const LIST_KEYS: &[&str] = &["BookingDetail", "Bookings"];

/// Normalize one booking-detail payload with the built-in alias table.
pub fn normalize_detail(raw: &Value) -> Result<CanonicalBooking, NormalizeError> {
    normalize_with(raw, AliasTable::builtin())
}

/// Normalize one booking payload with a caller-supplied alias table.
pub fn normalize_with(raw: &Value, table: &AliasTable) -> Result<CanonicalBooking, NormalizeError> {
    let booking = raw
        .as_object()
        .ok_or_else(|| NormalizeError::malformed("object", raw))?;

    let rooms = classify_rooms_shape(FieldLookup::new(table, booking).raw(F::Rooms));
    let fields = FieldLookup::new(table, booking).with_room(rooms.fields());

    let record = CanonicalBooking {
        booking_id: fields.text(F::BookingId),
        confirmation_number: fields.text(F::ConfirmationNumber),
        invoice_number: fields.text(F::InvoiceNumber),
        client_reference_number: fields.text(F::ClientReferenceNumber),
        booking_status: fields
            .text(F::BookingStatus)
            .map(|status| BookingStatus::from_text(&status)),
        voucher_issued: fields.flag(F::VoucherIssued),
        check_in_date: fields.text(F::CheckInDate),
        check_out_date: fields.text(F::CheckOutDate),
        booking_date: fields.text(F::BookingDate),
        trip_or_hotel_name: fields.text(F::TripOrHotelName),
        hotel_city: fields.text(F::HotelCity),
        hotel_rating: fields.text(F::HotelRating),
        hotel_code: fields.text(F::HotelCode),
        agency_name: fields.text(F::AgencyName),
        total_price: fields.decimal(F::TotalPrice),
        currency_code: fields.text(F::CurrencyCode),
        total_tax: fields.decimal(F::TotalTax),
        room_count: fields.count(F::RoomCount),
        room_type_name: fields.text(F::RoomTypeName),
        inclusion: fields.text(F::Inclusion),
        meal_type: fields.text(F::MealType),
        is_refundable: fields.flag(F::IsRefundable),
        room_promotion_text: fields.text(F::RoomPromotionText),
        guest_names_joined: derive::guest_names_joined(fields.raw(F::GuestNames)),
        cancellation_policy_summary: derive::cancellation_policy_summary(
            fields.raw(F::CancelPolicies),
        ),
        rate_conditions_text: derive::rate_conditions_text(fields.raw(F::RateConditions)),
    };

    debug!(
        booking_id = ?record.booking_id,
        rooms_shape = rooms.name(),
        "booking_normalized"
    );
    Ok(record)
}

/// Normalize every element of a raw booking list with the built-in table.
pub fn normalize_list(raw: &Value) -> Result<ListNormalization, NormalizeError> {
    normalize_list_with(raw, AliasTable::builtin())
}

/// Normalize every element of a raw booking list.
///
/// Elements that cannot be normalized are skipped and recorded; the rest
/// are kept in their original order.
pub fn normalize_list_with(
    raw: &Value,
    table: &AliasTable,
) -> Result<ListNormalization, NormalizeError> {
    let items = raw
        .as_array()
        .ok_or_else(|| NormalizeError::malformed("array", raw))?;

    let mut result = ListNormalization {
        bookings: Vec::with_capacity(items.len()),
        skipped: Vec::new(),
    };
    for (index, item) in items.iter().enumerate() {
        match normalize_with(item, table) {
            Ok(booking) => result.bookings.push(booking),
            Err(reason) => {
                warn!(index, error = %reason, "list_entry_skipped");
                result.skipped.push(SkippedEntry { index, reason });
            }
        }
    }
    Ok(result)
}

/// Pull the booking list out of a list-endpoint envelope and normalize it.
pub fn extract_bookings(envelope: &Value) -> Result<ListNormalization, NormalizeError> {
    extract_bookings_with(envelope, AliasTable::builtin())
}

/// Envelope forms:
/// - a bare array is the list itself
/// - an object holds the list under one of its list keys
/// - an object without a list (a status-only reply) holds no bookings
pub fn extract_bookings_with(
    envelope: &Value,
    table: &AliasTable,
) -> Result<ListNormalization, NormalizeError> {
    match envelope {
        Value::Array(_) => normalize_list_with(envelope, table),
        Value::Object(map) => {
            let list = LIST_KEYS
                .iter()
                .filter_map(|key| lookup_in(map, key))
                .find(|value| !value.is_null());
            match list {
                Some(list @ Value::Array(_)) => normalize_list_with(list, table),
                Some(other) => {
                    warn!(found = json_kind(other), "booking_list_not_an_array");
                    Err(NormalizeError::malformed("array", other))
                }
                None => Ok(ListNormalization::default()),
            }
        }
        other => Err(NormalizeError::malformed("array or object", other)),
    }
}
