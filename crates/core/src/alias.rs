//! Alias Resolver: look a canonical field up across its raw spellings.
//!
//! The mapping from canonical fields to raw candidate paths is data
//! ([`AliasTable`]), so a newly observed spelling is one table entry and
//! no call site changes. A candidate resolves either against the booking
//! root or against the flat room record chosen by the Shape Guard.

pub mod scalar;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::AliasError;

/// Prefix marking a room-scoped candidate in the text form of a path.
pub const ROOM_PREFIX: &str = "room:";

// ── Canonical fields ────────────────────────────────────────────────

/// Every canonical field the table can resolve, including the raw inputs
/// of the derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    BookingId,
    ConfirmationNumber,
    InvoiceNumber,
    ClientReferenceNumber,
    BookingStatus,
    VoucherIssued,
    CheckInDate,
    CheckOutDate,
    BookingDate,
    TripOrHotelName,
    HotelCity,
    HotelRating,
    HotelCode,
    AgencyName,
    TotalPrice,
    CurrencyCode,
    TotalTax,
    RoomCount,
    RoomTypeName,
    Inclusion,
    MealType,
    IsRefundable,
    RoomPromotionText,
    /// The `Rooms` fragment handed to the Shape Guard.
    Rooms,
    /// Customer name entries feeding `guestNamesJoined`.
    GuestNames,
    /// Policy entries feeding `cancellationPolicySummary`.
    CancelPolicies,
    /// Raw conditions feeding `rateConditionsText`.
    RateConditions,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 27] = [
        CanonicalField::BookingId,
        CanonicalField::ConfirmationNumber,
        CanonicalField::InvoiceNumber,
        CanonicalField::ClientReferenceNumber,
        CanonicalField::BookingStatus,
        CanonicalField::VoucherIssued,
        CanonicalField::CheckInDate,
        CanonicalField::CheckOutDate,
        CanonicalField::BookingDate,
        CanonicalField::TripOrHotelName,
        CanonicalField::HotelCity,
        CanonicalField::HotelRating,
        CanonicalField::HotelCode,
        CanonicalField::AgencyName,
        CanonicalField::TotalPrice,
        CanonicalField::CurrencyCode,
        CanonicalField::TotalTax,
        CanonicalField::RoomCount,
        CanonicalField::RoomTypeName,
        CanonicalField::Inclusion,
        CanonicalField::MealType,
        CanonicalField::IsRefundable,
        CanonicalField::RoomPromotionText,
        CanonicalField::Rooms,
        CanonicalField::GuestNames,
        CanonicalField::CancelPolicies,
        CanonicalField::RateConditions,
    ];

    /// The camelCase name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::BookingId => "bookingId",
            CanonicalField::ConfirmationNumber => "confirmationNumber",
            CanonicalField::InvoiceNumber => "invoiceNumber",
            CanonicalField::ClientReferenceNumber => "clientReferenceNumber",
            CanonicalField::BookingStatus => "bookingStatus",
            CanonicalField::VoucherIssued => "voucherIssued",
            CanonicalField::CheckInDate => "checkInDate",
            CanonicalField::CheckOutDate => "checkOutDate",
            CanonicalField::BookingDate => "bookingDate",
            CanonicalField::TripOrHotelName => "tripOrHotelName",
            CanonicalField::HotelCity => "hotelCity",
            CanonicalField::HotelRating => "hotelRating",
            CanonicalField::HotelCode => "hotelCode",
            CanonicalField::AgencyName => "agencyName",
            CanonicalField::TotalPrice => "totalPrice",
            CanonicalField::CurrencyCode => "currencyCode",
            CanonicalField::TotalTax => "totalTax",
            CanonicalField::RoomCount => "roomCount",
            CanonicalField::RoomTypeName => "roomTypeName",
            CanonicalField::Inclusion => "inclusion",
            CanonicalField::MealType => "mealType",
            CanonicalField::IsRefundable => "isRefundable",
            CanonicalField::RoomPromotionText => "roomPromotionText",
            CanonicalField::Rooms => "rooms",
            CanonicalField::GuestNames => "guestNames",
            CanonicalField::CancelPolicies => "cancelPolicies",
            CanonicalField::RateConditions => "rateConditions",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalField {
    type Err = AliasError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        CanonicalField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| AliasError::UnknownField(name.to_string()))
    }
}

// ── Candidate sources ───────────────────────────────────────────────

/// One candidate location for a canonical field's raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Dotted path from the booking root, e.g. `HotelDetails.Map`.
    Booking(String),
    /// Dotted path inside the flat room record.
    Room(String),
}

impl FieldSource {
    pub fn booking(path: &str) -> Self {
        FieldSource::Booking(path.to_string())
    }

    pub fn room(path: &str) -> Self {
        FieldSource::Room(path.to_string())
    }

    /// Parse the text form: `Path.To.Key` or `room:Path.To.Key`.
    /// Returns `None` for an empty path or an empty segment.
    pub fn parse(text: &str) -> Option<Self> {
        let (path, room) = match text.strip_prefix(ROOM_PREFIX) {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return None;
        }
        Some(if room {
            FieldSource::room(path)
        } else {
            FieldSource::booking(path)
        })
    }

    pub fn path(&self) -> &str {
        match self {
            FieldSource::Booking(path) | FieldSource::Room(path) => path,
        }
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSource::Booking(path) => f.write_str(path),
            FieldSource::Room(path) => write!(f, "{}{}", ROOM_PREFIX, path),
        }
    }
}

// ── Path resolution ─────────────────────────────────────────────────

/// Follow a dotted path through nested objects. Traversal through a
/// non-object ends the lookup.
pub fn lookup_in<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Try each candidate path in order and return the first present,
/// non-null value.
pub fn resolve<'a>(fragment: &'a Value, candidate_paths: &[&str]) -> Option<&'a Value> {
    let map = fragment.as_object()?;
    candidate_paths
        .iter()
        .filter_map(|path| lookup_in(map, path))
        .find(|value| !value.is_null())
}

// ── Alias table ─────────────────────────────────────────────────────

/// Ordered candidate sources for every canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<CanonicalField, Vec<FieldSource>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        use CanonicalField as F;
        use FieldSource as S;

        let entries = [
            (F::BookingId, vec![S::booking("BookingId")]),
            (
                F::ConfirmationNumber,
                vec![S::booking("ConfirmationNumber"), S::booking("ConfirmationNo")],
            ),
            (F::InvoiceNumber, vec![S::booking("InvoiceNumber")]),
            (F::ClientReferenceNumber, vec![S::booking("ClientReferenceNumber")]),
            (F::BookingStatus, vec![S::booking("BookingStatus")]),
            (F::VoucherIssued, vec![S::booking("VoucherStatus")]),
            // The detail endpoint spells it "Checkin"; listings use "CheckInDate".
            (
                F::CheckInDate,
                vec![
                    S::booking("Checkin"),
                    S::booking("CheckIn"),
                    S::booking("CheckInDate"),
                ],
            ),
            (
                F::CheckOutDate,
                vec![S::booking("CheckOut"), S::booking("CheckOutDate")],
            ),
            (F::BookingDate, vec![S::booking("BookingDate")]),
            (
                F::TripOrHotelName,
                vec![
                    S::booking("TripName"),
                    S::booking("HotelDetails.HotelName"),
                    S::booking("HotelName"),
                ],
            ),
            (F::HotelCity, vec![S::booking("HotelDetails.City")]),
            (F::HotelRating, vec![S::booking("HotelDetails.Rating")]),
            (
                F::HotelCode,
                vec![S::booking("HotelDetails.Map"), S::booking("TBOHotelCode")],
            ),
            (F::AgencyName, vec![S::booking("AgencyName")]),
            (
                F::TotalPrice,
                vec![S::room("TotalFare"), S::booking("BookingPrice")],
            ),
            (
                F::CurrencyCode,
                vec![S::room("Currency"), S::booking("Currency")],
            ),
            (F::TotalTax, vec![S::room("TotalTax")]),
            (F::RoomCount, vec![S::booking("NoOfRooms")]),
            (
                F::RoomTypeName,
                vec![S::room("Name"), S::booking("RoomType")],
            ),
            (
                F::Inclusion,
                vec![S::room("Inclusion"), S::booking("Inclusion")],
            ),
            (F::MealType, vec![S::room("MealType")]),
            (F::IsRefundable, vec![S::room("IsRefundable")]),
            (F::RoomPromotionText, vec![S::room("RoomPromotion")]),
            (F::Rooms, vec![S::booking("Rooms")]),
            (F::GuestNames, vec![S::booking("CustomerDetails.CustomerNames")]),
            (F::CancelPolicies, vec![S::room("CancelPolicies")]),
            (F::RateConditions, vec![S::room("RateConditions")]),
        ];

        AliasTable {
            entries: entries.into_iter().collect(),
        }
    }
}

impl AliasTable {
    /// The built-in table, constructed once per process.
    pub fn builtin() -> &'static AliasTable {
        static BUILTIN: OnceLock<AliasTable> = OnceLock::new();
        BUILTIN.get_or_init(AliasTable::default)
    }

    pub fn candidates(&self, field: CanonicalField) -> &[FieldSource] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the candidates of one field.
    pub fn set(
        &mut self,
        field: CanonicalField,
        candidates: Vec<FieldSource>,
    ) -> Result<(), AliasError> {
        if candidates.is_empty() {
            return Err(AliasError::EmptyCandidates {
                field: field.name().to_string(),
            });
        }
        self.entries.insert(field, candidates);
        Ok(())
    }

    /// The built-in table with the named fields' candidates replaced.
    ///
    /// Keys are canonical field names (`checkInDate`), values are
    /// candidate paths in text form (`Checkin`, `room:TotalFare`).
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, AliasError> {
        let mut table = AliasTable::default();
        for (name, paths) in overrides {
            let field: CanonicalField = name.parse()?;
            let candidates = paths
                .iter()
                .map(|path| {
                    FieldSource::parse(path).ok_or_else(|| AliasError::InvalidPath {
                        field: name.clone(),
                        path: path.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.set(field, candidates)?;
        }
        Ok(table)
    }
}

// ── Per-record lookup ───────────────────────────────────────────────

/// Resolves canonical fields for one booking against an alias table.
#[derive(Debug, Clone, Copy)]
pub struct FieldLookup<'a> {
    table: &'a AliasTable,
    booking: &'a Map<String, Value>,
    room: Option<&'a Map<String, Value>>,
}

impl<'a> FieldLookup<'a> {
    pub fn new(table: &'a AliasTable, booking: &'a Map<String, Value>) -> Self {
        FieldLookup {
            table,
            booking,
            room: None,
        }
    }

    pub fn with_room(self, room: Option<&'a Map<String, Value>>) -> Self {
        FieldLookup { room, ..self }
    }

    /// First present, non-null raw value among the field's candidates.
    pub fn raw(&self, field: CanonicalField) -> Option<&'a Value> {
        self.table
            .candidates(field)
            .iter()
            .filter_map(|source| match source {
                FieldSource::Booking(path) => lookup_in(self.booking, path),
                FieldSource::Room(path) => lookup_in(self.room?, path),
            })
            .find(|value| !value.is_null())
    }

    pub fn text(&self, field: CanonicalField) -> Option<String> {
        self.raw(field).and_then(scalar::text)
    }

    pub fn decimal(&self, field: CanonicalField) -> Option<Decimal> {
        self.raw(field).and_then(scalar::decimal)
    }

    pub fn count(&self, field: CanonicalField) -> Option<u32> {
        self.raw(field).and_then(scalar::count)
    }

    pub fn flag(&self, field: CanonicalField) -> Option<bool> {
        self.raw(field).and_then(scalar::flag)
    }
}
