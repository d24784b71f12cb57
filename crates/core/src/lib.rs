//! staybook-core: booking normalization engine.
//!
//! Converts the loosely-typed payloads returned by an upstream
//! hotel-reservation API into one fixed-shape [`CanonicalBooking`].
//! The upstream is schema-unstable: the same value is spelled
//! differently across endpoints, `Rooms` arrives either as an object or
//! as a list, and most fields come and go with the booking lifecycle.
//!
//! # Pipeline
//!
//! ```text
//! envelope → classify_lookup ──► Found / NotFound / Malformed
//!                 │
//!                 ▼
//!          normalize_detail ── Shape Guard (Rooms)
//!                 │         ── Alias table (per-field candidates)
//!                 │         ── Derived fields (guests, policies, conditions)
//!                 ▼
//!          CanonicalBooking
//! ```
//!
//! Every entry point is a pure function of its input: no I/O, no shared
//! mutable state. The transport side is described by the
//! [`BookingSource`] trait and lives outside this crate.

pub mod alias;
pub mod derive;
pub mod error;
pub mod normalize;
pub mod outcome;
pub mod shape;
pub mod source;
pub mod types;

// ── Convenience re-exports: key types ────────────────────────────────

pub use alias::{AliasTable, CanonicalField, FieldSource};
pub use error::{AliasError, DateRangeError, NormalizeError};
pub use shape::Shape;
pub use source::{BookingSource, DateRange, SourceError};
pub use types::{BookingStatus, CanonicalBooking, ListNormalization, LookupOutcome, SkippedEntry};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use normalize::{
    extract_bookings, extract_bookings_with, normalize_detail, normalize_list,
    normalize_list_with, normalize_with,
};
pub use outcome::{classify_lookup, classify_lookup_with};
pub use shape::{classify_rooms_shape, classify_shape};
pub use source::{list_bookings, lookup_booking};
