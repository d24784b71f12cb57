//! The transport boundary and the pipelines that feed the engine from it.
//!
//! [`BookingSource`] describes the upstream collaborator. Implementations
//! perform I/O; the engine only consumes the raw payloads they return.

use serde_json::Value;
use time::macros::format_description;
use time::Date;
use tracing::debug;

use crate::alias::AliasTable;
use crate::error::{DateRangeError, NormalizeError};
use crate::normalize::extract_bookings_with;
use crate::outcome::classify_lookup_with;
use crate::types::{ListNormalization, LookupOutcome};

/// An upstream that returns raw booking payloads.
pub trait BookingSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw list-endpoint envelope for bookings made within `range`.
    fn fetch_bookings_by_date_range(&self, range: &DateRange) -> Result<Value, Self::Error>;

    /// Raw detail-endpoint envelope for one booking reference.
    fn fetch_booking_by_reference_id(&self, reference_id: &str) -> Result<Value, Self::Error>;
}

/// Inclusive range in the textual timestamp form the upstream expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        DateRange {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Build a range from two `YYYY-MM-DD` days, covering the whole of
    /// both: `{from}T00:00:00` to `{to}T23:59:59`.
    pub fn from_days(from: &str, to: &str) -> Result<Self, DateRangeError> {
        let format = format_description!("[year]-[month]-[day]");
        let parse = |text: &str| {
            Date::parse(text.trim(), format).map_err(|_| DateRangeError::InvalidDate {
                value: text.to_string(),
            })
        };
        let first = parse(from)?;
        let last = parse(to)?;
        if first > last {
            return Err(DateRangeError::Inverted {
                from: first.to_string(),
                to: last.to_string(),
            });
        }
        Ok(DateRange::new(
            format!("{}T00:00:00", first),
            format!("{}T23:59:59", last),
        ))
    }
}

/// Either side of a pipeline can fail: the transport, or the envelope.
#[derive(Debug, thiserror::Error)]
pub enum SourceError<E>
where
    E: std::error::Error + 'static,
{
    #[error("upstream request failed: {0}")]
    Transport(#[source] E),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fetch the bookings in `range` and normalize them.
pub fn list_bookings<S: BookingSource>(
    source: &S,
    range: &DateRange,
    table: &AliasTable,
) -> Result<ListNormalization, SourceError<S::Error>> {
    let envelope = source
        .fetch_bookings_by_date_range(range)
        .map_err(SourceError::Transport)?;
    let result = extract_bookings_with(&envelope, table)?;
    debug!(
        from = %range.from,
        to = %range.to,
        bookings = result.bookings.len(),
        skipped = result.skipped.len(),
        "bookings_listed"
    );
    Ok(result)
}

/// Fetch one booking by reference and classify the reply.
pub fn lookup_booking<S: BookingSource>(
    source: &S,
    reference_id: &str,
    table: &AliasTable,
) -> Result<LookupOutcome, S::Error> {
    let envelope = source.fetch_booking_by_reference_id(reference_id)?;
    Ok(classify_lookup_with(&envelope, reference_id, table))
}
