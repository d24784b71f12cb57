//! Outcome classifier for single-booking lookup envelopes.
//!
//! The upstream reports "no such booking" as a success status ("200")
//! carrying a human-readable description and no `BookingDetail`. That
//! rule is inferred from observed replies, so anything matching neither
//! branch is logged as malformed to surface new response shapes.

use serde_json::Value;
use tracing::warn;

use crate::alias::AliasTable;
use crate::error::json_kind;
use crate::normalize::normalize_with;
use crate::types::LookupOutcome;

const DETAIL_KEY: &str = "BookingDetail";
const STATUS_KEY: &str = "Status";
const NOT_FOUND_CODE: &str = "200";

/// Classify a lookup envelope with the built-in alias table.
pub fn classify_lookup(envelope: &Value, reference_id: &str) -> LookupOutcome {
    classify_lookup_with(envelope, reference_id, AliasTable::builtin())
}

/// Classify a lookup envelope.
///
/// 1. `BookingDetail` is an object → `Found`
/// 2. `Status.Code == "200"` with a non-empty `Status.Description` → `NotFound`
/// 3. anything else → `Malformed`
pub fn classify_lookup_with(
    envelope: &Value,
    reference_id: &str,
    table: &AliasTable,
) -> LookupOutcome {
    if let Some(detail @ Value::Object(_)) = envelope.get(DETAIL_KEY) {
        if let Ok(booking) = normalize_with(detail, table) {
            return LookupOutcome::Found(Box::new(booking));
        }
    }

    if is_not_found_signal(envelope) {
        return LookupOutcome::NotFound {
            reference_id: reference_id.to_string(),
        };
    }

    warn!(
        reference_id,
        envelope_kind = json_kind(envelope),
        detail_kind = ?envelope.get(DETAIL_KEY).map(json_kind),
        "lookup_malformed"
    );
    LookupOutcome::Malformed(envelope.clone())
}

fn is_not_found_signal(envelope: &Value) -> bool {
    let Some(status) = envelope.get(STATUS_KEY) else {
        return false;
    };
    let code = status.get("Code").and_then(Value::as_str);
    let description = status.get("Description").and_then(Value::as_str);
    code == Some(NOT_FOUND_CODE) && description.is_some_and(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookingStatus;
    use serde_json::json;

    #[test]
    fn test_found() {
        let envelope = json!({
            "Status": {"Code": "200", "Description": "Successful"},
            "BookingDetail": {
                "BookingStatus": "Confirmed",
                "ConfirmationNumber": "CNF-1",
                "Rooms": {"Currency": "USD", "TotalFare": 99}
            }
        });
        match classify_lookup(&envelope, "REF-1") {
            LookupOutcome::Found(booking) => {
                assert_eq!(booking.booking_status, Some(BookingStatus::Confirmed));
                assert_eq!(booking.confirmation_number.as_deref(), Some("CNF-1"));
                assert_eq!(booking.currency_code.as_deref(), Some("USD"));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_carries_reference_id() {
        let envelope = json!({"Status": {"Code": "200", "Description": "No booking found"}});
        assert_eq!(
            classify_lookup(&envelope, "REF-404"),
            LookupOutcome::NotFound {
                reference_id: "REF-404".to_string()
            }
        );
    }

    #[test]
    fn test_detail_array_is_not_found_when_status_matches() {
        let envelope = json!({
            "Status": {"Code": "200", "Description": "No booking found"},
            "BookingDetail": []
        });
        assert!(matches!(
            classify_lookup(&envelope, "REF-2"),
            LookupOutcome::NotFound { .. }
        ));
    }

    #[test]
    fn test_bare_string_is_malformed() {
        let envelope = json!("Service unavailable");
        assert_eq!(
            classify_lookup(&envelope, "REF-3"),
            LookupOutcome::Malformed(json!("Service unavailable"))
        );
    }

    #[test]
    fn test_status_edge_cases_are_malformed() {
        let empty_description = json!({"Status": {"Code": "200", "Description": ""}});
        assert!(classify_lookup(&empty_description, "R").is_malformed());

        let numeric_code = json!({"Status": {"Code": 200, "Description": "No booking found"}});
        assert!(classify_lookup(&numeric_code, "R").is_malformed());

        let error_code = json!({"Status": {"Code": "500", "Description": "Internal error"}});
        assert!(classify_lookup(&error_code, "R").is_malformed());

        let null_detail = json!({"BookingDetail": null});
        assert!(classify_lookup(&null_detail, "R").is_malformed());
    }

    #[test]
    fn test_found_wins_over_status() {
        let envelope = json!({
            "Status": {"Code": "200", "Description": "No booking found"},
            "BookingDetail": {"BookingId": 7}
        });
        let outcome = classify_lookup(&envelope, "R");
        assert_eq!(
            outcome.booking().and_then(|b| b.booking_id.as_deref()),
            Some("7")
        );
    }
}
