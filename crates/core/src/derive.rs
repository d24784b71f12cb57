//! Derived Field Compiler: composite fields with no direct raw counterpart.
//!
//! Every function takes the raw input fragment (already located by the
//! alias table) and returns `None` when the input is absent, not of the
//! expected kind, or yields nothing to show.

use serde_json::{Map, Value};

use crate::alias::scalar;

const GUEST_SEPARATOR: &str = ", ";
const POLICY_SEPARATOR: &str = "; ";
const CONDITION_SEPARATOR: &str = "\n";

/// `"{Title} {FirstName} {LastName}"` per customer, trimmed, empties
/// dropped, joined with `", "`.
pub fn guest_names_joined(customer_names: Option<&Value>) -> Option<String> {
    let entries = customer_names?.as_array()?;
    let names: Vec<String> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            format!(
                "{} {} {}",
                part(entry, "Title"),
                part(entry, "FirstName"),
                part(entry, "LastName")
            )
            .trim()
            .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect();
    non_empty(names.join(GUEST_SEPARATOR))
}

/// `"From {FromDate}: {ChargeType} - {CancellationCharge}"` per policy,
/// joined with `"; "`, in the order delivered.
pub fn cancellation_policy_summary(policies: Option<&Value>) -> Option<String> {
    let entries = policies?.as_array()?;
    let lines: Vec<String> = entries
        .iter()
        .filter_map(Value::as_object)
        .map(|policy| {
            format!(
                "From {}: {} - {}",
                part(policy, "FromDate"),
                part(policy, "ChargeType"),
                part(policy, "CancellationCharge")
            )
        })
        .collect();
    non_empty(lines.join(POLICY_SEPARATOR))
}

/// A single conditions string verbatim, or a list of condition strings
/// one per line.
pub fn rate_conditions_text(conditions: Option<&Value>) -> Option<String> {
    match conditions? {
        Value::String(text) => non_empty(text.clone()),
        Value::Array(items) => {
            let lines: Vec<String> = items.iter().filter_map(scalar::text).collect();
            non_empty(lines.join(CONDITION_SEPARATOR))
        }
        _ => None,
    }
}

fn part(entry: &Map<String, Value>, key: &str) -> String {
    entry.get(key).and_then(scalar::text).unwrap_or_default()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
