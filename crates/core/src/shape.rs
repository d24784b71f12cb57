//! Shape Guard: classify the physical encoding of a nested record.
//!
//! The upstream documents `Rooms` as a list of room records, but the
//! detail endpoint has been seen returning a bare room object instead.
//! [`classify_shape`] names which encoding a fragment uses and exposes
//! the flat record to read fields from, without touching the fragment.

use serde_json::{Map, Value};

/// The encoding a nested-record fragment arrived in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// The fragment is the record itself.
    SingleObject(&'a Map<String, Value>),
    /// The fragment is a sequence of records; only the first is surfaced.
    Collection(&'a Map<String, Value>),
    /// Nothing usable: missing, null, a scalar, or an empty sequence.
    Absent,
}

impl<'a> Shape<'a> {
    /// The flat record selected by the classification.
    pub fn fields(&self) -> Option<&'a Map<String, Value>> {
        match *self {
            Shape::SingleObject(fields) | Shape::Collection(fields) => Some(fields),
            Shape::Absent => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::SingleObject(_) => "single_object",
            Shape::Collection(_) => "collection",
            Shape::Absent => "absent",
        }
    }
}

/// Classify a fragment.
///
/// - missing or `null` → `Absent`
/// - array → `Collection` over its first element, when that is an object
/// - object whose keys are all array indices (`"0"`, `"1"`, ...) →
///   `Collection` over the lowest index
/// - any other object → `SingleObject`
/// - everything else → `Absent`
pub fn classify_shape(fragment: Option<&Value>) -> Shape<'_> {
    match fragment {
        Some(Value::Array(items)) => match items.first() {
            Some(Value::Object(first)) => Shape::Collection(first),
            _ => Shape::Absent,
        },
        Some(Value::Object(map)) => match first_indexed_entry(map) {
            Some(IndexedEntry::Record(first)) => Shape::Collection(first),
            Some(IndexedEntry::NotARecord) => Shape::Absent,
            None => Shape::SingleObject(map),
        },
        _ => Shape::Absent,
    }
}

/// Classify the `Rooms` fragment of a booking detail.
pub fn classify_rooms_shape(fragment: Option<&Value>) -> Shape<'_> {
    classify_shape(fragment)
}

enum IndexedEntry<'a> {
    Record(&'a Map<String, Value>),
    NotARecord,
}

/// For an object keyed purely by array indices, the entry at the lowest
/// index. Returns `None` when the object has ordinary field names.
fn first_indexed_entry(map: &Map<String, Value>) -> Option<IndexedEntry<'_>> {
    if map.is_empty() {
        return None;
    }
    let mut lowest: Option<(u64, &Value)> = None;
    for (key, value) in map {
        if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index = key.parse::<u64>().ok()?;
        if lowest.map_or(true, |(current, _)| index < current) {
            lowest = Some((index, value));
        }
    }
    lowest.map(|(_, value)| match value {
        Value::Object(record) => IndexedEntry::Record(record),
        _ => IndexedEntry::NotARecord,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object() {
        let rooms = json!({"Currency": "EUR", "TotalFare": 120.5, "Name": "Double"});
        let shape = classify_rooms_shape(Some(&rooms));
        assert!(matches!(shape, Shape::SingleObject(_)));
        assert_eq!(shape.fields().unwrap()["Name"], json!("Double"));
        assert_eq!(shape.name(), "single_object");
    }

    #[test]
    fn test_collection_uses_first_element() {
        let rooms = json!([
            {"Name": "First"},
            {"Name": "Second"}
        ]);
        let shape = classify_rooms_shape(Some(&rooms));
        assert!(matches!(shape, Shape::Collection(_)));
        assert_eq!(shape.fields().unwrap()["Name"], json!("First"));
    }

    #[test]
    fn test_absent_variants() {
        assert_eq!(classify_shape(None), Shape::Absent);
        assert_eq!(classify_shape(Some(&json!(null))), Shape::Absent);
        assert_eq!(classify_shape(Some(&json!("Double"))), Shape::Absent);
        assert_eq!(classify_shape(Some(&json!([]))), Shape::Absent);
        assert_eq!(classify_shape(Some(&json!([7, {"Name": "x"}]))), Shape::Absent);
    }

    #[test]
    fn test_empty_object_is_single_object() {
        let rooms = json!({});
        assert!(matches!(
            classify_shape(Some(&rooms)),
            Shape::SingleObject(map) if map.is_empty()
        ));
    }

    #[test]
    fn test_index_keyed_object_is_collection() {
        let rooms = json!({
            "1": {"Name": "Second"},
            "0": {"Name": "First"}
        });
        let shape = classify_shape(Some(&rooms));
        assert!(matches!(shape, Shape::Collection(_)));
        assert_eq!(shape.fields().unwrap()["Name"], json!("First"));
    }

    #[test]
    fn test_mixed_keys_stay_single_object() {
        let rooms = json!({"0": {"Name": "x"}, "Name": "Suite"});
        let shape = classify_shape(Some(&rooms));
        assert!(matches!(shape, Shape::SingleObject(_)));
        assert_eq!(shape.fields().unwrap()["Name"], json!("Suite"));
    }

    #[test]
    fn test_fragment_is_not_mutated() {
        let rooms = json!([{"Name": "First"}, {"Name": "Second"}]);
        let before = rooms.clone();
        let _ = classify_shape(Some(&rooms));
        assert_eq!(rooms, before);
    }
}
