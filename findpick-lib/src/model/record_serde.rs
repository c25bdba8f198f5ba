//! Custom serialization for Record and JSON record lists.
//!
//! ## Write Format (Serialization)
//!
//! A record serializes as a flat JSON object with its keys sorted, so a
//! picked record prints the same way every time. Null fields are kept.
//!
//! ## Read Format (Deserialization)
//!
//! - Integers that fit in 32 bits become `Int`, larger ones `Long`
//! - Other numbers become `Float`
//! - Strings stay strings; date columns parse them on display
//! - Arrays and nested objects are kept as `Json`

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;
use crate::error::FindError;
use crate::error::FindResult;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sorted: BTreeMap<&String, &Value> = self.fields.iter().collect();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (key, value) in sorted {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.fields.insert(key, json_value_to_value(value));
        }
        Ok(record)
    }
}

/// Converts a serde_json::Value to our Value enum.
fn json_value_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => Value::Int(small),
                    Err(_) => Value::Long(i),
                }
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Json(serde_json::Value::Number(n))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        other => Value::Json(other),
    }
}

/// Parses a JSON array of objects into records.
///
/// # Example
///
/// ```
/// use findpick_lib::model::records_from_json;
///
/// let records = records_from_json(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
pub fn records_from_json(json: &str) -> FindResult<Vec<Record>> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let items = match parsed {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(FindError::NotAList {
                found: json_kind(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(obj) => Ok(obj
                .into_iter()
                .map(|(k, v)| (k, json_value_to_value(v)))
                .collect()),
            other => Err(FindError::NotAnObject {
                index,
                found: json_kind(&other),
            }),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Money;
    use rust_decimal::Decimal;

    #[test]
    fn test_serialize_sorted_keys() {
        let record = Record::new()
            .set("name", "Contoso")
            .set("balance", Money::new(Decimal::new(1050, 2)))
            .set("id", 7);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"balance":"10.50","id":7,"name":"Contoso"}"#);
    }

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"name": "Contoso", "revenue": 10000000000, "ratio": 0.5}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get("name"), Some(&Value::from("Contoso")));
        assert_eq!(record.get("revenue"), Some(&Value::Long(10_000_000_000)));
        assert_eq!(record.get("ratio"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn test_date_strings_stay_strings() {
        let record: Record = serde_json::from_str(r#"{"created": "2024-01-15"}"#).unwrap();
        assert_eq!(record.get("created"), Some(&Value::from("2024-01-15")));
    }

    #[test]
    fn test_records_from_json_rejects_non_objects() {
        let err = records_from_json(r#"[{"id": 1}, 2]"#).unwrap_err();
        assert!(matches!(err, FindError::NotAnObject { index: 1, found: "number" }));

        let err = records_from_json(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, FindError::NotAList { found: "object" }));
    }
}
