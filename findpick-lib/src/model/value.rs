//! Value enum for dynamic field values

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::types::Money;

/// A dynamic value read from one field of a raw record.
///
/// Records handed to a find dialog are arbitrary keyed objects, so every field
/// is held as a `Value`. A key that is missing from a record reads as
/// [`Value::Null`].
///
/// # Type Mapping
///
/// | Source value | Rust Variant |
/// |--------------|--------------|
/// | null / missing | `Null` |
/// | boolean | `Bool` |
/// | 32-bit integer | `Int` |
/// | 64-bit integer | `Long` |
/// | double | `Float` |
/// | decimal | `Decimal` |
/// | string | `String` |
/// | calendar date | `Date` |
/// | timestamp | `DateTime` |
/// | monetary amount | `Money` |
/// | anything else | `Json` |
///
/// # Example
///
/// ```
/// use findpick_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let balance = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// Calendar date without a time of day.
    Date(NaiveDate),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Monetary value.
    Money(Money),
    /// Fallback for arrays, objects and other unrecognized values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Money(_) => "money",
            Value::Json(_) => "json",
        }
    }

    /// Returns `true` for numeric variants (including money).
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) | Value::Money(_)
        )
    }

    /// Returns `true` if the value counts as present.
    ///
    /// Null, `false`, numeric zero, NaN and the empty string are absent.
    /// Every date, timestamp and structured JSON value is present.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Long(n) => *n != 0,
            Value::Float(n) => *n != 0.0 && !n.is_nan(),
            Value::Decimal(d) => !d.is_zero(),
            Value::Money(m) => !m.value().is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Date(_) | Value::DateTime(_) => true,
            Value::Json(json) => match json {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
            },
        }
    }

    /// Coerces the value to a boolean, accepting the usual spellings.
    ///
    /// Strings `true`, `t`, `yes`, `y`, `on` and `1` (any case, surrounding
    /// whitespace ignored) are `true`; numbers are `true` when non-zero.
    /// Everything else, including `"false"`, `"no"` and `"0"`, is `false`.
    pub fn boolify(&self) -> bool {
        match self {
            Value::String(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "t" | "yes" | "y" | "on" | "1"
            ),
            Value::Json(serde_json::Value::String(s)) => Value::String(s.clone()).boolify(),
            other => other.is_truthy(),
        }
    }

    /// Returns the numeric value as `f64`, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            Value::Money(m) => m.value().to_f64(),
            Value::Json(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the numeric value as an exact decimal, if this is a number.
    ///
    /// Numeric strings are parsed as well, so `"12.5"` yields `12.5`.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Long(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::try_from(*n).ok(),
            Value::Decimal(d) => Some(*d),
            Value::Money(m) => Some(m.value()),
            Value::String(s) => s.trim().parse().ok(),
            Value::Json(serde_json::Value::Number(n)) => {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
            _ => None,
        }
    }

    /// Default string conversion of the value.
    ///
    /// Whole floats print without a fraction (`3.0` → `"3"`), null prints as
    /// the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::String(s) => s.clone(),
            Value::Date(d) => d.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Money(m) => m.value().normalize().to_string(),
            Value::Json(serde_json::Value::String(s)) => s.clone(),
            Value::Json(json) => json.to_string(),
        }
    }

    /// Total ordering used when rows are ordered by their sort value.
    ///
    /// Nulls sort first. Numbers compare by magnitude across every numeric
    /// variant, dates and timestamps compare chronologically, strings compare
    /// case-insensitively. Values of unrelated types order by type rank.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        if self.is_number() && other.is_number() {
            return match (self.as_decimal(), other.as_decimal()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => {
                    let a = self.as_f64().unwrap_or(f64::NAN);
                    let b = other.as_f64().unwrap_or(f64::NAN);
                    a.total_cmp(&b)
                }
            };
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Date(a), Value::DateTime(b)) => a.cmp(&b.date_naive()).then(Ordering::Less),
            (Value::DateTime(a), Value::Date(b)) => a.date_naive().cmp(b).then(Ordering::Greater),
            (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) | Value::Money(_) => 2,
            Value::Date(_) | Value::DateTime(_) => 3,
            Value::String(_) => 4,
            Value::Json(_) => 5,
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Long(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Money> for Value {
    fn from(v: Money) -> Self {
        Value::Money(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
