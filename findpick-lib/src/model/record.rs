//! Dynamic raw record

use std::collections::HashMap;

use super::Value;

/// One raw record from the list a find dialog is shown over.
///
/// Records hold field values as a `HashMap<String, Value>`, so any keyed
/// object can be displayed. Columns read their value with [`Record::value`],
/// which treats a missing key as [`Value::Null`].
///
/// # Example
///
/// ```
/// use findpick_lib::model::Record;
/// use findpick_lib::model::Value;
///
/// let record = Record::new()
///     .set("name", "Contoso")
///     .set("balance", 1_000_000i64);
///
/// assert_eq!(record.value("name"), Value::from("Contoso"));
/// assert_eq!(record.value("missing"), Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or `Value::Null` if the field is missing.
    pub fn value(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_as_null() {
        let record = Record::new().set("name", "Contoso");
        assert_eq!(record.value("name"), Value::from("Contoso"));
        assert_eq!(record.value("nope"), Value::Null);
    }

    #[test]
    fn test_collect_from_pairs() {
        let record: Record = [("id", 1), ("rank", 2)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert!(record.contains("rank"));
    }
}
