//! Field instances

use std::cell::OnceCell;

use crate::model::Value;
use crate::schema::FieldDefinition;
use crate::schema::FieldId;

/// One column's computed content for one record.
///
/// Text columns carry a [`display`](Self::display) string, boolean columns a
/// coerced [`value`](Self::value). The raw value is always kept as
/// [`data`](Self::data).
#[derive(Debug, Clone)]
pub struct FieldInstance {
    field_id: Option<FieldId>,
    data: Value,
    value: Option<Value>,
    display: Option<String>,
    filter_compare: OnceCell<String>,
}

impl FieldInstance {
    /// Binds `field_defn` to a raw value.
    pub fn new(raw: Value, field_defn: &FieldDefinition) -> Self {
        let (value, display) = if field_defn.is_text() {
            (None, field_defn.text_value(&raw))
        } else {
            (Some(field_defn.value(&raw)), None)
        };

        Self {
            field_id: field_defn.id(),
            data: raw,
            value,
            display,
            filter_compare: OnceCell::new(),
        }
    }

    /// Returns the identity of the definition this instance was built from.
    pub fn field_id(&self) -> Option<FieldId> {
        self.field_id
    }

    /// Returns the raw value.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the coerced value of a non-text column.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns the display text of a text column.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Returns `true` if the display text contains `needle`, ignoring case.
    ///
    /// Always `false` without display text. An empty needle matches any
    /// present display.
    pub fn matches(&self, needle: &str) -> bool {
        self.matches_lowered(&needle.to_lowercase())
    }

    /// Like [`matches`](Self::matches) for a needle that is already lowercase.
    pub(crate) fn matches_lowered(&self, needle: &str) -> bool {
        match &self.display {
            Some(display) => self
                .filter_compare
                .get_or_init(|| display.trim().to_lowercase())
                .contains(needle),
            None => false,
        }
    }
}
