//! Row instances

use log::trace;

use super::field::FieldInstance;
use crate::model::Record;
use crate::model::Value;
use crate::schema::FieldDefinition;
use crate::schema::RowDefinition;

/// One raw record bound to a row definition.
///
/// Holds one [`FieldInstance`] per column in column order, plus the state a
/// picker needs: the sort value, the selection flag and the filter flag.
#[derive(Debug, Clone)]
pub struct RowInstance {
    data: Record,
    fields: Vec<FieldInstance>,
    sort_val: Value,
    default_sort: Value,
    selected: bool,
    not_found: bool,
}

impl RowInstance {
    /// Builds the field instances for `raw` from every column of
    /// `row_defn`.
    ///
    /// A column whose property is missing from the record reads `Null`.
    pub fn new(row_defn: &RowDefinition, raw: Record, initial_sort: Value) -> Self {
        let fields = row_defn
            .field_defns()
            .iter()
            .map(|field_defn| field_defn.make_instance(raw.value(field_defn.name())))
            .collect();

        Self {
            data: raw,
            fields,
            sort_val: initial_sort.clone(),
            default_sort: initial_sort,
            selected: false,
            not_found: false,
        }
    }

    /// Returns the raw record.
    pub fn data(&self) -> &Record {
        &self.data
    }

    /// Consumes the row and returns the raw record.
    pub fn into_data(self) -> Record {
        self.data
    }

    /// Returns the field instances in column order.
    pub fn fields(&self) -> &[FieldInstance] {
        &self.fields
    }

    /// Returns the current sort value.
    pub fn sort_val(&self) -> &Value {
        &self.sort_val
    }

    /// Returns the sort value the row was created with.
    pub fn default_sort(&self) -> &Value {
        &self.default_sort
    }

    /// Returns `true` if the last filter run found no match in this row.
    pub fn not_found(&self) -> bool {
        self.not_found
    }

    /// Returns `true` if the row is the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Sets the selection flag.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Returns the raw value of the instance built from `field_defn`.
    ///
    /// Lookup is by [`FieldId`](crate::schema::FieldId), which carries the
    /// owning row definition. A definition from another row definition, or
    /// one never added to any, gives `None`.
    pub fn get_data_by_defn(&self, field_defn: &FieldDefinition) -> Option<&Value> {
        let id = field_defn.id()?;
        self.fields
            .get(id.index())
            .filter(|instance| instance.field_id() == Some(id))
            .map(FieldInstance::data)
    }

    /// Recomputes the sort value from a column, or restores the default.
    ///
    /// With a column, the sort value becomes that column's raw data (`Null`
    /// when the column is not part of this row). Without one it goes back to
    /// the value the row was created with.
    pub fn sort_val_data_by_defn(&mut self, field_defn: Option<&FieldDefinition>) -> &Value {
        self.sort_val = match field_defn {
            Some(field_defn) => self.get_data_by_defn(field_defn).cloned().unwrap_or_default(),
            None => self.default_sort.clone(),
        };
        trace!("Row sort value -> {:?}", self.sort_val);
        &self.sort_val
    }

    /// Runs the filter over every field and records the outcome.
    ///
    /// Stops at the first matching field. Sets `not_found` to the opposite of
    /// the returned value.
    pub fn assign_found(&mut self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let found = self
            .fields
            .iter()
            .any(|field| field.matches_lowered(&needle));
        self.not_found = !found;
        found
    }
}
