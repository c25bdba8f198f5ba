//! Row definitions

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use log::debug;

use super::capability::FormatterLookup;
use super::capability::Localizer;
use super::config::FieldConfig;
use super::field::FieldDefinition;
use super::field::FieldId;
use super::kind::FieldKind;
use super::kind::SortOrder;
use crate::error::FindError;
use crate::error::FindResult;
use crate::instance::RowInstance;
use crate::model::Record;
use crate::model::Value;

/// Callback fired after the sort column changes.
///
/// Receives the field that was toggled. Its [`FieldDefinition::sort_order`]
/// tells the owner whether to order by it or to restore the source order.
pub type RowSortCallback = Box<dyn FnMut(&FieldDefinition)>;

/// Source of row definition keys, unique per process.
static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// The ordered set of columns of a find dialog.
///
/// Columns are appended with the fluent builder methods and keep their
/// insertion order. The row definition guarantees that at most one column is
/// sorted at a time and tells its owner about sort changes through the
/// registered [`RowSortCallback`]. The rows themselves are ordered by the
/// owner, not here.
///
/// # Example
///
/// ```
/// use findpick_lib::model::Record;
/// use findpick_lib::schema::{FieldConfig, RowDefinition, SortOrder};
///
/// let mut defn = RowDefinition::new()
///     .string_field(FieldConfig::new("name", "Name").filterable(true))
///     .currency_field(FieldConfig::new("balance", "Balance"));
///
/// let row = defn.make_row_instance(Record::new().set("name", "Acme").set("balance", 12.5), 0usize);
/// assert_eq!(row.fields()[1].display(), Some("12.50"));
///
/// let balance = defn.field_defns()[1].id().unwrap();
/// assert_eq!(defn.sort_toggle(balance).unwrap(), SortOrder::Ascending);
/// ```
pub struct RowDefinition {
    key: u64,
    field_defns: Vec<FieldDefinition>,
    row_sort_callback: Option<RowSortCallback>,
    formatter: Option<Rc<dyn FormatterLookup>>,
    localizer: Option<Rc<dyn Localizer>>,
}

impl Default for RowDefinition {
    fn default() -> Self {
        Self {
            key: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            field_defns: Vec::new(),
            row_sort_callback: None,
            formatter: None,
            localizer: None,
        }
    }
}

impl RowDefinition {
    /// Creates an empty row definition without capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the formatter lookup injected into number and currency columns.
    pub fn with_formatter(mut self, formatter: Rc<dyn FormatterLookup>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Sets the localizer used for default date patterns.
    pub fn with_localizer(mut self, localizer: Rc<dyn Localizer>) -> Self {
        self.localizer = Some(localizer);
        self
    }

    /// Returns the localizer, if one was supplied.
    pub fn localizer(&self) -> Option<&Rc<dyn Localizer>> {
        self.localizer.as_ref()
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Returns the column definitions in display order.
    pub fn field_defns(&self) -> &[FieldDefinition] {
        &self.field_defns
    }

    /// Returns the column with the given identity.
    pub fn field(&self, id: FieldId) -> Option<&FieldDefinition> {
        let index = self.index_of(id).ok()?;
        self.field_defns.get(index)
    }

    /// Finds a column by the record property it reads.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDefinition> {
        self.field_defns.iter().find(|f| f.name() == name)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.field_defns.len()
    }

    /// Returns `true` if no columns are defined.
    pub fn is_empty(&self) -> bool {
        self.field_defns.is_empty()
    }

    /// Returns the currently sorted column, if any.
    pub fn sorted_field(&self) -> Option<&FieldDefinition> {
        self.field_defns.iter().find(|f| f.sort_order().is_sorted())
    }

    /// Appends a column (builder pattern).
    pub fn add_field_defn(mut self, field_defn: FieldDefinition) -> Self {
        self.push_field_defn(field_defn);
        self
    }

    /// Appends a column and returns the identity it was given.
    pub fn push_field_defn(&mut self, mut field_defn: FieldDefinition) -> FieldId {
        let id = FieldId::new(self.key, self.field_defns.len());
        field_defn.id = Some(id);
        self.field_defns.push(field_defn);
        id
    }

    /// Appends a string column.
    pub fn string_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::String, config)
    }

    /// Appends a date column.
    pub fn date_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::Date, config)
    }

    /// Appends a date-and-time column.
    pub fn date_time_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::DateTime, config)
    }

    /// Appends a number column.
    pub fn number_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::Number, config)
    }

    /// Appends a currency column.
    pub fn currency_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::Currency, config)
    }

    /// Appends a boolean column.
    pub fn boolean_field(self, config: FieldConfig) -> Self {
        self.make_field_defn(FieldKind::Boolean, config)
    }

    /// Builds a column of `kind` from `config` and appends it.
    ///
    /// Numeric columns without their own formatter lookup get the row
    /// definition's. Date columns without a pattern get the localized default
    /// pattern when the localizer knows one.
    pub fn make_field_defn(mut self, kind: FieldKind, config: FieldConfig) -> Self {
        self.push_field(kind, config);
        self
    }

    /// Non-consuming form of [`make_field_defn`](Self::make_field_defn).
    pub fn push_field(&mut self, kind: FieldKind, mut config: FieldConfig) -> FieldId {
        if kind.is_numeric() && config.formatter.is_none() {
            config.formatter = self.formatter.clone();
        }

        let localized_pattern = match (kind.pattern_key(), &self.localizer) {
            (Some(key), Some(localizer)) if config.format_string.is_none() => localizer
                .translate(key)
                .filter(|pattern| !pattern.is_empty()),
            _ => None,
        };

        let mut field_defn = FieldDefinition::new(kind, config);
        if let Some(pattern) = localized_pattern {
            field_defn.set_format_string(pattern);
        }
        self.push_field_defn(field_defn)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Registers the callback fired by [`sort_by`](Self::sort_by).
    pub fn set_row_sort_callback(&mut self, callback: RowSortCallback) {
        self.row_sort_callback = Some(callback);
    }

    /// Removes the sort callback and returns it.
    pub fn clear_row_sort_callback(&mut self) -> Option<RowSortCallback> {
        self.row_sort_callback.take()
    }

    /// Returns the registered sort callback.
    pub fn row_sort_callback(&mut self) -> Option<&mut RowSortCallback> {
        self.row_sort_callback.as_mut()
    }

    /// Returns `true` if a sort callback is registered.
    pub fn has_row_sort_callback(&self) -> bool {
        self.row_sort_callback.is_some()
    }

    /// Cycles the sort state of a column and propagates it.
    ///
    /// Unsorted → Ascending → Descending → Unsorted. The other columns are
    /// unsorted and the sort callback fires with the toggled column.
    pub fn sort_toggle(&mut self, id: FieldId) -> FindResult<SortOrder> {
        let index = self.index_of(id)?;
        let field = &mut self.field_defns[index];
        let order = field.cycle_sort();
        debug!("Sort toggle on '{}' -> {:?}", field.name(), order);

        self.sort_by(id)?;
        Ok(order)
    }

    /// Makes `sort_by` the only column that may be sorted, then notifies the
    /// owner.
    ///
    /// Every other column is unsorted and every column's identity is
    /// reasserted. Without a registered callback this only resets the
    /// siblings.
    pub fn sort_by(&mut self, sort_by: FieldId) -> FindResult<()> {
        let sorted = self.index_of(sort_by)?;

        for (index, field_defn) in self.field_defns.iter_mut().enumerate() {
            if index != sorted {
                field_defn.unsort();
            }
            field_defn.id = Some(FieldId::new(self.key, index));
        }

        if let Some(callback) = self.row_sort_callback.as_mut() {
            callback(&self.field_defns[sorted]);
        }
        Ok(())
    }

    /// Resolves an id to a column position, rejecting ids of other row
    /// definitions.
    fn index_of(&self, id: FieldId) -> FindResult<usize> {
        if id.schema == self.key && id.index < self.field_defns.len() {
            Ok(id.index)
        } else {
            Err(FindError::UnknownField(id))
        }
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Binds the schema to one raw record.
    ///
    /// `initial_sort` is the row's default sort value, usually its position in
    /// the source list.
    pub fn make_row_instance(&self, raw: Record, initial_sort: impl Into<Value>) -> RowInstance {
        RowInstance::new(self, raw, initial_sort.into())
    }
}

impl fmt::Debug for RowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDefinition")
            .field("key", &self.key)
            .field("field_defns", &self.field_defns)
            .field("row_sort_callback", &self.row_sort_callback.is_some())
            .field("formatter", &self.formatter.is_some())
            .field("localizer", &self.localizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::schema::StandardFormatters;
    use crate::schema::Translations;

    fn three_columns() -> RowDefinition {
        RowDefinition::new()
            .string_field(FieldConfig::new("name", "Name"))
            .number_field(FieldConfig::new("qty", "Qty"))
            .boolean_field(FieldConfig::new("active", "Active"))
    }

    fn id(defn: &RowDefinition, index: usize) -> FieldId {
        defn.field_defns()[index].id().unwrap()
    }

    fn sorted_count(defn: &RowDefinition) -> usize {
        defn.field_defns()
            .iter()
            .filter(|f| f.sort_order().is_sorted())
            .count()
    }

    #[test]
    fn test_fields_keep_insertion_order_and_ids() {
        let defn = three_columns();
        let names: Vec<&str> = defn.field_defns().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["name", "qty", "active"]);
        for (index, field) in defn.field_defns().iter().enumerate() {
            assert_eq!(field.id().map(|id| id.index()), Some(index));
        }
    }

    #[test]
    fn test_toggle_unsorts_siblings() {
        let mut defn = three_columns();
        let name = id(&defn, 0);
        let qty = id(&defn, 1);

        assert_eq!(defn.sort_toggle(name).unwrap(), SortOrder::Ascending);
        assert_eq!(defn.sort_toggle(qty).unwrap(), SortOrder::Ascending);
        assert_eq!(defn.field(name).unwrap().sort_order(), SortOrder::Unsorted);
        assert_eq!(sorted_count(&defn), 1);

        assert_eq!(defn.sort_toggle(qty).unwrap(), SortOrder::Descending);
        assert_eq!(defn.sort_toggle(qty).unwrap(), SortOrder::Unsorted);
        assert_eq!(sorted_count(&defn), 0);
        assert!(defn.sorted_field().is_none());
    }

    #[test]
    fn test_toggle_unknown_field_is_an_error() {
        let mut defn = three_columns();
        let out_of_range = FieldId::new(defn.key, 9);
        let err = defn.sort_toggle(out_of_range).unwrap_err();
        assert!(matches!(err, FindError::UnknownField(field) if field == out_of_range));
    }

    #[test]
    fn test_ids_of_another_row_definition_are_rejected() {
        let mut customers = three_columns();
        let orders = RowDefinition::new()
            .string_field(FieldConfig::new("sku", "Sku"))
            .currency_field(FieldConfig::new("total", "Total"));
        let total = id(&orders, 1);

        assert_ne!(total, id(&customers, 1));
        assert!(customers.field(total).is_none());
        assert!(matches!(
            customers.sort_toggle(total),
            Err(FindError::UnknownField(field)) if field == total
        ));
        assert!(customers.sort_by(total).is_err());
        assert_eq!(sorted_count(&customers), 0);
    }

    #[test]
    fn test_callback_receives_toggled_field() {
        let seen: Rc<RefCell<Vec<(String, SortOrder)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut defn = three_columns();
        defn.set_row_sort_callback(Box::new(move |field: &FieldDefinition| {
            sink.borrow_mut()
                .push((field.name().to_string(), field.sort_order()));
        }));

        let name = id(&defn, 0);
        let qty = id(&defn, 1);
        defn.sort_toggle(qty).unwrap();
        defn.sort_toggle(qty).unwrap();
        defn.sort_toggle(name).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                ("qty".to_string(), SortOrder::Ascending),
                ("qty".to_string(), SortOrder::Descending),
                ("name".to_string(), SortOrder::Ascending),
            ]
        );
    }

    #[test]
    fn test_sort_by_without_callback_is_noop() {
        let mut defn = three_columns();
        let active = id(&defn, 2);
        defn.sort_by(active).unwrap();
        assert!(!defn.has_row_sort_callback());
        assert_eq!(sorted_count(&defn), 0);
    }

    #[test]
    fn test_formatter_injected_into_numeric_columns() {
        let defn = RowDefinition::new()
            .with_formatter(Rc::new(StandardFormatters::new()))
            .currency_field(FieldConfig::new("balance", "Balance"))
            .string_field(FieldConfig::new("name", "Name"));

        let balance = &defn.field_defns()[0];
        assert_eq!(balance.text_value(&Value::from(2500)).as_deref(), Some("$2,500.00"));
    }

    #[test]
    fn test_localized_date_patterns() {
        let translations = Translations::new()
            .with("Core$MomentFullDateString", "DD.MM.YYYY")
            .with("Core$MomentFullDateTimeString", "DD.MM.YYYY HH:mm");
        let defn = RowDefinition::new()
            .with_localizer(Rc::new(translations))
            .date_field(FieldConfig::new("d", "D"))
            .date_time_field(FieldConfig::new("dt", "DT"))
            .date_field(FieldConfig::new("own", "Own").with_format_string("YYYY"));

        let raw = Value::from("2024-01-15T08:00:00Z");
        let texts: Vec<Option<String>> = defn
            .field_defns()
            .iter()
            .map(|f| f.text_value(&raw))
            .collect();
        assert_eq!(
            texts,
            vec![
                Some("15.01.2024".to_string()),
                Some("15.01.2024 08:00".to_string()),
                Some("2024".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_translation_falls_back_to_default_pattern() {
        let defn = RowDefinition::new()
            .with_localizer(Rc::new(Translations::new()))
            .date_field(FieldConfig::new("d", "D"));
        assert_eq!(defn.field_defns()[0].date_pattern(), "M/D/YYYY");
    }
}
