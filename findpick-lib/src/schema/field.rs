//! Field (column) definitions

use std::fmt;

use super::capability::DebugFormatFn;
use super::capability::FormatFn;
use super::capability::fixed_decimal;
use super::config::FieldConfig;
use super::format::coerce_datetime;
use super::format::format_pattern;
use super::kind::Alignment;
use super::kind::DisplayType;
use super::kind::FieldKind;
use super::kind::SortOrder;
use crate::instance::FieldInstance;
use crate::model::Value;

/// Decimal places a currency column uses when none are configured.
pub const DEFAULT_CURRENCY_DECIMALS: u32 = 2;

/// Stable identity of a field within its row definition.
///
/// Assigned when the field is added. Pairs the key of the owning row
/// definition with the column position, so ids from two row definitions never
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub(crate) schema: u64,
    pub(crate) index: usize,
}

impl FieldId {
    pub(crate) fn new(schema: u64, index: usize) -> Self {
        Self { schema, index }
    }

    /// Returns the column position.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.schema, self.index)
    }
}

/// Definition of one column of a find dialog.
///
/// A definition is built once per column and shared by every row created from
/// the same [`RowDefinition`](super::RowDefinition). Its [`FieldKind`] decides
/// how raw values are coerced ([`value`](Self::value)) and displayed
/// ([`text_value`](Self::text_value)). Neither ever fails: absent or invalid
/// raw values give `None`.
///
/// # Example
///
/// ```
/// use findpick_lib::model::Value;
/// use findpick_lib::schema::{FieldConfig, FieldDefinition, FieldKind};
///
/// let qty = FieldDefinition::new(FieldKind::Number, FieldConfig::new("qty", "Qty").with_decimals(2));
/// assert_eq!(qty.text_value(&Value::from(3)).as_deref(), Some("3.00"));
/// assert_eq!(qty.text_value(&Value::from(0)), None);
/// ```
#[derive(Clone)]
pub struct FieldDefinition {
    pub(crate) id: Option<FieldId>,
    kind: FieldKind,
    name: String,
    title: String,
    width: u16,
    filterable: bool,
    sort: i8,
    format_string: Option<String>,
    decimals: Option<u32>,
    zero_is_value: bool,
    format_fn: Option<FormatFn>,
}

impl FieldDefinition {
    /// Creates a definition of the given kind from its configuration.
    ///
    /// Boolean columns are never filterable. Currency columns default to two
    /// decimals and resolve their `"currency"` formatter here.
    pub fn new(kind: FieldKind, config: FieldConfig) -> Self {
        let filterable = match kind {
            FieldKind::Boolean => false,
            _ => config.filterable,
        };

        let decimals = match kind {
            FieldKind::Currency => Some(config.decimals.unwrap_or(DEFAULT_CURRENCY_DECIMALS)),
            FieldKind::Number => config.decimals,
            _ => None,
        };

        let format_fn = match kind {
            FieldKind::Currency => config.formatter.as_ref().and_then(|f| f.lookup("currency")),
            _ => None,
        };

        Self {
            id: None,
            kind,
            name: config.name,
            title: config.title,
            width: config.width,
            filterable,
            sort: SortOrder::Unsorted.code(),
            format_string: config.format_string,
            decimals,
            zero_is_value: config.zero_is_value,
            format_fn,
        }
    }

    /// Creates a string column.
    pub fn string(config: FieldConfig) -> Self {
        Self::new(FieldKind::String, config)
    }

    /// Creates a date column.
    pub fn date(config: FieldConfig) -> Self {
        Self::new(FieldKind::Date, config)
    }

    /// Creates a date-and-time column.
    pub fn date_time(config: FieldConfig) -> Self {
        Self::new(FieldKind::DateTime, config)
    }

    /// Creates a number column.
    pub fn number(config: FieldConfig) -> Self {
        Self::new(FieldKind::Number, config)
    }

    /// Creates a currency column.
    pub fn currency(config: FieldConfig) -> Self {
        Self::new(FieldKind::Currency, config)
    }

    /// Creates a boolean column.
    pub fn boolean(config: FieldConfig) -> Self {
        Self::new(FieldKind::Boolean, config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the identity assigned by the owning row definition.
    pub fn id(&self) -> Option<FieldId> {
        self.id
    }

    /// Returns the type tag.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the type name (`"string"`, `"currency"`, ...).
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Returns the record property this column reads.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the header label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the layout width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Returns the configured date pattern, if any.
    pub fn format_string(&self) -> Option<&str> {
        self.format_string.as_deref()
    }

    /// Returns the fraction digits used for numeric text.
    pub fn decimals(&self) -> Option<u32> {
        self.decimals
    }

    /// Returns `true` if the column is advertised as searchable.
    pub fn filterable(&self) -> bool {
        self.filterable
    }

    /// Returns the cell alignment.
    pub fn alignment(&self) -> Alignment {
        self.kind.alignment()
    }

    /// Returns `true` if cells are right aligned.
    pub fn is_right(&self) -> bool {
        self.alignment() == Alignment::Right
    }

    /// Returns `true` if cells are centered.
    pub fn is_center(&self) -> bool {
        self.alignment() == Alignment::Center
    }

    /// Returns the display kind.
    pub fn display_type(&self) -> DisplayType {
        self.kind.display_type()
    }

    /// Returns `true` if cells render as text.
    pub fn is_text(&self) -> bool {
        self.display_type() == DisplayType::Text
    }

    /// Returns `true` if cells render as a boolean indicator.
    pub fn is_bool(&self) -> bool {
        self.display_type() == DisplayType::Boolean
    }

    /// Returns the stored sort code (`-1`, `0` or `1`).
    pub fn sort(&self) -> i8 {
        self.sort
    }

    /// Returns the sort state.
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::from_code(self.sort)
    }

    /// Overwrites the stored sort code without notifying the row definition.
    ///
    /// Any code is accepted; the next toggle turns an out-of-range code into
    /// `Unsorted`.
    pub fn set_sort_code(&mut self, code: i8) {
        self.sort = code;
    }

    /// Clears the sort state.
    pub fn unsort(&mut self) {
        self.sort = SortOrder::Unsorted.code();
    }

    /// Moves to the next sort state and returns it.
    ///
    /// This only updates this field. [`RowDefinition::sort_toggle`] also
    /// unsorts the siblings and fires the sort callback.
    ///
    /// [`RowDefinition::sort_toggle`]: super::RowDefinition::sort_toggle
    pub(crate) fn cycle_sort(&mut self) -> SortOrder {
        self.sort = SortOrder::next_code(self.sort);
        self.sort_order()
    }

    // =========================================================================
    // Coercion and formatting
    // =========================================================================

    /// Coerces a raw value for non-text display.
    ///
    /// Boolean columns coerce to `Value::Bool`; every other kind returns the
    /// raw value unchanged.
    pub fn value(&self, raw: &Value) -> Value {
        match self.kind {
            FieldKind::Boolean => Value::Bool(raw.boolify()),
            _ => raw.clone(),
        }
    }

    /// Produces the display text for a raw value, or `None` if absent.
    pub fn text_value(&self, raw: &Value) -> Option<String> {
        match self.kind {
            FieldKind::String => match raw {
                Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            },
            FieldKind::Date | FieldKind::DateTime => {
                if !self.is_present(raw) {
                    return None;
                }
                let dt = coerce_datetime(raw)?;
                Some(format_pattern(&dt, self.date_pattern()))
            }
            FieldKind::Number => {
                if !self.is_present(raw) {
                    return None;
                }
                match (self.decimals, raw.as_decimal()) {
                    (Some(decimals), Some(amount)) => Some(fixed_decimal(amount, decimals)),
                    _ => Some(raw.to_display_string()),
                }
            }
            FieldKind::Currency => {
                let decimals = self.decimals.unwrap_or(DEFAULT_CURRENCY_DECIMALS);
                if let Some(format_fn) = &self.format_fn {
                    return format_fn(raw, decimals);
                }
                if !self.is_present(raw) {
                    return None;
                }
                match raw.as_decimal() {
                    Some(amount) => Some(fixed_decimal(amount, decimals)),
                    None => Some(raw.to_display_string()),
                }
            }
            FieldKind::Boolean => {
                if raw.is_truthy() {
                    Some(raw.to_display_string())
                } else {
                    None
                }
            }
        }
    }

    /// Binds this definition to one raw value.
    pub fn make_instance(&self, raw: Value) -> FieldInstance {
        FieldInstance::new(raw, self)
    }

    /// Returns the pattern date text is formatted with.
    pub fn date_pattern(&self) -> &str {
        match self.format_string.as_deref() {
            Some(pattern) if !pattern.is_empty() => pattern,
            _ => self.kind.default_pattern().unwrap_or_default(),
        }
    }

    /// Presence test for numeric and date columns.
    ///
    /// Every falsy raw value is absent, numeric zero included, unless the
    /// column opted into `zero_is_value`.
    fn is_present(&self, raw: &Value) -> bool {
        raw.is_truthy() || (self.zero_is_value && raw.is_number())
    }

    pub(crate) fn set_format_string(&mut self, pattern: String) {
        self.format_string = Some(pattern);
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("filterable", &self.filterable)
            .field("sort", &self.sort)
            .field("format_string", &self.format_string)
            .field("decimals", &self.decimals)
            .field("zero_is_value", &self.zero_is_value)
            .field("format_fn", &DebugFormatFn(&self.format_fn))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::types::Money;
    use crate::schema::StandardFormatters;

    fn cfg(name: &str) -> FieldConfig {
        FieldConfig::new(name, name.to_uppercase())
    }

    #[test]
    fn test_string_trims_and_rejects_non_strings() {
        let field = FieldDefinition::string(cfg("name"));
        assert_eq!(
            field.text_value(&Value::from("  Acme Corp  ")).as_deref(),
            Some("Acme Corp")
        );
        assert_eq!(field.text_value(&Value::from(42)), None);
        assert_eq!(field.text_value(&Value::Null), None);
        assert_eq!(field.text_value(&Value::from("")).as_deref(), Some(""));
        assert_eq!(field.alignment(), Alignment::Left);
    }

    #[test]
    fn test_date_default_pattern() {
        let field = FieldDefinition::date(cfg("created"));
        let raw = Value::from(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(field.text_value(&raw).as_deref(), Some("1/15/2024"));
        assert_eq!(field.text_value(&Value::Null), None);
        assert_eq!(field.text_value(&Value::from("")), None);
        assert_eq!(field.text_value(&Value::from("garbage")), None);
    }

    #[test]
    fn test_date_time_pattern_and_override() {
        let raw = Value::from("2024-01-15T17:30:00Z");

        let field = FieldDefinition::date_time(cfg("at"));
        assert_eq!(field.text_value(&raw).as_deref(), Some("1/15/2024 05:30 PM"));

        let field = FieldDefinition::date_time(cfg("at").with_format_string("YYYY-MM-DD HH:mm"));
        assert_eq!(field.text_value(&raw).as_deref(), Some("2024-01-15 17:30"));

        let field = FieldDefinition::date(cfg("at").with_format_string(""));
        assert_eq!(field.text_value(&raw).as_deref(), Some("1/15/2024"));
    }

    #[test]
    fn test_number_decimals_and_zero_quirk() {
        let field = FieldDefinition::number(cfg("qty").with_decimals(2));
        assert_eq!(field.text_value(&Value::from(3)).as_deref(), Some("3.00"));
        assert_eq!(field.text_value(&Value::from(0)), None);
        assert_eq!(field.text_value(&Value::Null), None);
        assert!(field.is_right());

        let plain = FieldDefinition::number(cfg("qty"));
        assert_eq!(plain.text_value(&Value::from(2.5)).as_deref(), Some("2.5"));
        assert_eq!(plain.text_value(&Value::from(7.0)).as_deref(), Some("7"));
    }

    #[test]
    fn test_zero_is_value_opt_in() {
        let field = FieldDefinition::number(cfg("qty").with_decimals(1).zero_is_value(true));
        assert_eq!(field.text_value(&Value::from(0)).as_deref(), Some("0.0"));
        assert_eq!(field.text_value(&Value::Null), None);
        assert_eq!(field.text_value(&Value::from("")), None);
    }

    #[test]
    fn test_currency_defaults_to_two_decimals() {
        let field = FieldDefinition::currency(cfg("balance"));
        assert_eq!(field.decimals(), Some(2));
        assert_eq!(field.text_value(&Value::from(12.5)).as_deref(), Some("12.50"));
        assert_eq!(
            field
                .text_value(&Value::from(Money::new(Decimal::new(1999, 2))))
                .as_deref(),
            Some("19.99")
        );
        assert_eq!(field.text_value(&Value::from(0)), None);

        let field = FieldDefinition::currency(cfg("balance").with_decimals(0));
        assert_eq!(field.text_value(&Value::from(12.5)).as_deref(), Some("13"));
    }

    #[test]
    fn test_currency_uses_formatter() {
        let formatter = Rc::new(StandardFormatters::new().with_symbol("€"));
        let field = FieldDefinition::currency(cfg("balance").with_formatter(formatter));
        assert_eq!(field.text_value(&Value::from(1500)).as_deref(), Some("€1,500.00"));
        // The formatter, not the presence rule, decides about zero and null.
        assert_eq!(field.text_value(&Value::from(0)).as_deref(), Some("€0.00"));
        assert_eq!(field.text_value(&Value::Null), None);
    }

    #[test]
    fn test_boolean_is_never_filterable() {
        let field = FieldDefinition::boolean(cfg("active").filterable(true));
        assert!(!field.filterable());
        assert!(field.is_bool());
        assert!(!field.is_text());
        assert!(field.is_center());
        assert_eq!(field.value(&Value::from("yes")), Value::Bool(true));
        assert_eq!(field.value(&Value::from(0)), Value::Bool(false));
    }

    #[test]
    fn test_value_is_identity_for_text_kinds() {
        let field = FieldDefinition::number(cfg("qty"));
        assert_eq!(field.value(&Value::from(5)), Value::from(5));
    }

    #[test]
    fn test_sort_cycle_on_field() {
        let mut field = FieldDefinition::string(cfg("name"));
        assert_eq!(field.sort_order(), SortOrder::Unsorted);
        assert_eq!(field.cycle_sort(), SortOrder::Ascending);
        assert_eq!(field.cycle_sort(), SortOrder::Descending);
        assert_eq!(field.cycle_sort(), SortOrder::Unsorted);

        field.set_sort_code(5);
        assert_eq!(field.cycle_sort(), SortOrder::Unsorted);
        assert_eq!(field.sort(), 0);
    }
}
