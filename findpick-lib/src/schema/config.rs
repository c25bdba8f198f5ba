//! Column configuration

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use super::capability::FormatterLookup;

/// Configuration for one column of a find dialog.
///
/// Consumed once by a [`RowDefinition`](super::RowDefinition) builder method.
/// Nothing is validated: a missing name simply reads `Null` from every record
/// and a missing title renders empty.
///
/// # Example
///
/// ```
/// use findpick_lib::schema::FieldConfig;
///
/// let config = FieldConfig::new("balance", "Balance")
///     .with_width(2)
///     .with_decimals(2)
///     .filterable(true);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Property key read from every raw record.
    pub name: String,

    /// Header label. Host applications may run it through their localizer.
    pub title: String,

    /// Layout weight of the column, opaque to the engine.
    pub width: u16,

    /// Whether the column is advertised as searchable.
    pub filterable: bool,

    /// Formatter lookup for this column. When absent the row definition's
    /// lookup is used.
    #[serde(skip)]
    pub formatter: Option<Rc<dyn FormatterLookup>>,

    /// Date pattern (moment-style tokens) for date columns.
    #[serde(alias = "formatString")]
    pub format_string: Option<String>,

    /// Fraction digits for number and currency columns.
    pub decimals: Option<u32>,

    /// Treat numeric zero as a present value instead of an absent one.
    ///
    /// Default: `false`, so `0` renders as an empty cell.
    #[serde(alias = "zeroIsValue")]
    pub zero_is_value: bool,
}

impl FieldConfig {
    /// Creates a config for the given property name and header title.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the layout width.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Sets whether the column is searchable.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Sets a column-specific formatter lookup.
    pub fn with_formatter(mut self, formatter: Rc<dyn FormatterLookup>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Sets the date pattern.
    pub fn with_format_string(mut self, pattern: impl Into<String>) -> Self {
        self.format_string = Some(pattern.into());
        self
    }

    /// Sets the number of fraction digits.
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Renders numeric zero instead of treating it as absent.
    pub fn zero_is_value(mut self, zero_is_value: bool) -> Self {
        self.zero_is_value = zero_is_value;
        self
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldConfig")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("filterable", &self.filterable)
            .field("formatter", &self.formatter.as_ref().map(|_| "<lookup>"))
            .field("format_string", &self.format_string)
            .field("decimals", &self.decimals)
            .field("zero_is_value", &self.zero_is_value)
            .finish()
    }
}
