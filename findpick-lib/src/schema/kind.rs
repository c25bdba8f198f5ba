//! Column type tags, alignment and sort direction.

use serde::Deserialize;
use serde::Serialize;

/// The type tag of a column.
///
/// Every kind shares one [`FieldDefinition`](super::FieldDefinition) struct;
/// the tag selects how raw values are coerced and formatted.
///
/// | Kind | Alignment | Display | Default pattern |
/// |------|-----------|---------|-----------------|
/// | `String` | Left | Text | |
/// | `Date` | Left | Text | `M/D/YYYY` |
/// | `DateTime` | Left | Text | `M/D/YYYY hh:mm A` |
/// | `Number` | Right | Text | |
/// | `Currency` | Right | Text | |
/// | `Boolean` | Center | Boolean | |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Date,
    #[serde(alias = "date_time")]
    DateTime,
    Number,
    Currency,
    Boolean,
}

impl FieldKind {
    /// Returns the type name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
            FieldKind::Number => "number",
            FieldKind::Currency => "currency",
            FieldKind::Boolean => "boolean",
        }
    }

    /// Horizontal alignment of cells in this kind of column.
    pub fn alignment(&self) -> Alignment {
        match self {
            FieldKind::String | FieldKind::Date | FieldKind::DateTime => Alignment::Left,
            FieldKind::Number | FieldKind::Currency => Alignment::Right,
            FieldKind::Boolean => Alignment::Center,
        }
    }

    /// How cells of this kind render.
    pub fn display_type(&self) -> DisplayType {
        match self {
            FieldKind::Boolean => DisplayType::Boolean,
            _ => DisplayType::Text,
        }
    }

    /// Hardcoded date pattern used when neither the config nor a localizer
    /// supplies one.
    pub fn default_pattern(&self) -> Option<&'static str> {
        match self {
            FieldKind::Date => Some("M/D/YYYY"),
            FieldKind::DateTime => Some("M/D/YYYY hh:mm A"),
            _ => None,
        }
    }

    /// Localization key for the localized default date pattern.
    pub fn pattern_key(&self) -> Option<&'static str> {
        match self {
            FieldKind::Date => Some("Core$MomentFullDateString"),
            FieldKind::DateTime => Some("Core$MomentFullDateTimeString"),
            _ => None,
        }
    }

    /// Returns `true` for `Number` and `Currency`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Currency)
    }

    /// Returns `true` for `Date` and `DateTime`.
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldKind::Date | FieldKind::DateTime)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Whether a column renders free text or a boolean indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayType {
    #[default]
    Text,
    Boolean,
}

/// Sort state of one column.
///
/// Stored on the field as its integer code (`-1`, `0`, `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Descending order (Z-A, 9-0).
    Descending,
    /// Not sorted by this column.
    #[default]
    Unsorted,
    /// Ascending order (A-Z, 0-9).
    Ascending,
}

impl SortOrder {
    /// Returns the integer code of this state.
    pub fn code(&self) -> i8 {
        match self {
            SortOrder::Descending => -1,
            SortOrder::Unsorted => 0,
            SortOrder::Ascending => 1,
        }
    }

    /// Maps a stored code back to a state. Out-of-range codes are `Unsorted`.
    pub fn from_code(code: i8) -> Self {
        match code {
            1 => SortOrder::Ascending,
            -1 => SortOrder::Descending,
            _ => SortOrder::Unsorted,
        }
    }

    /// The state a header click moves to: Unsorted → Ascending → Descending →
    /// Unsorted. Any other stored code restarts at Unsorted.
    pub fn next_code(code: i8) -> i8 {
        match code {
            0 => 1,
            1 => -1,
            _ => 0,
        }
    }

    /// Returns `true` unless this is `Unsorted`.
    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortOrder::Unsorted)
    }
}
