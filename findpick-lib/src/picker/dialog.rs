//! Fluent find dialog builder

use std::rc::Rc;

use super::session::FindSession;
use super::settings::DialogSize;
use super::settings::FindDialogSettings;
use super::source::ListSource;
use crate::schema::FieldConfig;
use crate::schema::FieldDefinition;
use crate::schema::FormatterLookup;
use crate::schema::Localizer;
use crate::schema::RowDefinition;

/// Builds a find dialog step by step and opens it on a record list.
///
/// Set the capabilities first: formatter and localizer only affect columns
/// added after them.
///
/// # Example
///
/// ```
/// use findpick_lib::model::Record;
/// use findpick_lib::picker::{DialogSize, FindDialog};
/// use findpick_lib::schema::FieldConfig;
///
/// let session = FindDialog::new()
///     .size(DialogSize::Lg)
///     .title("Customers")
///     .string_field(FieldConfig::new("name", "Name").filterable(true))
///     .boolean_field(FieldConfig::new("active", "Active"))
///     .show(vec![Record::new().set("name", "Acme").set("active", true)]);
///
/// assert_eq!(session.len(), 1);
/// assert_eq!(session.settings().title, "Customers");
/// ```
#[derive(Debug, Default)]
pub struct FindDialog {
    settings: FindDialogSettings,
    row_defn: RowDefinition,
}

impl FindDialog {
    /// Creates a builder with default settings and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing settings.
    pub fn with_settings(mut self, settings: FindDialogSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the modal width class.
    pub fn size(mut self, size: DialogSize) -> Self {
        self.settings.size = size;
        self
    }

    /// Sets the title key.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.settings.title = title.into();
        self
    }

    /// Shows or hides the search box.
    pub fn search_box(mut self, search_box: bool) -> Self {
        self.settings.search_box = search_box;
        self
    }

    /// Replaces the default button text.
    pub fn button_text(mut self, text: impl Into<String>) -> Self {
        self.settings.button_text = Some(text.into());
        self
    }

    /// Sets whether picking a row closes the dialog.
    pub fn close_on_pick(mut self, close_on_pick: bool) -> Self {
        self.settings.close_on_pick = close_on_pick;
        self
    }

    /// Turns the dialog into a read-only list.
    pub fn display_only(mut self) -> Self {
        self.settings.search_box = false;
        self.settings.button_text = Some("Core$OK".to_string());
        self.settings.close_on_pick = false;
        self
    }

    /// Sets the formatter lookup for numeric columns added afterwards.
    pub fn with_formatter(mut self, formatter: Rc<dyn FormatterLookup>) -> Self {
        self.row_defn = self.row_defn.with_formatter(formatter);
        self
    }

    /// Sets the localizer for date columns added afterwards.
    pub fn with_localizer(mut self, localizer: Rc<dyn Localizer>) -> Self {
        self.row_defn = self.row_defn.with_localizer(localizer);
        self
    }

    /// Appends a prebuilt column.
    pub fn add_field_defn(mut self, field_defn: FieldDefinition) -> Self {
        self.row_defn = self.row_defn.add_field_defn(field_defn);
        self
    }

    /// Appends a string column.
    pub fn string_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.string_field(config);
        self
    }

    /// Appends a date column.
    pub fn date_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.date_field(config);
        self
    }

    /// Appends a date-and-time column.
    pub fn date_time_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.date_time_field(config);
        self
    }

    /// Appends a number column.
    pub fn number_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.number_field(config);
        self
    }

    /// Appends a currency column.
    pub fn currency_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.currency_field(config);
        self
    }

    /// Appends a boolean column.
    pub fn boolean_field(mut self, config: FieldConfig) -> Self {
        self.row_defn = self.row_defn.boolean_field(config);
        self
    }

    /// Returns the settings built so far.
    pub fn settings(&self) -> &FindDialogSettings {
        &self.settings
    }

    /// Returns the row definition built so far.
    pub fn row_definition(&self) -> &RowDefinition {
        &self.row_defn
    }

    /// Opens a session over the given records.
    pub fn show(self, source: impl Into<ListSource>) -> FindSession {
        FindSession::new(self.row_defn, source.into().resolve(), self.settings)
    }
}
