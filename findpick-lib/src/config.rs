//! Dialog configuration documents
//!
//! A dialog can be described in JSON instead of code:
//!
//! ```json
//! {
//!   "dialog": { "title": "Customers", "close_on_pick": false },
//!   "columns": [
//!     { "type": "string", "name": "name", "title": "Name", "width": 4, "filterable": true },
//!     { "type": "currency", "name": "balance", "title": "Balance", "width": 2 }
//!   ],
//!   "translations": { "Core$MomentFullDateString": "DD.MM.YYYY" }
//! }
//! ```

use std::rc::Rc;

use serde::Deserialize;

use crate::error::FindResult;
use crate::picker::FindDialog;
use crate::picker::FindDialogSettings;
use crate::schema::FieldConfig;
use crate::schema::FieldKind;
use crate::schema::FormatterLookup;
use crate::schema::Localizer;
use crate::schema::Translations;

/// One column entry of a [`DialogConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    /// Column type.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Column settings.
    #[serde(flatten)]
    pub field: FieldConfig,
}

/// A complete find dialog description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Presentation settings.
    pub dialog: FindDialogSettings,
    /// Columns in display order.
    pub columns: Vec<ColumnConfig>,
    /// Translations used as the localizer when none is passed in.
    pub translations: Option<Translations>,
}

impl DialogConfig {
    /// Parses a configuration document.
    pub fn from_json(json: &str) -> FindResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turns the configuration into a dialog builder.
    ///
    /// An explicit `localizer` wins over the document's translations.
    pub fn into_dialog(
        self,
        formatter: Option<Rc<dyn FormatterLookup>>,
        localizer: Option<Rc<dyn Localizer>>,
    ) -> FindDialog {
        let mut dialog = FindDialog::new().with_settings(self.dialog);
        if let Some(formatter) = formatter {
            dialog = dialog.with_formatter(formatter);
        }

        let localizer = localizer.or_else(|| {
            self.translations
                .map(|translations| Rc::new(translations) as Rc<dyn Localizer>)
        });
        if let Some(localizer) = localizer {
            dialog = dialog.with_localizer(localizer);
        }

        for column in self.columns {
            dialog = match column.kind {
                FieldKind::String => dialog.string_field(column.field),
                FieldKind::Date => dialog.date_field(column.field),
                FieldKind::DateTime => dialog.date_time_field(column.field),
                FieldKind::Number => dialog.number_field(column.field),
                FieldKind::Currency => dialog.currency_field(column.field),
                FieldKind::Boolean => dialog.boolean_field(column.field),
            };
        }
        dialog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FindError;
    use crate::model::Record;
    use crate::picker::DialogSize;
    use crate::schema::StandardFormatters;

    const CUSTOMERS: &str = r#"{
        "dialog": { "title": "Customers", "size": "lg", "close_on_pick": false },
        "columns": [
            { "type": "string", "name": "name", "title": "Name", "width": 4, "filterable": true },
            { "type": "currency", "name": "balance", "title": "Balance", "width": 2 },
            { "type": "date", "name": "since", "title": "Since" },
            { "type": "boolean", "name": "active", "title": "Active", "filterable": true }
        ],
        "translations": { "Core$MomentFullDateString": "DD.MM.YYYY" }
    }"#;

    #[test]
    fn test_parse_document() {
        let config = DialogConfig::from_json(CUSTOMERS).unwrap();
        assert_eq!(config.dialog.title, "Customers");
        assert_eq!(config.dialog.size, DialogSize::Lg);
        assert!(config.dialog.search_box);
        assert_eq!(config.columns.len(), 4);
        assert_eq!(config.columns[1].kind, FieldKind::Currency);
        assert_eq!(config.columns[0].field.width, 4);
        assert!(config.translations.is_some());
    }

    #[test]
    fn test_into_dialog_builds_columns() {
        let dialog = DialogConfig::from_json(CUSTOMERS)
            .unwrap()
            .into_dialog(Some(Rc::new(StandardFormatters::new())), None);

        let defn = dialog.row_definition();
        let kinds: Vec<FieldKind> = defn.field_defns().iter().map(|f| f.kind()).collect();
        assert_eq!(
            kinds,
            [FieldKind::String, FieldKind::Currency, FieldKind::Date, FieldKind::Boolean]
        );
        assert!(!defn.field_defns()[3].filterable());

        let session = dialog.show(vec![Record::new()
            .set("name", "Acme")
            .set("balance", 99.5)
            .set("since", "2020-02-29")]);
        let rows = session.rows();
        assert_eq!(rows[0].fields()[1].display(), Some("$99.50"));
        assert_eq!(rows[0].fields()[2].display(), Some("29.02.2020"));
    }

    #[test]
    fn test_unknown_column_type() {
        let err = DialogConfig::from_json(r#"{"columns": [{"type": "blob", "name": "x"}]}"#)
            .unwrap_err();
        assert!(matches!(err, FindError::Json(_)));
    }

    #[test]
    fn test_empty_document() {
        let config = DialogConfig::from_json("{}").unwrap();
        assert!(config.columns.is_empty());
        assert_eq!(config.dialog, FindDialogSettings::default());
    }
}
