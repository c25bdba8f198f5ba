//! Dialog presentation settings

use serde::Deserialize;

/// Modal width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogSize {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
}

/// Presentation settings of a find dialog.
///
/// Titles and button texts are localization keys; the host translates them
/// when rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FindDialogSettings {
    /// Modal width class.
    pub size: DialogSize,
    /// Title key.
    pub title: String,
    /// Whether the search box is shown.
    #[serde(alias = "searchBox")]
    pub search_box: bool,
    /// Replacement text for the default button.
    #[serde(alias = "buttonText")]
    pub button_text: Option<String>,
    /// Whether picking a row closes the dialog.
    #[serde(alias = "closeOnPick")]
    pub close_on_pick: bool,
}

impl Default for FindDialogSettings {
    fn default() -> Self {
        Self {
            size: DialogSize::Md,
            title: "App$Find".to_string(),
            search_box: true,
            button_text: None,
            close_on_pick: true,
        }
    }
}

impl FindDialogSettings {
    /// Settings for a read-only list: no search box, an OK button and rows
    /// that stay open when picked.
    pub fn display_only() -> Self {
        Self {
            search_box: false,
            button_text: Some("Core$OK".to_string()),
            close_on_pick: false,
            ..Self::default()
        }
    }
}
