//! FindError for schema, session and loading operations

use crate::schema::FieldId;

/// Result alias used across the crate.
pub type FindResult<T> = Result<T, FindError>;

/// Errors raised by caller mistakes and by JSON loading.
///
/// Formatting, matching and sort-key recomputation never fail: bad raw values
/// degrade to `None` or defaults. Only the cases below are reported.
#[derive(Debug, thiserror::Error)]
pub enum FindError {
    /// A sort toggle named a field that the row definition does not own.
    #[error("Field {0} does not belong to this row definition")]
    UnknownField(FieldId),

    /// A row index outside the current row list.
    #[error("Row {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// A record list entry was not a JSON object.
    #[error("Record {index} is a JSON {found}, expected an object")]
    NotAnObject { index: usize, found: &'static str },

    /// The record list itself was not a JSON array.
    #[error("Record list is a JSON {found}, expected an array")]
    NotAList { found: &'static str },

    /// Malformed JSON in a record list or dialog configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
