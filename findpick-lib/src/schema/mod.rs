//! Column and row schemas
//!
//! A [`RowDefinition`] is an ordered list of [`FieldDefinition`]s built from
//! [`FieldConfig`]s. It is built once per dialog and turns raw records into
//! [`RowInstance`](crate::instance::RowInstance)s.

mod capability;
mod config;
mod field;
mod format;
mod kind;
mod row;

pub use capability::*;
pub use config::*;
pub use field::*;
pub use format::coerce_datetime;
pub use format::format_pattern;
pub use kind::*;
pub use row::*;
