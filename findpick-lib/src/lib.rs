//! Find/pick dialog core
//!
//! Turns a list of raw records into searchable, sortable, displayable rows
//! for a picker widget:
//!
//! - [`schema`]: column definitions, formatting and the single-sorted-column
//!   rule
//! - [`instance`]: columns and rows bound to one record
//! - [`picker`]: the open dialog (sorting, filtering, picking)
//! - [`config`]: JSON dialog descriptions
//!
//! Rendering, localization lookup and the modal lifecycle belong to the host.

pub mod config;
pub mod error;
pub mod instance;
pub mod model;
pub mod picker;
pub mod schema;

pub use error::FindError;
pub use error::FindResult;
