//! Find dialog controller
//!
//! [`FindDialog`] collects settings and columns, [`FindSession`] holds the
//! open dialog: rows, sort direction, filter text and the pick result.

mod dialog;
mod session;
mod settings;
mod source;

pub use dialog::*;
pub use session::*;
pub use settings::*;
pub use source::*;
