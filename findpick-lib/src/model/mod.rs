//! Raw record model

mod record;
mod record_serde;
pub mod types;
mod value;

pub use record::*;
pub use record_serde::records_from_json;
pub use value::*;
