//! Schema bound to data
//!
//! Instances are created by
//! [`RowDefinition::make_row_instance`](crate::schema::RowDefinition::make_row_instance)
//! and never change their field set afterwards.

mod field;
mod row;

pub use field::*;
pub use row::*;
