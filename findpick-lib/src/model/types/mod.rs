//! Domain value types carried by records

mod money;

pub use money::*;
