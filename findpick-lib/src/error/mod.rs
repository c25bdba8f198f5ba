//! Error types

mod find;

pub use find::*;
