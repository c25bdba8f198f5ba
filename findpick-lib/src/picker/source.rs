//! Record sources

use std::fmt;

use crate::model::Record;

/// The records a dialog lists.
///
/// Either a ready list or a producer that is called once when the dialog is
/// shown.
pub enum ListSource {
    /// A ready list.
    Items(Vec<Record>),
    /// Produces the list on demand.
    Producer(Box<dyn FnOnce() -> Vec<Record>>),
}

impl ListSource {
    /// Wraps a producer closure.
    pub fn from_fn(producer: impl FnOnce() -> Vec<Record> + 'static) -> Self {
        Self::Producer(Box::new(producer))
    }

    /// Returns the records, calling the producer if needed.
    pub fn resolve(self) -> Vec<Record> {
        match self {
            Self::Items(items) => items,
            Self::Producer(producer) => producer(),
        }
    }
}

impl From<Vec<Record>> for ListSource {
    fn from(items: Vec<Record>) -> Self {
        Self::Items(items)
    }
}

impl fmt::Debug for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(items) => f.debug_tuple("Items").field(&items.len()).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}
