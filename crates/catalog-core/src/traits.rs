//! Core traits shared by the store, cache and service layers.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An entity persisted by the authoritative store.
///
/// The id is `None` until the store assigns one on first save.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type.
    type Id: Copy + Eq + Ord + Hash + Debug + Display + From<i64> + Into<i64> + Send + Sync + 'static;

    /// Resource name used in not-found errors and logs.
    const RESOURCE_TYPE: &'static str;

    /// Returns the entity's identifier, if it has been persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Sets the identifier after the store assigns one.
    fn assign_id(&mut self, id: Self::Id);
}
