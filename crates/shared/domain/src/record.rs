//! Persistable record contract.
//!
//! Every entity stored in the document database implements [`Record`]. The
//! generic repository uses it to find the entity's collection, its default
//! ordering and the hooks that assign repository-owned fields (timestamps and
//! derived values) before a write.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// An entity stored as one document in one collection.
///
/// The identifier is never part of the stored body: it is the document key,
/// written back into the entity after every read and create.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Logical collection holding this entity
    const COLLECTION: &'static str;

    /// Field used to order live subscriptions when the caller gives none
    const DEFAULT_ORDER: Option<&'static str> = None;

    /// Document key (empty until persisted)
    fn id(&self) -> &str;

    /// Overwrite the identifier with the document key
    fn set_id(&mut self, id: String);

    /// Assign repository-owned fields before the first write.
    fn on_create(&mut self, _now: DateTime<Utc>) {}

    /// Assign repository-owned fields before an overwrite.
    fn on_update(&mut self, _now: DateTime<Utc>) {}
}

/// Implement the identifier accessors for a struct with an `id: String` field.
macro_rules! record_id {
    () => {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    };
}
