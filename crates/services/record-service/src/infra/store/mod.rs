//! Document store: the seam, its query model and the in-process engine.

mod document_store;
mod listener;
mod memory;
mod query;

pub use document_store::DocumentStore;
#[cfg(any(test, feature = "test-utils"))]
pub use document_store::MockDocumentStore;
pub use listener::{DocumentSnapshot, Listener, ListenerRegistration, SnapshotEvent};
pub use memory::MemoryStore;
pub use query::{compare_values, Filter, Query};
