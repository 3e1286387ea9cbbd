//! Infrastructure layer - document store and blob store.

pub mod blob;
pub mod store;

pub use blob::{BlobStore, FsBlobStore, MemoryBlobStore};
pub use store::{DocumentStore, Filter, MemoryStore, Query};
