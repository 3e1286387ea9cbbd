//! Generic repository over one record type.

use std::marker::PhantomData;
use std::sync::Arc;

use super::base::{DeleteRepository, ReadRepository, WriteRepository};
use crate::infra::store::DocumentStore;
use domain::Record;

/// CRUD and live reads for the collection of `E`.
pub struct RecordStore<E> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> E>,
}

impl<E: Record> RecordStore<E> {
    /// Create new repository instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }
}

impl<E> Clone for RecordStore<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: Record> ReadRepository<E> for RecordStore<E> {
    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl<E: Record> WriteRepository<E> for RecordStore<E> {
    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

impl<E: Record> DeleteRepository<E> for RecordStore<E> {
    fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}
