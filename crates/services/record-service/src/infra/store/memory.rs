//! In-process document store with live listeners.
//!
//! Backs the CLI and the test suites. Each collection is a key-ordered map of
//! JSON bodies; every write re-evaluates the listeners on that collection and
//! pushes the new result set to those whose result changed.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use super::document_store::DocumentStore;
use super::listener::{DocumentSnapshot, Listener, ListenerRegistration, SnapshotEvent};
use super::query::Query;
use common::AppResult;

struct ListenerSlot {
    query: Query,
    sender: mpsc::UnboundedSender<SnapshotEvent>,
    last: Vec<DocumentSnapshot>,
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, BTreeMap<String, Value>>,
    listeners: HashMap<u64, ListenerSlot>,
    next_listener_id: u64,
}

impl StoreState {
    fn evaluate(&self, query: &Query) -> Vec<DocumentSnapshot> {
        let Some(documents) = self.collections.get(&query.collection) else {
            return Vec::new();
        };

        let mut matched: Vec<DocumentSnapshot> = documents
            .iter()
            .filter(|(_, data)| query.matches(data))
            .map(|(id, data)| DocumentSnapshot::new(id.clone(), data.clone()))
            .collect();
        // Stable: ties keep key order
        matched.sort_by(|a, b| query.compare(&a.data, &b.data));
        matched
    }

    fn notify(&mut self, collection: &str) {
        let ids: Vec<u64> = self
            .listeners
            .iter()
            .filter(|(_, slot)| slot.query.collection == collection)
            .map(|(id, _)| *id)
            .collect();

        let mut closed = Vec::new();
        for id in ids {
            let Some(query) = self.listeners.get(&id).map(|slot| slot.query.clone()) else {
                continue;
            };
            let snapshot = self.evaluate(&query);
            let Some(slot) = self.listeners.get_mut(&id) else {
                continue;
            };
            if slot.last == snapshot {
                continue;
            }
            if slot.sender.send(Ok(snapshot.clone())).is_err() {
                closed.push(id);
            } else {
                slot.last = snapshot;
            }
        }

        for id in closed {
            self.listeners.remove(&id);
            debug!(listener = id, "Dropped listener with closed receiver");
        }
    }
}

/// Shared handle to an in-memory document database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of attached listeners across all collections
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Number of documents in a collection
    pub fn document_count(&self, collection: &str) -> usize {
        self.lock()
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn write(&self, collection: &str, id: String, data: Value) {
        let mut state = self.lock();
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, data);
        state.notify(collection);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, collection: &str, data: Value) -> AppResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        self.write(collection, id.clone(), data);
        debug!(collection, id = %id, "Document added");
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> AppResult<()> {
        self.write(collection, id.to_string(), data);
        debug!(collection, id, "Document written");
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        Ok(self
            .lock()
            .collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut state = self.lock();
        let removed = state
            .collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some();
        if removed {
            state.notify(collection);
        }
        debug!(collection, id, removed, "Document deleted");
        Ok(())
    }

    async fn query(&self, query: &Query) -> AppResult<Vec<DocumentSnapshot>> {
        Ok(self.lock().evaluate(query))
    }

    fn listen(&self, query: Query) -> Listener {
        let (sender, events) = mpsc::unbounded_channel();
        let mut state = self.lock();

        let id = state.next_listener_id;
        state.next_listener_id += 1;

        let initial = state.evaluate(&query);
        // The receiver is alive here, so the first snapshot cannot be lost
        let _ = sender.send(Ok(initial.clone()));
        debug!(listener = id, collection = %query.collection, "Listener attached");
        state.listeners.insert(
            id,
            ListenerSlot {
                query,
                sender,
                last: initial,
            },
        );
        drop(state);

        let weak = Arc::downgrade(&self.state);
        let registration = ListenerRegistration::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                if state.listeners.remove(&id).is_some() {
                    debug!(listener = id, "Listener detached");
                }
            }
        });

        Listener::new(events, registration)
    }
}
