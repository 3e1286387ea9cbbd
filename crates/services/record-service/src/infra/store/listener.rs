//! Live query listeners and their registrations.

use serde_json::Value;
use tokio::sync::mpsc;

use common::AppResult;

/// One document as returned by a query: its key and its stored body.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub id: String,
    pub data: Value,
}

impl DocumentSnapshot {
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Full ordered result set of a listened query, or the listener's failure.
pub type SnapshotEvent = AppResult<Vec<DocumentSnapshot>>;

/// Handle that detaches a listener from its store.
///
/// Removal runs at most once; later calls and the drop are no-ops.
pub struct ListenerRegistration {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerRegistration {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    pub fn remove(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    pub fn is_active(&self) -> bool {
        self.detach.is_some()
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("active", &self.is_active())
            .finish()
    }
}

/// An attached listener: the event channel plus the handle that detaches it.
#[derive(Debug)]
pub struct Listener {
    events: mpsc::UnboundedReceiver<SnapshotEvent>,
    registration: ListenerRegistration,
}

impl Listener {
    pub fn new(
        events: mpsc::UnboundedReceiver<SnapshotEvent>,
        registration: ListenerRegistration,
    ) -> Self {
        Self {
            events,
            registration,
        }
    }

    pub fn into_parts(self) -> (mpsc::UnboundedReceiver<SnapshotEvent>, ListenerRegistration) {
        (self.events, self.registration)
    }
}
