//! Document database abstraction.

use async_trait::async_trait;
use serde_json::Value;

use super::listener::{DocumentSnapshot, Listener};
use super::query::Query;
use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Collections of JSON documents addressed by key.
///
/// Writes are whole-document and atomic per document. Listeners receive the
/// full ordered result set of their query, first on attach and then after
/// every change to it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a new document under a generated key and return the key
    async fn add(&self, collection: &str, data: Value) -> AppResult<String>;

    /// Create or overwrite the document at `id`
    async fn set(&self, collection: &str, id: &str, data: Value) -> AppResult<()>;

    /// Read one document body
    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    /// Remove a document. Removing a missing key succeeds.
    async fn delete(&self, collection: &str, id: &str) -> AppResult<()>;

    /// Run a query once
    async fn query(&self, query: &Query) -> AppResult<Vec<DocumentSnapshot>>;

    /// Attach a live listener to a query
    fn listen(&self, query: Query) -> Listener;
}
