//! Base repository traits following Interface Segregation Principle (ISP).
//!
//! These traits provide the generic record operations over a
//! [`DocumentStore`]; a repository composes the ones it needs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::codec::{decode, decode_snapshots, encode};
use super::subscription::Subscription;
use crate::infra::store::{DocumentStore, Filter, Query};
use common::{AppError, AppResult, OptionExt};
use domain::Record;

/// Build the query for a scope, falling back to the record's default ordering
pub fn scoped_query<E: Record>(filters: Vec<Filter>, order_by: Option<&str>) -> Query {
    let query = Query::collection(E::COLLECTION).filters(filters);
    match order_by.or(E::DEFAULT_ORDER) {
        Some(field) => query.order_by(field),
        None => query,
    }
}

fn entity_name<E: Record>() -> &'static str {
    std::any::type_name::<E>()
        .rsplit("::")
        .next()
        .unwrap_or(E::COLLECTION)
}

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository<E: Record>: Send + Sync {
    /// Get document store reference
    fn store(&self) -> &Arc<dyn DocumentStore>;

    /// Find one record by key; a missing key is `NotFound`
    async fn get_one(&self, id: &str) -> AppResult<E> {
        let data = self
            .store()
            .get(E::COLLECTION, id)
            .await?
            .ok_or_not_found(entity_name::<E>())?;
        decode(id, data)
    }

    /// Open a live subscription over the records matching `filters`
    fn subscribe(&self, filters: Vec<Filter>, order_by: Option<&str>) -> Subscription<E> {
        Subscription::new(self.store().listen(scoped_query::<E>(filters, order_by)))
    }

    /// Read the records matching `filters` once
    async fn fetch(&self, filters: Vec<Filter>, order_by: Option<&str>) -> AppResult<Vec<E>> {
        let query = scoped_query::<E>(filters, order_by);
        let snapshots = self.store().query(&query).await?;
        Ok(decode_snapshots(snapshots))
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository<E: Record>: Send + Sync {
    /// Get document store reference
    fn store(&self) -> &Arc<dyn DocumentStore>;

    /// Insert under a generated key and return the key
    async fn create(&self, mut entity: E) -> AppResult<String> {
        entity.on_create(Utc::now());
        let id = self.store().add(E::COLLECTION, encode(&entity)?).await?;
        tracing::debug!(collection = E::COLLECTION, id = %id, "Record created");
        Ok(id)
    }

    /// Insert (or replace) at a chosen key and return the stored record
    async fn create_with_id(&self, id: &str, mut entity: E) -> AppResult<E> {
        if id.is_empty() {
            return Err(AppError::validation("Record id must not be empty"));
        }
        entity.on_create(Utc::now());
        self.store().set(E::COLLECTION, id, encode(&entity)?).await?;
        entity.set_id(id.to_string());
        tracing::debug!(collection = E::COLLECTION, id, "Record written");
        Ok(entity)
    }

    /// Overwrite the whole record at its key. A missing key is created.
    async fn update(&self, mut entity: E) -> AppResult<()> {
        if entity.id().is_empty() {
            return Err(AppError::validation("Cannot update a record without an id"));
        }
        entity.on_update(Utc::now());
        self.store()
            .set(E::COLLECTION, entity.id(), encode(&entity)?)
            .await?;
        tracing::debug!(collection = E::COLLECTION, id = entity.id(), "Record updated");
        Ok(())
    }
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository<E: Record>: Send + Sync {
    /// Get document store reference
    fn store(&self) -> &Arc<dyn DocumentStore>;

    /// Remove by key; deleting a missing key succeeds
    async fn delete(&self, id: &str) -> AppResult<()> {
        self.store().delete(E::COLLECTION, id).await
    }
}

/// Full CRUD repository - Combines all operations
/// Follows Open/Closed Principle: extend by implementing individual traits
pub trait CrudRepository<E: Record>:
    ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>
{
}

// Auto-implement CrudRepository for types implementing all traits
impl<T, E> CrudRepository<E> for T
where
    T: ReadRepository<E> + WriteRepository<E> + DeleteRepository<E>,
    E: Record,
{
}
