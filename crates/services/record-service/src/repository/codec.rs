//! Conversion between records and stored document bodies.
//!
//! The identifier is the document key: it is stripped from the body on write
//! and restored from the key on read.

use serde_json::Value;

use crate::infra::store::DocumentSnapshot;
use common::AppResult;
use domain::Record;

const ID_FIELD: &str = "id";

pub fn encode<E: Record>(entity: &E) -> AppResult<Value> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(map) = &mut value {
        map.remove(ID_FIELD);
    }
    Ok(value)
}

pub fn decode<E: Record>(id: &str, data: Value) -> AppResult<E> {
    let mut entity: E = serde_json::from_value(data)?;
    entity.set_id(id.to_string());
    Ok(entity)
}

/// Decode a result set, skipping documents that do not fit the record shape
pub fn decode_snapshots<E: Record>(snapshots: Vec<DocumentSnapshot>) -> Vec<E> {
    snapshots
        .into_iter()
        .filter_map(|snapshot| match decode::<E>(&snapshot.id, snapshot.data) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(
                    collection = E::COLLECTION,
                    id = %snapshot.id,
                    error = ?e,
                    "Skipping undecodable document"
                );
                None
            }
        })
        .collect()
}
