//! Single-operation CRUD over any [`RecordKind`] collection.

use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::database::{DeleteAck, DocumentStore, InsertAck, UpdateAck};
use crate::models::RecordKind;
use crate::utils::{document_from_json, parse_object_id, AppError};

pub async fn list<R: RecordKind>(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
    Ok(store.find(R::COLLECTION, doc! {}).await?)
}

pub async fn get<R: RecordKind>(store: &dyn DocumentStore, id: &str) -> Result<Document, AppError> {
    let oid = parse_object_id(id)?;
    let filter = doc! { "_id": oid };

    store
        .find_one(R::COLLECTION, filter)
        .await?
        .ok_or(AppError::NotFound(R::LABEL))
}

pub async fn create<R: RecordKind>(
    store: &dyn DocumentStore,
    payload: Value,
) -> Result<InsertAck, AppError> {
    let record = document_from_json(payload)?;
    Ok(store.insert_one(R::COLLECTION, record).await?)
}

/// Merges the payload's fields into the record. Fields absent from the payload
/// keep their stored values.
pub async fn update<R: RecordKind>(
    store: &dyn DocumentStore,
    id: &str,
    payload: Value,
) -> Result<UpdateAck, AppError> {
    let fields = document_from_json(payload)?;
    set_fields::<R>(store, id, fields).await
}

/// `NotFound` unless a record was actually modified: an unknown id and a patch
/// that changes nothing both answer 404.
pub async fn set_fields<R: RecordKind>(
    store: &dyn DocumentStore,
    id: &str,
    fields: Document,
) -> Result<UpdateAck, AppError> {
    if fields.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".into()));
    }
    let oid = parse_object_id(id)?;
    let filter = doc! { "_id": oid };

    let ack = store.update_one(R::COLLECTION, filter, fields).await?;
    if ack.modified_count == 0 {
        return Err(AppError::NotFound(R::LABEL));
    }
    Ok(ack)
}

/// Idempotent: deleting an unknown id is still acknowledged.
pub async fn delete<R: RecordKind>(store: &dyn DocumentStore, id: &str) -> Result<DeleteAck, AppError> {
    let oid = parse_object_id(id)?;
    let filter = doc! { "_id": oid };
    Ok(store.delete_one(R::COLLECTION, filter).await?)
}
