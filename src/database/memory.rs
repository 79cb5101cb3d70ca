use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{DeleteAck, DocumentStore, InsertAck, StoreError, UpdateAck};

/// Process-local document store with the same semantics as [`super::MongoStore`]
/// for equality filters. Backs the test suite.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn matches(record: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches(record, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|record| matches(record, &filter)))
            .cloned())
    }

    async fn insert_one(&self, collection: &str, record: Document) -> Result<InsertAck, StoreError> {
        let mut stored = Document::new();
        let id = match record.get("_id") {
            Some(id) => id.clone(),
            None => ObjectId::new().into(),
        };
        stored.insert("_id", id.clone());
        for (key, value) in record {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored);

        Ok(InsertAck::new(id))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(record) = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|record| matches(record, &filter)))
        else {
            return Ok(UpdateAck::new(0, 0));
        };

        let mut modified = false;
        for (key, value) in fields {
            if record.get(&key) != Some(&value) {
                record.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateAck::new(1, u64::from(modified)))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let position = collections
            .get(collection)
            .and_then(|records| records.iter().position(|record| matches(record, &filter)));

        match (position, collections.get_mut(collection)) {
            (Some(index), Some(records)) => {
                records.remove(index);
                Ok(DeleteAck::new(1))
            }
            _ => Ok(DeleteAck::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
