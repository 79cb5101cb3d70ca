use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use super::{
    DeleteAck, DocumentStore, InsertAck, StoreError, UpdateAck, RESERVATIONS, USERS,
};
use crate::utils::json::bson_to_json;

/// MongoDB-backed document store
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let store = Self { db };
        store.ensure_indexes().await;

        Ok(store)
    }

    /// Lookup indexes for the email-keyed queries. Not unique: duplicate users
    /// are only prevented by the check before insert.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        for name in [USERS, RESERVATIONS] {
            let index = IndexModel::builder().keys(doc! { "email": 1 }).build();

            match self.collection(name).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}(email)", name),
                Err(e) => log::warn!("   ⚠️  Could not create index on {}(email): {}", name, e),
            }
        }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        let records: Vec<Document> = cursor.try_collect().await?;
        Ok(records)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, record: Document) -> Result<InsertAck, StoreError> {
        let result = self.collection(collection).insert_one(record).await?;
        Ok(InsertAck::new(result.inserted_id))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateAck, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;

        let mut ack = UpdateAck::new(result.matched_count, result.modified_count);
        if let Some(id) = result.upserted_id {
            ack.upserted_id = Some(bson_to_json(id));
            ack.upserted_count = 1;
        }
        Ok(ack)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteAck, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
