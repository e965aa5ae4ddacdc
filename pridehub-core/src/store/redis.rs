use redis::{aio::ConnectionManager, cmd};

use crate::{errors::StoreError, keys::KeyContext, models::Document, store::DocumentStore};

const SCAN_COUNT: usize = 1024;

/// RedisJSON-backed document store.
///
/// Documents are held as JSON values under `prefix:collection:id` keys.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    keys: KeyContext,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            keys: KeyContext::new(prefix),
        }
    }

    /// Connect to a Redis server and wrap the connection in a store.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(url).map_err(StoreError::Redis)?;
        let conn = ConnectionManager::new(client).await.map_err(StoreError::Redis)?;
        Ok(Self::new(conn, prefix))
    }

    async fn scan_collection_keys(&mut self, collection: &str) -> Result<Vec<String>, StoreError> {
        let pattern = self.keys.collection_pattern(collection);
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next_cursor, batch): (u64, Vec<String>) = cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut self.conn)
                .await?;
            keys.extend(batch);
            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }
        Ok(keys)
    }

    async fn fetch_key<D: Document>(&mut self, key: &str) -> Result<Option<D>, StoreError> {
        let raw: Option<String> = cmd("JSON.GET").arg(key).query_async(&mut self.conn).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str::<D>(&json)?)),
            None => Ok(None),
        }
    }
}

impl DocumentStore for RedisStore {
    async fn fetch<D: Document>(&mut self, entity_id: &str) -> Result<Option<D>, StoreError> {
        let key = self.keys.entity(D::COLLECTION, entity_id);
        self.fetch_key(&key).await
    }

    async fn fetch_many<D: Document>(&mut self, entity_ids: &[String]) -> Result<Vec<D>, StoreError> {
        let mut documents = Vec::with_capacity(entity_ids.len());
        for entity_id in entity_ids {
            if let Some(document) = self.fetch::<D>(entity_id).await? {
                documents.push(document);
            } else {
                log::debug!("skipping dangling {} reference {entity_id}", D::ENTITY);
            }
        }
        Ok(documents)
    }

    async fn list<D: Document>(&mut self) -> Result<Vec<D>, StoreError> {
        let mut keys = self.scan_collection_keys(D::COLLECTION).await?;
        // SCAN order is unspecified; sort so repeated reads see one order.
        keys.sort_unstable();
        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(document) = self.fetch_key::<D>(&key).await? {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn put<D: Document>(&mut self, document: &D) -> Result<(), StoreError> {
        let key = self.keys.entity(D::COLLECTION, document.id());
        let json = serde_json::to_string(document)?;
        let _: () = cmd("JSON.SET")
            .arg(&key)
            .arg("$")
            .arg(&json)
            .query_async(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn delete<D: Document>(&mut self, entity_id: &str) -> Result<bool, StoreError> {
        let key = self.keys.entity(D::COLLECTION, entity_id);
        let removed: u64 = cmd("DEL").arg(&key).query_async(&mut self.conn).await?;
        Ok(removed > 0)
    }
}
