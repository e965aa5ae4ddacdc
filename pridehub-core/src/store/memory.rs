use std::collections::BTreeMap;

use serde_json::Value;

use crate::{errors::StoreError, keys::KeyContext, models::Document, store::DocumentStore};

/// In-process document store with the same per-document atomicity model as
/// [`super::RedisStore`]. Collections iterate in key order, which keeps
/// repeated reads stable.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    keys: KeyContext,
    documents: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            keys: KeyContext::new(prefix),
            documents: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("hub")
    }
}

impl DocumentStore for MemoryStore {
    async fn fetch<D: Document>(&mut self, entity_id: &str) -> Result<Option<D>, StoreError> {
        let key = self.keys.entity(D::COLLECTION, entity_id);
        match self.documents.get(&key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn fetch_many<D: Document>(&mut self, entity_ids: &[String]) -> Result<Vec<D>, StoreError> {
        let mut documents = Vec::with_capacity(entity_ids.len());
        for entity_id in entity_ids {
            if let Some(document) = self.fetch::<D>(entity_id).await? {
                documents.push(document);
            }
        }
        Ok(documents)
    }

    async fn list<D: Document>(&mut self) -> Result<Vec<D>, StoreError> {
        let pattern = self.keys.collection_pattern(D::COLLECTION);
        let prefix = pattern.trim_end_matches('*');
        let mut documents = Vec::new();
        for (key, value) in self.documents.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            documents.push(serde_json::from_value(value.clone())?);
        }
        Ok(documents)
    }

    async fn put<D: Document>(&mut self, document: &D) -> Result<(), StoreError> {
        let key = self.keys.entity(D::COLLECTION, document.id());
        let value = serde_json::to_value(document)?;
        self.documents.insert(key, value);
        Ok(())
    }

    async fn delete<D: Document>(&mut self, entity_id: &str) -> Result<bool, StoreError> {
        let key = self.keys.entity(D::COLLECTION, entity_id);
        Ok(self.documents.remove(&key).is_some())
    }
}
