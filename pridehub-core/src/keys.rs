/// Common key-construction helpers for stored documents.
#[derive(Debug, Clone)]
pub struct KeyContext {
    prefix: String,
}

impl KeyContext {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn entity(&self, collection: &str, entity_id: &str) -> String {
        format!("{}:{}:{}", self.prefix, collection, entity_id)
    }

    /// SCAN pattern matching every document in a collection.
    pub fn collection_pattern(&self, collection: &str) -> String {
        format!("{}:{}:*", self.prefix, collection)
    }
}
