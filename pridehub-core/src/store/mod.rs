//! Document store seam.
//!
//! The core coordinates exclusively through per-document reads and writes;
//! there is no multi-document transaction. [`RedisStore`] is the production
//! implementation, [`MemoryStore`] backs tests and embedded use.

mod memory;
mod redis;

pub use memory::MemoryStore;
pub use redis::RedisStore;

use crate::{errors::StoreError, models::Document};

/// Async access to persisted documents.
///
/// `fetch_many` is the `$in`-style batched lookup used to resolve id lists
/// (e.g. follower ids) to documents; ids that no longer resolve are skipped.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn fetch<D: Document>(&mut self, entity_id: &str) -> Result<Option<D>, StoreError>;

    async fn fetch_many<D: Document>(&mut self, entity_ids: &[String]) -> Result<Vec<D>, StoreError>;

    /// Fetch the entire collection. Feed assembly sorts and slices in memory,
    /// so reads pull everything; acceptable at the scale of the domain.
    async fn list<D: Document>(&mut self) -> Result<Vec<D>, StoreError>;

    /// Write a document, replacing any previous value under the same id.
    /// Atomic per document only.
    async fn put<D: Document>(&mut self, document: &D) -> Result<(), StoreError>;

    /// Delete a document. Returns `false` if no document existed.
    async fn delete<D: Document>(&mut self, entity_id: &str) -> Result<bool, StoreError>;
}
