//! Feed assembly: fetch a collection, rank it, slice a page.
//!
//! The whole collection is pulled and sorted in memory per request, which is
//! O(n log n) and fine at community scale; revisit before the collections
//! outgrow a single fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::CoreError,
    models::{Blog, Document, Event, Post},
    store::DocumentStore,
};

pub const DEFAULT_FEED_PAGE: u64 = 1;
pub const DEFAULT_FEED_LIMIT: u64 = 10;
/// Requested limits are clamped here to bound per-request memory.
pub const MAX_FEED_LIMIT: u64 = 100;

/// Ranking policy for a feed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Descending by engagement-set size.
    #[default]
    Popular,
    /// Descending by creation timestamp.
    Recent,
}

/// Pagination/sorting parameters as they arrive from the boundary layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<SortMode>,
}

/// One page of a sorted feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

impl<T> FeedPage<T> {
    #[inline]
    pub fn has_more(&self) -> bool {
        self.page * self.limit < self.total
    }
}

/// Content that can be ranked for a feed.
pub trait Ranked {
    /// Size of the entity's relevant engagement set.
    fn popularity(&self) -> usize;

    fn posted_at(&self) -> DateTime<Utc>;
}

impl Ranked for Post {
    fn popularity(&self) -> usize {
        self.likes.len()
    }

    fn posted_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Ranked for Blog {
    fn popularity(&self) -> usize {
        self.upvotes.len()
    }

    fn posted_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Ranked for Event {
    fn popularity(&self) -> usize {
        self.attendees.len()
    }

    fn posted_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fetch a content collection, rank it, and return the requested page.
///
/// Missing page/limit fall back to defaults, zero values are lifted to 1,
/// and the limit is capped at [`MAX_FEED_LIMIT`]. Pages past the end of the
/// collection return an empty slice, not an error.
pub async fn list_feed<S, D>(store: &mut S, query: FeedQuery) -> Result<FeedPage<D>, CoreError>
where
    S: DocumentStore,
    D: Document + Ranked,
{
    let page = query.page.unwrap_or(DEFAULT_FEED_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);
    let sort = query.sort.unwrap_or_default();

    let mut items = store.list::<D>().await?;
    let total = items.len() as u64;
    rank(&mut items, sort);

    let start = (page - 1).saturating_mul(limit);
    let items = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(limit).min(total);
        items.drain(start as usize..end as usize).collect()
    };

    log::info!(
        "assembled {} feed page {page} (limit {limit}, {sort:?}): {} of {total}",
        D::COLLECTION,
        items.len()
    );
    Ok(FeedPage { items, total, page, limit })
}

/// Stable sort; entries tied under the comparator keep their storage order.
fn rank<D: Ranked>(items: &mut [D], sort: SortMode) {
    match sort {
        SortMode::Popular => items.sort_by(|a, b| b.popularity().cmp(&a.popularity())),
        SortMode::Recent => items.sort_by(|a, b| b.posted_at().cmp(&a.posted_at())),
    }
}
