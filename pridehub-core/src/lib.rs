//! PrideHub core library.
//!
//! The engagement, social-graph, feed, and content subsystem of the PrideHub
//! community platform: membership toggles over denormalized reaction sets,
//! bidirectional follow edges, ranked feed pagination, ownership checks, and
//! temporal event classification, all coordinated through a per-document
//! store seam.
//!
//! HTTP routing, token verification, and mail delivery live outside this
//! crate; handlers resolve an acting identity upstream and call into the
//! operations exposed here.

pub mod authz;
pub mod config;
pub mod content;
pub mod engagement;
pub mod errors;
pub mod feed;
pub mod graph;
pub mod id;
pub mod keys;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod store;
pub mod validators;

pub use authz::{Owned, assert_owner};
pub use config::CoreConfig;
pub use engagement::{Reaction, toggle_off, toggle_on};
pub use errors::{CoreError, StoreError, ValidationError, ValidationIssue};
pub use feed::{FeedPage, FeedQuery, SortMode, list_feed};
pub use graph::{EdgeOp, EdgeRepair, follow, followers_of, following_of, is_following, unfollow};
pub use models::{Blog, Comment, Document, Event, Post, PostSummary, User};
pub use notify::{LogNotifier, NoopNotifier, Notifier, NotifyEvent};
pub use schedule::{EventPhase, Schedule, classify, validate_schedule};
pub use store::{DocumentStore, MemoryStore, RedisStore};

// Re-export redis types so embedders don't need to depend on a specific
// redis version.
pub use redis;
pub use redis::aio::ConnectionManager;
