//! Persisted documents for the community platform.
//!
//! Engagement sets (`likes`, `dislikes`, `upvotes`, `downvotes`, `followers`,
//! `following`, `attendees`) are stored as plain arrays of user ids; membership
//! semantics (no duplicates) are enforced by the operations that mutate them,
//! not by the storage layer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Trait implemented by every persisted document.
///
/// Provides the collection name used for key generation and access to the
/// document id, mirroring what collection-level operations need.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// The collection this document is stored under.
    const COLLECTION: &'static str;

    /// Human-readable entity name used in error reporting.
    const ENTITY: &'static str;

    /// Get the id of this document instance.
    fn id(&self) -> &str;
}

/// A member of the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Opaque credential digest; hashing policy lives outside the core.
    pub password_hash: String,
    #[serde(default)]
    pub is_email_verified: bool,
    pub gender: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub cover_image_url: String,
    /// Ids of users following this user. One half of the bidirectional edge;
    /// the other half lives on each follower's `following` list.
    #[serde(default)]
    pub followers: Vec<String>,
    /// Ids of users this user follows.
    #[serde(default)]
    pub following: Vec<String>,
    /// Denormalized snapshots of this user's posts, newest appended last.
    #[serde(default)]
    pub posts: Vec<PostSummary>,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

impl Document for User {
    const COLLECTION: &'static str = "users";
    const ENTITY: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Denormalized snapshot of a post, embedded in its author's document.
///
/// The snapshot is taken at creation time and is not refreshed when the post's
/// engagement sets change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: String,
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A short-form post on the main feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Ids of users who liked this post.
    #[serde(default)]
    pub likes: Vec<String>,
    /// Ids of comments on this post, oldest first.
    #[serde(default)]
    pub comments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for Post {
    const COLLECTION: &'static str = "posts";
    const ENTITY: &'static str = "post";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A comment on a post.
///
/// A user id is never present in both `likes` and `dislikes` at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for Comment {
    const COLLECTION: &'static str = "comments";
    const ENTITY: &'static str = "comment";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A long-form article.
///
/// A user id is never present in both `upvotes` and `downvotes` at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub upvotes: Vec<String>,
    #[serde(default)]
    pub downvotes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for Blog {
    const COLLECTION: &'static str = "blogs";
    const ENTITY: &'static str = "blog";

    fn id(&self) -> &str {
        &self.id
    }
}

/// A community event, online or in person.
///
/// Start and end are stored as separate canonical strings (`YYYY-MM-DD` dates,
/// 24-hour `HH:MM` times), not as combined timestamps. The schedule module
/// parses and compares them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub description: String,
    pub is_online: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// Ids of users registered to attend.
    #[serde(default)]
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document for Event {
    const COLLECTION: &'static str = "events";
    const ENTITY: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }
}
