#![allow(dead_code)]

pub(crate) use std::sync::Mutex;

pub(crate) use chrono::{DateTime, Duration, Utc};
pub(crate) use pridehub_core::{
    Blog, Comment, CoreError, DocumentStore, Event, MemoryStore, NoopNotifier, Notifier, NotifyEvent, Post,
    StoreError, User,
};

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn store() -> MemoryStore {
    init_logging();
    MemoryStore::new("hub_test")
}

pub(crate) fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        username: id.to_lowercase(),
        email: format!("{id}@example.com"),
        password_hash: "argon2id$stub".to_string(),
        is_email_verified: true,
        gender: "nonbinary".to_string(),
        country: String::new(),
        dob: None,
        bio: String::new(),
        profile_image_url: String::new(),
        cover_image_url: String::new(),
        followers: Vec::new(),
        following: Vec::new(),
        posts: Vec::new(),
        is_private: false,
        created_at: Utc::now(),
    }
}

pub(crate) fn post(id: &str, author_id: &str, created_at: DateTime<Utc>) -> Post {
    Post {
        id: id.to_string(),
        author_id: author_id.to_string(),
        text: format!("post {id}"),
        image_url: None,
        likes: Vec::new(),
        comments: Vec::new(),
        created_at,
    }
}

pub(crate) fn comment(id: &str, post_id: &str, author_id: &str) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: post_id.to_string(),
        author_id: author_id.to_string(),
        text: format!("comment {id}"),
        likes: Vec::new(),
        dislikes: Vec::new(),
        created_at: Utc::now(),
    }
}

pub(crate) fn blog(id: &str, author_id: &str, created_at: DateTime<Utc>) -> Blog {
    Blog {
        id: id.to_string(),
        author_id: author_id.to_string(),
        title: format!("Blog {id} title"),
        content: "Long enough content.".to_string(),
        image_url: None,
        upvotes: Vec::new(),
        downvotes: Vec::new(),
        created_at,
    }
}

pub(crate) fn event(id: &str, creator_id: &str, schedule: (&str, &str, &str, &str)) -> Event {
    Event {
        id: id.to_string(),
        creator_id: creator_id.to_string(),
        title: format!("Event {id}"),
        description: "A gathering.".to_string(),
        is_online: false,
        location: "Community center".to_string(),
        meeting_url: None,
        image_url: None,
        start_date: schedule.0.to_string(),
        start_time: schedule.1.to_string(),
        end_date: schedule.2.to_string(),
        end_time: schedule.3.to_string(),
        attendees: Vec::new(),
        created_at: Utc::now(),
    }
}

pub(crate) async fn seed<D: pridehub_core::Document>(store: &mut MemoryStore, document: &D) {
    store.put(document).await.expect("seed document");
}

/// Captures dispatched notifications for assertions.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingNotifier {
    pub(crate) fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn dispatch(&self, event: NotifyEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Delegates to a [`MemoryStore`] but fails every `put` after the first
/// `writes_before_failure` have succeeded. Used to exercise the partial-write
/// path of multi-document sequences.
pub(crate) struct FlakyStore {
    pub(crate) inner: MemoryStore,
    writes_before_failure: usize,
    writes: usize,
}

impl FlakyStore {
    pub(crate) fn failing_after(inner: MemoryStore, writes_before_failure: usize) -> Self {
        Self {
            inner,
            writes_before_failure,
            writes: 0,
        }
    }
}

impl DocumentStore for FlakyStore {
    async fn fetch<D: pridehub_core::Document>(&mut self, entity_id: &str) -> Result<Option<D>, StoreError> {
        self.inner.fetch(entity_id).await
    }

    async fn fetch_many<D: pridehub_core::Document>(&mut self, entity_ids: &[String]) -> Result<Vec<D>, StoreError> {
        self.inner.fetch_many(entity_ids).await
    }

    async fn list<D: pridehub_core::Document>(&mut self) -> Result<Vec<D>, StoreError> {
        self.inner.list().await
    }

    async fn put<D: pridehub_core::Document>(&mut self, document: &D) -> Result<(), StoreError> {
        if self.writes >= self.writes_before_failure {
            return Err(StoreError::Unavailable {
                message: "injected write failure".to_string(),
            });
        }
        self.writes += 1;
        self.inner.put(document).await
    }

    async fn delete<D: pridehub_core::Document>(&mut self, entity_id: &str) -> Result<bool, StoreError> {
        self.inner.delete::<D>(entity_id).await
    }
}
