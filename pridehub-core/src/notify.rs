//! Fire-and-forget notification dispatch.
//!
//! Dispatch happens after the mutation it describes has been persisted and is
//! never awaited by the correctness path; a lost notification is acceptable,
//! a failed mutation is not.

/// An event worth telling a user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    Followed {
        follower_id: String,
        target_id: String,
    },
    Reacted {
        actor_id: String,
        owner_id: String,
        entity: &'static str,
        entity_id: String,
        reaction: &'static str,
    },
    Commented {
        actor_id: String,
        owner_id: String,
        post_id: String,
    },
}

/// Outbound notification seam. Implementations must not block and must not
/// fail the calling operation.
pub trait Notifier: Send + Sync {
    fn dispatch(&self, event: NotifyEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn dispatch(&self, _event: NotifyEvent) {}
}

/// Logs every event; stands in for the real mail/push dispatcher during
/// development and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn dispatch(&self, event: NotifyEvent) {
        log::info!("notification dispatched: {event:?}");
    }
}
