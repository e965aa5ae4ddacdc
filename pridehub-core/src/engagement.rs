//! Engagement ledger: membership toggles over per-entity reaction sets.
//!
//! Each toggle is a single-document read-modify-write. Two concurrent toggles
//! against the same entity can therefore lose one update; the store offers no
//! cross-request serialization and the ledger does not pretend otherwise.

use crate::{
    authz::Owned,
    errors::CoreError,
    models::{Blog, Comment, Document, Event, Post},
    notify::{Notifier, NotifyEvent},
    store::DocumentStore,
};

/// A reaction an actor can hold on an entity.
///
/// Comment like/dislike and blog upvote/downvote are mutually exclusive
/// pairs: switching sides silently drops the opposing membership. Post likes
/// and event attendance have no opposing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction<'a> {
    PostLike(&'a str),
    CommentLike(&'a str),
    CommentDislike(&'a str),
    BlogUpvote(&'a str),
    BlogDownvote(&'a str),
    EventAttendance(&'a str),
}

impl Reaction<'_> {
    /// Reaction name used in logs and notifications.
    pub fn kind(self) -> &'static str {
        match self {
            Reaction::PostLike(_) | Reaction::CommentLike(_) => "like",
            Reaction::CommentDislike(_) => "dislike",
            Reaction::BlogUpvote(_) => "upvote",
            Reaction::BlogDownvote(_) => "downvote",
            Reaction::EventAttendance(_) => "attendance",
        }
    }

    fn entity_kind(self) -> &'static str {
        match self {
            Reaction::PostLike(_) => "post",
            Reaction::CommentLike(_) | Reaction::CommentDislike(_) => "comment",
            Reaction::BlogUpvote(_) | Reaction::BlogDownvote(_) => "blog",
            Reaction::EventAttendance(_) => "event",
        }
    }
}

/// The target set of a toggle, plus its opposing set when the reaction is one
/// half of a mutually-exclusive pair.
struct Sets<'d> {
    set: &'d mut Vec<String>,
    opposing: Option<&'d mut Vec<String>>,
    label: &'static str,
}

fn post_likes(post: &mut Post) -> Sets<'_> {
    Sets {
        set: &mut post.likes,
        opposing: None,
        label: "likes",
    }
}

fn comment_likes(comment: &mut Comment) -> Sets<'_> {
    Sets {
        set: &mut comment.likes,
        opposing: Some(&mut comment.dislikes),
        label: "likes",
    }
}

fn comment_dislikes(comment: &mut Comment) -> Sets<'_> {
    Sets {
        set: &mut comment.dislikes,
        opposing: Some(&mut comment.likes),
        label: "dislikes",
    }
}

fn blog_upvotes(blog: &mut Blog) -> Sets<'_> {
    Sets {
        set: &mut blog.upvotes,
        opposing: Some(&mut blog.downvotes),
        label: "upvotes",
    }
}

fn blog_downvotes(blog: &mut Blog) -> Sets<'_> {
    Sets {
        set: &mut blog.downvotes,
        opposing: Some(&mut blog.upvotes),
        label: "downvotes",
    }
}

fn event_attendees(event: &mut Event) -> Sets<'_> {
    Sets {
        set: &mut event.attendees,
        opposing: None,
        label: "attendees",
    }
}

/// Add the actor to the reaction's set. Returns the new set cardinality.
///
/// Fails with [`CoreError::AlreadyInState`] when the actor already holds the
/// reaction; an opposing membership is removed, not an error.
pub async fn toggle_on<S, N>(
    store: &mut S,
    notifier: &N,
    reaction: Reaction<'_>,
    actor_id: &str,
) -> Result<u64, CoreError>
where
    S: DocumentStore,
    N: Notifier,
{
    log::info!("{actor_id} toggling {} on {}", reaction.kind(), reaction.entity_kind());
    let (owner_id, count) = match reaction {
        Reaction::PostLike(id) => apply_on::<S, Post>(store, id, actor_id, post_likes).await?,
        Reaction::CommentLike(id) => apply_on::<S, Comment>(store, id, actor_id, comment_likes).await?,
        Reaction::CommentDislike(id) => apply_on::<S, Comment>(store, id, actor_id, comment_dislikes).await?,
        Reaction::BlogUpvote(id) => apply_on::<S, Blog>(store, id, actor_id, blog_upvotes).await?,
        Reaction::BlogDownvote(id) => apply_on::<S, Blog>(store, id, actor_id, blog_downvotes).await?,
        Reaction::EventAttendance(id) => apply_on::<S, Event>(store, id, actor_id, event_attendees).await?,
    };

    if owner_id != actor_id {
        notifier.dispatch(NotifyEvent::Reacted {
            actor_id: actor_id.to_string(),
            owner_id,
            entity: reaction.entity_kind(),
            entity_id: reaction_target(reaction).to_string(),
            reaction: reaction.kind(),
        });
    }
    Ok(count)
}

/// Remove the actor from the reaction's set. Returns the new set cardinality.
///
/// Fails with [`CoreError::NotInState`] when the actor holds no such
/// reaction. The opposing set is untouched.
pub async fn toggle_off<S: DocumentStore>(
    store: &mut S,
    reaction: Reaction<'_>,
    actor_id: &str,
) -> Result<u64, CoreError> {
    log::info!("{actor_id} toggling {} off {}", reaction.kind(), reaction.entity_kind());
    match reaction {
        Reaction::PostLike(id) => apply_off::<S, Post>(store, id, actor_id, post_likes).await,
        Reaction::CommentLike(id) => apply_off::<S, Comment>(store, id, actor_id, comment_likes).await,
        Reaction::CommentDislike(id) => apply_off::<S, Comment>(store, id, actor_id, comment_dislikes).await,
        Reaction::BlogUpvote(id) => apply_off::<S, Blog>(store, id, actor_id, blog_upvotes).await,
        Reaction::BlogDownvote(id) => apply_off::<S, Blog>(store, id, actor_id, blog_downvotes).await,
        Reaction::EventAttendance(id) => apply_off::<S, Event>(store, id, actor_id, event_attendees).await,
    }
}

fn reaction_target(reaction: Reaction<'_>) -> &str {
    match reaction {
        Reaction::PostLike(id)
        | Reaction::CommentLike(id)
        | Reaction::CommentDislike(id)
        | Reaction::BlogUpvote(id)
        | Reaction::BlogDownvote(id)
        | Reaction::EventAttendance(id) => id,
    }
}

async fn apply_on<S, D>(
    store: &mut S,
    entity_id: &str,
    actor_id: &str,
    select: fn(&mut D) -> Sets<'_>,
) -> Result<(String, u64), CoreError>
where
    S: DocumentStore,
    D: Document + Owned,
{
    let mut document = store.fetch::<D>(entity_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: D::ENTITY,
        entity_id: entity_id.to_string(),
    })?;

    let count = {
        let sets = select(&mut document);
        if sets.set.iter().any(|id| id == actor_id) {
            return Err(CoreError::AlreadyInState { set: sets.label });
        }
        if let Some(opposing) = sets.opposing
            && opposing.iter().any(|id| id == actor_id)
        {
            log::info!("removing opposing membership of {actor_id} before adding to {}", sets.label);
            opposing.retain(|id| id != actor_id);
        }
        sets.set.push(actor_id.to_string());
        sets.set.len() as u64
    };

    store.put(&document).await?;
    Ok((document.owner_id().to_string(), count))
}

async fn apply_off<S, D>(
    store: &mut S,
    entity_id: &str,
    actor_id: &str,
    select: fn(&mut D) -> Sets<'_>,
) -> Result<u64, CoreError>
where
    S: DocumentStore,
    D: Document,
{
    let mut document = store.fetch::<D>(entity_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: D::ENTITY,
        entity_id: entity_id.to_string(),
    })?;

    let count = {
        let sets = select(&mut document);
        if !sets.set.iter().any(|id| id == actor_id) {
            return Err(CoreError::NotInState { set: sets.label });
        }
        sets.set.retain(|id| id != actor_id);
        sets.set.len() as u64
    };

    store.put(&document).await?;
    Ok(count)
}
