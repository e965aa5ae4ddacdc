//! Bidirectional follow edges between users.
//!
//! An edge is stored redundantly: on the follower's `following` list and on
//! the target's `followers` list, written sequentially with no transaction.
//! Within one request the two lists may diverge between write one and write
//! two; a failure in that window surfaces an [`EdgeRepair`] record for the
//! external reconciliation job rather than claiming strong consistency.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{CoreError, StoreError},
    models::User,
    notify::{Notifier, NotifyEvent},
    store::DocumentStore,
};

/// Which mutation left the half-edge behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOp {
    Follow,
    Unfollow,
}

/// Record of an edge mutation whose first write was applied and whose second
/// write failed. Serialized into the reconciliation log; replaying the
/// `pending` side repairs the asymmetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRepair {
    pub op: EdgeOp,
    pub follower_id: String,
    pub target_id: String,
    /// The user document the second, unapplied write was destined for.
    pub pending: String,
}

/// Create the follow edge `follower -> target`.
///
/// Fails with [`CoreError::SelfReference`] when both ids match, with
/// [`CoreError::NotFound`] when either user is missing, and with
/// [`CoreError::AlreadyFollowing`] when the edge already exists.
pub async fn follow<S, N>(
    store: &mut S,
    notifier: &N,
    follower_id: &str,
    target_id: &str,
) -> Result<(), CoreError>
where
    S: DocumentStore,
    N: Notifier,
{
    log::info!("{follower_id} following {target_id}");
    if follower_id == target_id {
        return Err(CoreError::SelfReference);
    }

    let mut target = fetch_user(store, target_id).await?;
    let mut follower = fetch_user(store, follower_id).await?;

    if follower.following.iter().any(|id| id == target_id) {
        return Err(CoreError::AlreadyFollowing);
    }

    follower.following.push(target_id.to_string());
    store.put(&follower).await?;

    target.followers.push(follower_id.to_string());
    if let Err(source) = store.put(&target).await {
        return Err(half_applied(EdgeOp::Follow, follower_id, target_id, source));
    }

    notifier.dispatch(NotifyEvent::Followed {
        follower_id: follower_id.to_string(),
        target_id: target_id.to_string(),
    });
    Ok(())
}

/// Remove the follow edge `follower -> target`.
///
/// Fails with [`CoreError::NotFollowing`] when no edge exists.
pub async fn unfollow<S: DocumentStore>(
    store: &mut S,
    follower_id: &str,
    target_id: &str,
) -> Result<(), CoreError> {
    log::info!("{follower_id} unfollowing {target_id}");
    if follower_id == target_id {
        return Err(CoreError::SelfReference);
    }

    let mut target = fetch_user(store, target_id).await?;
    let mut follower = fetch_user(store, follower_id).await?;

    if !follower.following.iter().any(|id| id == target_id) {
        return Err(CoreError::NotFollowing);
    }

    follower.following.retain(|id| id != target_id);
    store.put(&follower).await?;

    target.followers.retain(|id| id != follower_id);
    if let Err(source) = store.put(&target).await {
        return Err(half_applied(EdgeOp::Unfollow, follower_id, target_id, source));
    }
    Ok(())
}

/// Whether the edge `follower -> target` exists, judged from the follower's
/// side of the denormalized pair.
pub async fn is_following<S: DocumentStore>(
    store: &mut S,
    follower_id: &str,
    target_id: &str,
) -> Result<bool, CoreError> {
    let follower = fetch_user(store, follower_id).await?;
    Ok(follower.following.iter().any(|id| id == target_id))
}

/// Resolve a user's follower ids to user documents. Ids that no longer
/// resolve are skipped.
pub async fn followers_of<S: DocumentStore>(store: &mut S, user_id: &str) -> Result<Vec<User>, CoreError> {
    let user = fetch_user(store, user_id).await?;
    Ok(store.fetch_many::<User>(&user.followers).await?)
}

/// Resolve the users a user is following to user documents.
pub async fn following_of<S: DocumentStore>(store: &mut S, user_id: &str) -> Result<Vec<User>, CoreError> {
    let user = fetch_user(store, user_id).await?;
    Ok(store.fetch_many::<User>(&user.following).await?)
}

async fn fetch_user<S: DocumentStore>(store: &mut S, user_id: &str) -> Result<User, CoreError> {
    store.fetch::<User>(user_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: "user",
        entity_id: user_id.to_string(),
    })
}

fn half_applied(op: EdgeOp, follower_id: &str, target_id: &str, source: StoreError) -> CoreError {
    let repair = EdgeRepair {
        op,
        follower_id: follower_id.to_string(),
        target_id: target_id.to_string(),
        pending: target_id.to_string(),
    };
    match serde_json::to_string(&repair) {
        Ok(record) => log::error!("edge write lost its second half, repair record: {record}"),
        Err(_) => log::error!("edge write lost its second half: {repair:?}"),
    }
    CoreError::PartiallyApplied { repair, source }
}
