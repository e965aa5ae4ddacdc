use chrono::Utc;

use crate::{
    authz::assert_owner,
    errors::{CoreError, ValidationError},
    id::generate_entity_id,
    models::{Comment, Document, Post},
    notify::{Notifier, NotifyEvent},
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct NewComment {
    pub text: String,
}

/// Comment on a post and append the comment id to the post's `comments`
/// list. Notifies the post owner unless they commented themselves.
pub async fn create_comment<S, N>(
    store: &mut S,
    notifier: &N,
    author_id: &str,
    post_id: &str,
    new_comment: NewComment,
) -> Result<Comment, CoreError>
where
    S: DocumentStore,
    N: Notifier,
{
    log::info!("{author_id} commenting on post {post_id}");
    if new_comment.text.trim().is_empty() {
        return Err(ValidationError::single("text", "validation.required", "text is required").into());
    }

    let mut post = fetch_post(store, post_id).await?;

    let comment = Comment {
        id: generate_entity_id(),
        post_id: post_id.to_string(),
        author_id: author_id.to_string(),
        text: new_comment.text,
        likes: Vec::new(),
        dislikes: Vec::new(),
        created_at: Utc::now(),
    };
    store.put(&comment).await?;

    post.comments.push(comment.id.clone());
    store.put(&post).await?;

    if post.author_id != author_id {
        notifier.dispatch(NotifyEvent::Commented {
            actor_id: author_id.to_string(),
            owner_id: post.author_id.clone(),
            post_id: post_id.to_string(),
        });
    }
    log::info!("comment {} created on post {post_id}", comment.id);
    Ok(comment)
}

/// Delete a comment. Owner-only. Removes the comment id from the parent
/// post's `comments` list before dropping the comment document.
pub async fn delete_comment<S: DocumentStore>(
    store: &mut S,
    actor_id: &str,
    comment_id: &str,
) -> Result<(), CoreError> {
    log::info!("{actor_id} deleting comment {comment_id}");
    let comment = store
        .fetch::<Comment>(comment_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: Comment::ENTITY,
            entity_id: comment_id.to_string(),
        })?;
    assert_owner(actor_id, &comment)?;

    let mut post = fetch_post(store, &comment.post_id).await?;
    post.comments.retain(|id| id != comment_id);
    store.put(&post).await?;

    store.delete::<Comment>(comment_id).await?;
    log::info!("comment {comment_id} deleted");
    Ok(())
}

/// All comments on a post, oldest first.
pub async fn comments_of_post<S: DocumentStore>(store: &mut S, post_id: &str) -> Result<Vec<Comment>, CoreError> {
    // Existence check first so a missing post is not an empty list.
    fetch_post(store, post_id).await?;
    let mut comments: Vec<Comment> = store
        .list::<Comment>()
        .await?
        .into_iter()
        .filter(|comment| comment.post_id == post_id)
        .collect();
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    Ok(comments)
}

async fn fetch_post<S: DocumentStore>(store: &mut S, post_id: &str) -> Result<Post, CoreError> {
    store.fetch::<Post>(post_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: Post::ENTITY,
        entity_id: post_id.to_string(),
    })
}
