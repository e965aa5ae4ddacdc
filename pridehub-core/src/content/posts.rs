use chrono::Utc;

use crate::{
    authz::assert_owner,
    errors::{CoreError, ValidationError},
    id::generate_entity_id,
    models::{Comment, Document, Post, PostSummary, User},
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub image_url: Option<String>,
}

/// Create a post and append its denormalized summary to the author's
/// `posts` list.
pub async fn create_post<S: DocumentStore>(
    store: &mut S,
    author_id: &str,
    new_post: NewPost,
) -> Result<Post, CoreError> {
    log::info!("{author_id} creating post");
    if new_post.text.trim().is_empty() {
        return Err(ValidationError::single("text", "validation.required", "text is required").into());
    }

    let mut author = fetch_user(store, author_id).await?;

    let post = Post {
        id: generate_entity_id(),
        author_id: author_id.to_string(),
        text: new_post.text,
        image_url: new_post.image_url,
        likes: Vec::new(),
        comments: Vec::new(),
        created_at: Utc::now(),
    };
    store.put(&post).await?;

    author.posts.push(PostSummary {
        post_id: post.id.clone(),
        text: post.text.clone(),
        image_url: post.image_url.clone(),
        likes: post.likes.clone(),
        comments: post.comments.clone(),
        created_at: post.created_at,
    });
    if let Err(err) = store.put(&author).await {
        // The post exists without its summary; surface the failure so the
        // caller can retry the author write.
        log::error!("post {} saved but author summary write failed: {err}", post.id);
        return Err(err.into());
    }

    log::info!("post {} created", post.id);
    Ok(post)
}

/// Replace the post text. Owner-only.
pub async fn update_post<S: DocumentStore>(
    store: &mut S,
    actor_id: &str,
    post_id: &str,
    text: String,
) -> Result<Post, CoreError> {
    log::info!("{actor_id} updating post {post_id}");
    if text.trim().is_empty() {
        return Err(ValidationError::single("text", "validation.required", "text is required").into());
    }

    let mut post = fetch_post(store, post_id).await?;
    assert_owner(actor_id, &post)?;

    post.text = text;
    store.put(&post).await?;
    Ok(post)
}

/// Delete a post. Owner-only. Cascades: the post's comments are deleted and
/// its summary is removed from the author's `posts` list.
pub async fn delete_post<S: DocumentStore>(store: &mut S, actor_id: &str, post_id: &str) -> Result<(), CoreError> {
    log::info!("{actor_id} deleting post {post_id}");
    let post = fetch_post(store, post_id).await?;
    assert_owner(actor_id, &post)?;

    for comment_id in &post.comments {
        if !store.delete::<Comment>(comment_id).await? {
            log::warn!("comment {comment_id} of post {post_id} was already gone");
        }
    }
    store.delete::<Post>(post_id).await?;

    let mut author = fetch_user(store, &post.author_id).await?;
    author.posts.retain(|summary| summary.post_id != post_id);
    store.put(&author).await?;

    log::info!("post {post_id} deleted");
    Ok(())
}

/// All posts by one author, newest first.
pub async fn posts_of_user<S: DocumentStore>(store: &mut S, user_id: &str) -> Result<Vec<Post>, CoreError> {
    let mut posts: Vec<Post> = store
        .list::<Post>()
        .await?
        .into_iter()
        .filter(|post| post.author_id == user_id)
        .collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(posts)
}

async fn fetch_post<S: DocumentStore>(store: &mut S, post_id: &str) -> Result<Post, CoreError> {
    store.fetch::<Post>(post_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: Post::ENTITY,
        entity_id: post_id.to_string(),
    })
}

async fn fetch_user<S: DocumentStore>(store: &mut S, user_id: &str) -> Result<User, CoreError> {
    store.fetch::<User>(user_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: User::ENTITY,
        entity_id: user_id.to_string(),
    })
}
