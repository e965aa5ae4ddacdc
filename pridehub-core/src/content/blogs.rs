use chrono::Utc;

use crate::{
    authz::assert_owner,
    errors::{CoreError, ValidationError, ValidationIssue},
    id::generate_entity_id,
    models::{Blog, Document},
    store::DocumentStore,
};

const TITLE_MIN: usize = 5;
const CONTENT_MIN: usize = 10;

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Optional blog fields; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
}

pub async fn create_blog<S: DocumentStore>(
    store: &mut S,
    author_id: &str,
    new_blog: NewBlog,
) -> Result<Blog, CoreError> {
    log::info!("{author_id} creating blog");
    validate_blog_fields(Some(&new_blog.title), Some(&new_blog.content))?;

    let blog = Blog {
        id: generate_entity_id(),
        author_id: author_id.to_string(),
        title: new_blog.title,
        content: new_blog.content,
        image_url: new_blog.image_url,
        upvotes: Vec::new(),
        downvotes: Vec::new(),
        created_at: Utc::now(),
    };
    store.put(&blog).await?;
    log::info!("blog {} created", blog.id);
    Ok(blog)
}

pub async fn update_blog<S: DocumentStore>(
    store: &mut S,
    actor_id: &str,
    blog_id: &str,
    patch: BlogPatch,
) -> Result<Blog, CoreError> {
    log::info!("{actor_id} updating blog {blog_id}");
    validate_blog_fields(patch.title.as_deref(), patch.content.as_deref())?;

    let mut blog = fetch_blog(store, blog_id).await?;
    assert_owner(actor_id, &blog)?;

    if let Some(title) = patch.title {
        blog.title = title;
    }
    if let Some(content) = patch.content {
        blog.content = content;
    }
    if let Some(image_url) = patch.image_url {
        blog.image_url = image_url;
    }

    store.put(&blog).await?;
    Ok(blog)
}

pub async fn delete_blog<S: DocumentStore>(store: &mut S, actor_id: &str, blog_id: &str) -> Result<(), CoreError> {
    log::info!("{actor_id} deleting blog {blog_id}");
    let blog = fetch_blog(store, blog_id).await?;
    assert_owner(actor_id, &blog)?;
    store.delete::<Blog>(blog_id).await?;
    log::info!("blog {blog_id} deleted");
    Ok(())
}

/// All blogs by one author, newest first.
pub async fn blogs_of_author<S: DocumentStore>(store: &mut S, author_id: &str) -> Result<Vec<Blog>, CoreError> {
    let mut blogs: Vec<Blog> = store
        .list::<Blog>()
        .await?
        .into_iter()
        .filter(|blog| blog.author_id == author_id)
        .collect();
    blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(blogs)
}

fn validate_blog_fields(title: Option<&str>, content: Option<&str>) -> Result<(), CoreError> {
    let mut issues = Vec::new();
    if let Some(title) = title
        && title.chars().count() < TITLE_MIN
    {
        issues.push(ValidationIssue::new(
            "title",
            "validation.length",
            format!("length must be at least {TITLE_MIN}"),
        ));
    }
    if let Some(content) = content
        && content.chars().count() < CONTENT_MIN
    {
        issues.push(ValidationIssue::new(
            "content",
            "validation.length",
            format!("length must be at least {CONTENT_MIN}"),
        ));
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues).into())
    }
}

async fn fetch_blog<S: DocumentStore>(store: &mut S, blog_id: &str) -> Result<Blog, CoreError> {
    store.fetch::<Blog>(blog_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: Blog::ENTITY,
        entity_id: blog_id.to_string(),
    })
}
