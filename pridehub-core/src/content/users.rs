use chrono::{NaiveDate, Utc};

use crate::{
    errors::{CoreError, ValidationError, ValidationIssue},
    id::generate_entity_id,
    models::{Document, User},
    store::DocumentStore,
    validators::{is_valid_email, is_valid_username},
};

/// Fields required to create a user document. Credential hashing happens
/// upstream; the core stores the digest opaquely.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub gender: String,
}

/// Optional profile fields; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_private: Option<bool>,
    pub country: Option<String>,
    pub dob: Option<NaiveDate>,
}

/// Create a user after validating identity fields and username/email
/// uniqueness.
pub async fn register_user<S: DocumentStore>(store: &mut S, new_user: NewUser) -> Result<User, CoreError> {
    log::info!("registering user {}", new_user.username);
    let mut issues = Vec::new();
    if new_user.name.trim().is_empty() {
        issues.push(ValidationIssue::new("name", "validation.required", "name is required"));
    }
    if !is_valid_username(&new_user.username) {
        issues.push(ValidationIssue::new(
            "username",
            "validation.username",
            "username must be 3-20 alphanumeric characters",
        ));
    }
    if !is_valid_email(&new_user.email) {
        issues.push(ValidationIssue::new(
            "email",
            "validation.email",
            "value must be a valid email address",
        ));
    }
    if !issues.is_empty() {
        return Err(ValidationError::new(issues).into());
    }

    ensure_username_free(store, &new_user.username, None).await?;

    let user = User {
        id: generate_entity_id(),
        name: new_user.name,
        username: new_user.username.to_lowercase(),
        email: new_user.email,
        password_hash: new_user.password_hash,
        is_email_verified: false,
        gender: new_user.gender,
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
    };
    store.put(&user).await?;
    log::info!("user {} registered", user.id);
    Ok(user)
}

/// Apply a profile patch to the acting user's own document.
pub async fn update_profile<S: DocumentStore>(
    store: &mut S,
    user_id: &str,
    patch: ProfilePatch,
) -> Result<User, CoreError> {
    log::info!("updating profile of {user_id}");
    let mut user = store.fetch::<User>(user_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: User::ENTITY,
        entity_id: user_id.to_string(),
    })?;

    if let Some(username) = &patch.username {
        if !is_valid_username(username) {
            return Err(ValidationError::single(
                "username",
                "validation.username",
                "username must be 3-20 alphanumeric characters",
            )
            .into());
        }
        ensure_username_free(store, username, Some(user_id)).await?;
        user.username = username.to_lowercase();
    }
    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(bio) = patch.bio {
        user.bio = bio;
    }
    if let Some(url) = patch.profile_image_url {
        user.profile_image_url = url;
    }
    if let Some(url) = patch.cover_image_url {
        user.cover_image_url = url;
    }
    if let Some(is_private) = patch.is_private {
        user.is_private = is_private;
    }
    if let Some(country) = patch.country {
        user.country = country;
    }
    if let Some(dob) = patch.dob {
        user.dob = Some(dob);
    }

    store.put(&user).await?;
    Ok(user)
}

/// The store has no unique indexes; uniqueness is checked by scanning the
/// collection before the write, same as every other membership rule here.
async fn ensure_username_free<S: DocumentStore>(
    store: &mut S,
    username: &str,
    exclude_user_id: Option<&str>,
) -> Result<(), CoreError> {
    let wanted = username.to_lowercase();
    let users = store.list::<User>().await?;
    let taken = users
        .iter()
        .any(|user| user.username == wanted && Some(user.id.as_str()) != exclude_user_id);
    if taken {
        log::warn!("username {wanted} already exists");
        return Err(ValidationError::single("username", "validation.unique", "username already exists").into());
    }
    Ok(())
}
