//! Ownership checks applied before every mutate/delete path.

use crate::{
    errors::CoreError,
    models::{Blog, Comment, Event, Post},
};

/// A resource exclusively owned by its creator for mutation purposes.
pub trait Owned {
    const RESOURCE: &'static str;

    fn owner_id(&self) -> &str;
}

impl Owned for Post {
    const RESOURCE: &'static str = "post";

    fn owner_id(&self) -> &str {
        &self.author_id
    }
}

impl Owned for Comment {
    const RESOURCE: &'static str = "comment";

    fn owner_id(&self) -> &str {
        &self.author_id
    }
}

impl Owned for Blog {
    const RESOURCE: &'static str = "blog";

    fn owner_id(&self) -> &str {
        &self.author_id
    }
}

impl Owned for Event {
    const RESOURCE: &'static str = "event";

    fn owner_id(&self) -> &str {
        &self.creator_id
    }
}

/// Fails with [`CoreError::Forbidden`] unless `acting_id` owns the resource.
pub fn assert_owner<R: Owned>(acting_id: &str, resource: &R) -> Result<(), CoreError> {
    if resource.owner_id() != acting_id {
        log::warn!(
            "{} {} mutation rejected for non-owner {acting_id}",
            R::RESOURCE,
            resource.owner_id()
        );
        return Err(CoreError::Forbidden { resource: R::RESOURCE });
    }
    Ok(())
}
