//! Content lifecycle: create/update/delete with cascade cleanup of the
//! denormalized back-references described in the data model.

mod blogs;
mod comments;
mod events;
mod posts;
mod users;

pub use blogs::{BlogPatch, NewBlog, blogs_of_author, create_blog, delete_blog, update_blog};
pub use comments::{NewComment, comments_of_post, create_comment, delete_comment};
pub use events::{
    EventPatch, NewEvent, create_event, delete_event, events_by_phase, events_of_creator, update_event,
};
pub use posts::{NewPost, create_post, delete_post, posts_of_user, update_post};
pub use users::{NewUser, ProfilePatch, register_user, update_profile};
