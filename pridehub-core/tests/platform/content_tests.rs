use chrono::NaiveDate;
use pridehub_core::{
    EventPhase,
    content::{
        BlogPatch, EventPatch, NewBlog, NewComment, NewEvent, NewPost, NewUser, ProfilePatch, blogs_of_author,
        comments_of_post, create_blog, create_comment, create_event, create_post, delete_blog, delete_comment,
        delete_event, delete_post, events_by_phase, posts_of_user, register_user, update_blog, update_event,
        update_post, update_profile,
    },
};

use super::support::*;

fn new_user(username: &str) -> NewUser {
    NewUser {
        name: format!("{username} full name"),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "argon2id$stub".to_string(),
        gender: "genderfluid".to_string(),
    }
}

#[tokio::test]
async fn creating_a_post_appends_a_summary_to_the_author() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;

    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "hello world".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");

    let alex: User = store.fetch("alex").await.expect("fetch").expect("alex exists");
    assert_eq!(alex.posts.len(), 1);
    assert_eq!(alex.posts[0].post_id, created.id);
    assert_eq!(alex.posts[0].text, "hello world");
}

#[tokio::test]
async fn deleting_a_post_cleans_summary_and_comments() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;

    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "soon gone".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");
    let comment = create_comment(
        &mut store,
        &NoopNotifier,
        "sam",
        &created.id,
        NewComment {
            text: "nice".to_string(),
        },
    )
    .await
    .expect("create comment");

    delete_post(&mut store, "alex", &created.id).await.expect("delete post");

    let alex: User = store.fetch("alex").await.expect("fetch").expect("alex exists");
    assert!(alex.posts.is_empty());
    let gone: Option<Post> = store.fetch(&created.id).await.expect("fetch");
    assert!(gone.is_none());
    let comment_gone: Option<Comment> = store.fetch(&comment.id).await.expect("fetch");
    assert!(comment_gone.is_none());
}

#[tokio::test]
async fn only_the_author_may_delete_a_post() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;
    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "mine".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");

    let err = delete_post(&mut store, "sam", &created.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { resource: "post" }));
}

#[tokio::test]
async fn post_text_updates_are_owner_guarded() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;
    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "draft".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");

    let err = update_post(&mut store, "sam", &created.id, "defaced".to_string()).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { resource: "post" }));

    let updated = update_post(&mut store, "alex", &created.id, "final".to_string())
        .await
        .expect("update post");
    assert_eq!(updated.text, "final");

    let err = update_post(&mut store, "alex", &created.id, "   ".to_string()).await.unwrap_err();
    assert_eq!(err.code(), "validation_failed");
}

#[tokio::test]
async fn commenting_links_the_comment_to_its_post() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;
    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "discuss".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");

    let notifier = RecordingNotifier::default();
    let comment = create_comment(
        &mut store,
        &notifier,
        "sam",
        &created.id,
        NewComment {
            text: "first!".to_string(),
        },
    )
    .await
    .expect("create comment");

    let stored: Post = store.fetch(&created.id).await.expect("fetch").expect("post exists");
    assert_eq!(stored.comments, vec![comment.id.clone()]);
    assert_eq!(notifier.events().len(), 1);

    let listed = comments_of_post(&mut store, &created.id).await.expect("list comments");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, comment.id);
}

#[tokio::test]
async fn deleting_a_comment_unlinks_it_from_the_post() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;
    let created = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "discuss".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");
    let comment = create_comment(
        &mut store,
        &NoopNotifier,
        "sam",
        &created.id,
        NewComment {
            text: "oops".to_string(),
        },
    )
    .await
    .expect("create comment");

    let err = delete_comment(&mut store, "alex", &comment.id).await.unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { resource: "comment" }));

    delete_comment(&mut store, "sam", &comment.id).await.expect("delete comment");
    let stored: Post = store.fetch(&created.id).await.expect("fetch").expect("post exists");
    assert!(stored.comments.is_empty());
}

#[tokio::test]
async fn comments_of_missing_post_is_not_found() {
    let mut store = store();
    let err = comments_of_post(&mut store, "nope").await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "post", .. }));
}

#[tokio::test]
async fn blog_validation_rejects_short_fields() {
    let mut store = store();
    let err = create_blog(
        &mut store,
        "alex",
        NewBlog {
            title: "hey".to_string(),
            content: "short".to_string(),
            image_url: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "validation_failed");
    let CoreError::Validation(validation) = err else {
        panic!("expected validation error");
    };
    assert_eq!(validation.issues.len(), 2);
}

#[tokio::test]
async fn blog_update_is_owner_guarded_and_partial() {
    let mut store = store();
    let created = create_blog(
        &mut store,
        "alex",
        NewBlog {
            title: "Queer history".to_string(),
            content: "A long enough body.".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create blog");

    let err = update_blog(
        &mut store,
        "sam",
        &created.id,
        BlogPatch {
            title: Some("Hijacked title".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::Forbidden { resource: "blog" }));

    let updated = update_blog(
        &mut store,
        "alex",
        &created.id,
        BlogPatch {
            content: Some("A replacement body, still long.".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update blog");
    assert_eq!(updated.title, "Queer history");
    assert_eq!(updated.content, "A replacement body, still long.");

    delete_blog(&mut store, "alex", &created.id).await.expect("delete blog");
    assert!(blogs_of_author(&mut store, "alex").await.expect("list").is_empty());
}

#[tokio::test]
async fn event_schedule_is_validated_on_create_and_update() {
    let mut store = store();
    let err = create_event(
        &mut store,
        "alex",
        NewEvent {
            title: "Backwards".to_string(),
            description: "Ends before it starts".to_string(),
            is_online: true,
            location: String::new(),
            meeting_url: Some("https://example.com/meet".to_string()),
            image_url: None,
            start_date: "2030-06-02".to_string(),
            start_time: "10:00".to_string(),
            end_date: "2030-06-01".to_string(),
            end_time: "10:00".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidRange));

    let created = create_event(
        &mut store,
        "alex",
        NewEvent {
            title: "Picnic".to_string(),
            description: "In the park".to_string(),
            is_online: false,
            location: "Riverside".to_string(),
            meeting_url: None,
            image_url: None,
            start_date: "2030-06-01".to_string(),
            start_time: "10:00".to_string(),
            end_date: "2030-06-01".to_string(),
            end_time: "12:00".to_string(),
        },
    )
    .await
    .expect("create event");

    // Moving the end across the start is rejected even though each field is
    // individually well-formed.
    let err = update_event(
        &mut store,
        "alex",
        &created.id,
        EventPatch {
            end_date: Some("2030-05-31".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CoreError::InvalidRange));

    delete_event(&mut store, "alex", &created.id).await.expect("delete event");
}

#[tokio::test]
async fn upcoming_events_come_back_start_ascending() {
    let mut store = store();
    seed(&mut store, &event("later", "alex", ("2030-08-01", "10:00", "2030-08-01", "12:00"))).await;
    seed(&mut store, &event("sooner", "alex", ("2030-07-01", "10:00", "2030-07-01", "12:00"))).await;
    seed(&mut store, &event("done", "alex", ("2020-01-01", "10:00", "2020-01-01", "12:00"))).await;

    let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    let upcoming = events_by_phase(&mut store, EventPhase::Upcoming, now).await.expect("upcoming");
    let ids: Vec<_> = upcoming.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["sooner", "later"]);

    let past = events_by_phase(&mut store, EventPhase::Past, now).await.expect("past");
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].id, "done");
}

#[tokio::test]
async fn events_with_unreadable_schedules_are_skipped() {
    let mut store = store();
    seed(&mut store, &event("ok", "alex", ("2030-08-01", "10:00", "2030-08-01", "12:00"))).await;
    seed(&mut store, &event("bad", "alex", ("soon", "ish", "later", "ish"))).await;

    let now = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
    let upcoming = events_by_phase(&mut store, EventPhase::Upcoming, now).await.expect("upcoming");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, "ok");
}

#[tokio::test]
async fn registration_enforces_username_rules_and_uniqueness() {
    let mut store = store();

    let err = register_user(&mut store, new_user("x")).await.unwrap_err();
    assert_eq!(err.code(), "validation_failed");

    register_user(&mut store, new_user("Marsha")).await.expect("register");
    let err = register_user(&mut store, new_user("marsha")).await.unwrap_err();
    assert_eq!(err.code(), "validation_failed");
}

#[tokio::test]
async fn profile_update_keeps_own_username_and_rejects_taken_ones() {
    let mut store = store();
    let marsha = register_user(&mut store, new_user("Marsha")).await.expect("register");
    register_user(&mut store, new_user("Sylvia")).await.expect("register");

    // Re-asserting your own username is fine.
    update_profile(
        &mut store,
        &marsha.id,
        ProfilePatch {
            username: Some("marsha".to_string()),
            bio: Some("Activist.".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update own profile");

    let err = update_profile(
        &mut store,
        &marsha.id,
        ProfilePatch {
            username: Some("sylvia".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), "validation_failed");

    let stored: User = store.fetch(&marsha.id).await.expect("fetch").expect("user exists");
    assert_eq!(stored.username, "marsha");
    assert_eq!(stored.bio, "Activist.");
}

#[tokio::test]
async fn author_listings_come_back_newest_first() {
    let mut store = store();
    seed(&mut store, &user("alex")).await;

    let first = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "first".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");
    let second = create_post(
        &mut store,
        "alex",
        NewPost {
            text: "second".to_string(),
            image_url: None,
        },
    )
    .await
    .expect("create post");

    let posts = posts_of_user(&mut store, "alex").await.expect("list posts");
    assert_eq!(posts.len(), 2);
    // created_at of the two posts may collide at clock resolution, so accept
    // either strict order only when the timestamps differ.
    if second.created_at > first.created_at {
        assert_eq!(posts[0].id, second.id);
    }
}
