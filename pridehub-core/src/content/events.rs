use chrono::{NaiveDateTime, Utc};

use crate::{
    authz::assert_owner,
    errors::{CoreError, ValidationError},
    id::generate_entity_id,
    models::{Document, Event},
    schedule::{self, EventPhase, Schedule},
    store::DocumentStore,
};

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub is_online: bool,
    pub location: String,
    pub meeting_url: Option<String>,
    pub image_url: Option<String>,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
}

/// Optional event fields; `None` leaves the stored value untouched. The
/// merged schedule is re-validated whenever any of its four fields change.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub meeting_url: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

pub async fn create_event<S: DocumentStore>(
    store: &mut S,
    creator_id: &str,
    new_event: NewEvent,
) -> Result<Event, CoreError> {
    log::info!("{creator_id} creating event");
    if new_event.title.trim().is_empty() || new_event.description.trim().is_empty() {
        return Err(ValidationError::single("title", "validation.required", "title and description are required").into());
    }
    schedule::validate_schedule(
        &new_event.start_date,
        &new_event.start_time,
        &new_event.end_date,
        &new_event.end_time,
    )?;

    let event = Event {
        id: generate_entity_id(),
        creator_id: creator_id.to_string(),
        title: new_event.title,
        description: new_event.description,
        is_online: new_event.is_online,
        location: new_event.location,
        meeting_url: new_event.meeting_url,
        image_url: new_event.image_url,
        start_date: new_event.start_date,
        start_time: new_event.start_time,
        end_date: new_event.end_date,
        end_time: new_event.end_time,
        attendees: Vec::new(),
        created_at: Utc::now(),
    };
    store.put(&event).await?;
    log::info!("event {} created", event.id);
    Ok(event)
}

pub async fn update_event<S: DocumentStore>(
    store: &mut S,
    actor_id: &str,
    event_id: &str,
    patch: EventPatch,
) -> Result<Event, CoreError> {
    log::info!("{actor_id} updating event {event_id}");
    let mut event = fetch_event(store, event_id).await?;
    assert_owner(actor_id, &event)?;

    if let Some(title) = patch.title {
        event.title = title;
    }
    if let Some(description) = patch.description {
        event.description = description;
    }
    if let Some(location) = patch.location {
        event.location = location;
    }
    if let Some(meeting_url) = patch.meeting_url {
        event.meeting_url = meeting_url;
    }
    if let Some(image_url) = patch.image_url {
        event.image_url = image_url;
    }
    if let Some(start_date) = patch.start_date {
        event.start_date = start_date;
    }
    if let Some(start_time) = patch.start_time {
        event.start_time = start_time;
    }
    if let Some(end_date) = patch.end_date {
        event.end_date = end_date;
    }
    if let Some(end_time) = patch.end_time {
        event.end_time = end_time;
    }

    schedule::validate_schedule(&event.start_date, &event.start_time, &event.end_date, &event.end_time)?;

    store.put(&event).await?;
    Ok(event)
}

pub async fn delete_event<S: DocumentStore>(store: &mut S, actor_id: &str, event_id: &str) -> Result<(), CoreError> {
    log::info!("{actor_id} deleting event {event_id}");
    let event = fetch_event(store, event_id).await?;
    assert_owner(actor_id, &event)?;
    store.delete::<Event>(event_id).await?;
    log::info!("event {event_id} deleted");
    Ok(())
}

/// All events created by one user, newest first.
pub async fn events_of_creator<S: DocumentStore>(store: &mut S, creator_id: &str) -> Result<Vec<Event>, CoreError> {
    let mut events: Vec<Event> = store
        .list::<Event>()
        .await?
        .into_iter()
        .filter(|event| event.creator_id == creator_id)
        .collect();
    events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(events)
}

/// Events in the given phase relative to `now`. Upcoming events are sorted
/// by start ascending; other phases keep storage order. Events whose stored
/// schedule no longer parses are skipped with a warning rather than failing
/// the listing.
pub async fn events_by_phase<S: DocumentStore>(
    store: &mut S,
    phase: EventPhase,
    now: NaiveDateTime,
) -> Result<Vec<Event>, CoreError> {
    let mut selected = Vec::new();
    for event in store.list::<Event>().await? {
        match schedule::classify(&event, now) {
            Ok(event_phase) if event_phase == phase => selected.push(event),
            Ok(_) => {}
            Err(err) => log::warn!("skipping event {} with unreadable schedule: {err}", event.id),
        }
    }
    if phase == EventPhase::Upcoming {
        // Every selected event parsed during classification.
        selected.sort_by(|a, b| {
            let a_start = Schedule::of_event(a).ok().map(|s| s.start);
            let b_start = Schedule::of_event(b).ok().map(|s| s.start);
            a_start.cmp(&b_start)
        });
    }
    Ok(selected)
}

async fn fetch_event<S: DocumentStore>(store: &mut S, event_id: &str) -> Result<Event, CoreError> {
    store.fetch::<Event>(event_id).await?.ok_or_else(|| CoreError::NotFound {
        entity: Event::ENTITY,
        entity_id: event_id.to_string(),
    })
}
