//! Temporal classification of events.
//!
//! Start and end are persisted as separate `YYYY-MM-DD` / 24-hour `HH:MM`
//! strings. Everything here parses them into canonical chrono values before
//! comparing; "current time" is always a caller-supplied [`NaiveDateTime`],
//! never a locale-formatted string.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{CoreError, ValidationError},
    models::Event,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Where an event sits relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPhase {
    Upcoming,
    Ongoing,
    Past,
}

/// Parsed start/end of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Schedule {
    /// Parse the four schedule fields into canonical date-times.
    pub fn parse(
        start_date: &str,
        start_time: &str,
        end_date: &str,
        end_time: &str,
    ) -> Result<Self, ValidationError> {
        let start = parse_date_time(start_date, start_time, "start")?;
        let end = parse_date_time(end_date, end_time, "end")?;
        Ok(Self { start, end })
    }

    pub fn of_event(event: &Event) -> Result<Self, ValidationError> {
        Self::parse(&event.start_date, &event.start_time, &event.end_date, &event.end_time)
    }
}

fn parse_date_time(date: &str, time: &str, field: &str) -> Result<NaiveDateTime, ValidationError> {
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        ValidationError::single(
            format!("{field}_date"),
            "validation.date",
            format!("date must match {DATE_FORMAT}"),
        )
    })?;
    let time = NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| {
        ValidationError::single(
            format!("{field}_time"),
            "validation.time",
            format!("time must match 24-hour {TIME_FORMAT}"),
        )
    })?;
    Ok(date.and_time(time))
}

/// Validate a schedule at creation/update time. Fails with
/// [`CoreError::InvalidRange`] when the end precedes the start.
pub fn validate_schedule(
    start_date: &str,
    start_time: &str,
    end_date: &str,
    end_time: &str,
) -> Result<Schedule, CoreError> {
    let schedule = Schedule::parse(start_date, start_time, end_date, end_time)?;
    if schedule.end < schedule.start {
        return Err(CoreError::InvalidRange);
    }
    Ok(schedule)
}

/// Classify an event as upcoming, ongoing, or past relative to `now`.
pub fn classify(event: &Event, now: NaiveDateTime) -> Result<EventPhase, CoreError> {
    let schedule = Schedule::of_event(event)?;
    Ok(if schedule.start > now {
        EventPhase::Upcoming
    } else if schedule.end < now {
        EventPhase::Past
    } else {
        EventPhase::Ongoing
    })
}
