use crate::error::AppError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DURATION_MIN: i32 = 60;
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_ORGANIZER_EMAIL: &str = "organizer@company.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    #[default]
    Online,
    Offline,
    Hybrid,
}

impl EventMode {
    pub const ALL: [EventMode; 3] = [EventMode::Online, EventMode::Offline, EventMode::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Online => "online",
            EventMode::Offline => "offline",
            EventMode::Hybrid => "hybrid",
        }
    }
}

impl FromStr for EventMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid mode_of_event '{}' (expected online, offline, hybrid)",
                    s
                ))
            })
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Upcoming,
        EventStatus::Live,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Live => "live",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(
                    "Valid status is required (upcoming, live, completed, cancelled)".into(),
                )
            })
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub organizer: String,
    pub organizer_email: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: i32,
    pub timezone: String,
    pub mode_of_event: String,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub max_attendees: Option<i32>,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub organizer_email: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: i32,
    pub timezone: String,
    pub mode_of_event: EventMode,
    pub meeting_link: String,
    pub location: String,
    pub status: EventStatus,
    pub max_attendees: Option<i32>,
    pub tags: Vec<String>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, organizer: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            organizer: organizer.into(),
            organizer_email: DEFAULT_ORGANIZER_EMAIL.to_string(),
            date,
            start_time: None,
            end_time: None,
            duration: DEFAULT_DURATION_MIN,
            timezone: DEFAULT_TIMEZONE.to_string(),
            mode_of_event: EventMode::default(),
            meeting_link: String::new(),
            location: String::new(),
            status: EventStatus::default(),
            max_attendees: None,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub organizer_email: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: Option<i32>,
    pub timezone: Option<String>,
    pub mode_of_event: Option<EventMode>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<EventStatus>,
    pub max_attendees: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.organizer.is_none()
            && self.organizer_email.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.duration.is_none()
            && self.timezone.is_none()
            && self.mode_of_event.is_none()
            && self.meeting_link.is_none()
            && self.location.is_none()
            && self.status.is_none()
            && self.max_attendees.is_none()
            && self.tags.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<String>,
    pub mode: Option<String>,
    pub organizer: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl EventFilter {
    pub fn normalized(self) -> Self {
        fn non_blank(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }

        Self {
            status: non_blank(self.status),
            mode: non_blank(self.mode),
            organizer: non_blank(self.organizer),
            date_from: self.date_from,
            date_to: self.date_to,
            search: non_blank(self.search),
        }
    }
}
