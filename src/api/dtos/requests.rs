use crate::domain::models::{
    dashboard::Timeframe,
    event::{
        EventChanges, EventFilter, EventMode, EventStatus, NewEvent, DEFAULT_DURATION_MIN,
        DEFAULT_ORGANIZER_EMAIL, DEFAULT_TIMEZONE,
    },
};
use crate::domain::services::validation::{
    normalize_tags, parse_date, parse_time, require_positive, validate_email, validate_timezone,
};
use crate::error::AppError;
use chrono::NaiveTime;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

fn whole_number(field: &str, value: f64) -> Result<i64, AppError> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(AppError::Validation(format!("{} must be a whole number", field)))
    }
}

impl IntOrString {
    fn into_i32(self, field: &str) -> Result<Option<i32>, AppError> {
        let not_integer = || AppError::Validation(format!("{} must be an integer", field));
        let value = match self {
            IntOrString::Int(v) => v,
            IntOrString::Float(v) => whole_number(field, v)?,
            IntOrString::Text(s) if s.trim().is_empty() => return Ok(None),
            IntOrString::Text(s) => match s.trim().parse::<i64>() {
                Ok(v) => v,
                Err(_) => whole_number(field, s.trim().parse::<f64>().map_err(|_| not_integer())?)?,
            },
            IntOrString::Other(_) => return Err(not_integer()),
        };
        i32::try_from(value)
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{} is out of range", field)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn positive(field: &str, value: Option<IntOrString>) -> Result<Option<i32>, AppError> {
    value
        .map(|v| v.into_i32(field))
        .transpose()
        .map(Option::flatten)?
        .map(|v| require_positive(field, v))
        .transpose()
}

fn optional_time(field: &str, value: Option<String>) -> Result<Option<NaiveTime>, AppError> {
    non_blank(value).map(|s| parse_time(field, &s)).transpose()
}

pub fn check_time_order(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(AppError::Validation(
            "end_time must not be earlier than start_time".into(),
        )),
        _ => Ok(()),
    }
}

// Only applies when the client picked the mode explicitly.
fn check_mode_requirements(mode: EventMode, meeting_link: &str, location: &str) -> Result<(), AppError> {
    let ok = match mode {
        EventMode::Online => !meeting_link.is_empty(),
        EventMode::Offline => !location.is_empty(),
        EventMode::Hybrid => !meeting_link.is_empty() || !location.is_empty(),
    };
    if ok {
        return Ok(());
    }
    let msg = match mode {
        EventMode::Online => "meeting_link is required for online events",
        EventMode::Offline => "location is required for offline events",
        EventMode::Hybrid => "hybrid events need a meeting_link or a location",
    };
    Err(AppError::Validation(msg.into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub organizer_email: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<IntOrString>,
    pub timezone: Option<String>,
    pub mode_of_event: Option<String>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub max_attendees: Option<IntOrString>,
    pub tags: Option<Vec<String>>,
}

impl CreateEventRequest {
    pub fn into_new_event(self) -> Result<NewEvent, AppError> {
        let (title, organizer, date) = match (
            non_blank(self.title),
            non_blank(self.organizer),
            non_blank(self.date),
        ) {
            (Some(title), Some(organizer), Some(date)) => (title, organizer, date),
            _ => {
                return Err(AppError::Validation(
                    "Title, date, and organizer are required.".into(),
                ))
            }
        };
        let date = parse_date("date", &date)?;

        let start_time = optional_time("start_time", self.start_time)?;
        let end_time = optional_time("end_time", self.end_time)?;
        check_time_order(start_time, end_time)?;

        let organizer_email = match non_blank(self.organizer_email) {
            Some(email) => {
                validate_email(&email)?;
                email
            }
            None => DEFAULT_ORGANIZER_EMAIL.to_string(),
        };

        let timezone = match non_blank(self.timezone) {
            Some(tz) => {
                validate_timezone(&tz)?;
                tz
            }
            None => DEFAULT_TIMEZONE.to_string(),
        };

        let meeting_link = non_blank(self.meeting_link).unwrap_or_default();
        let location = non_blank(self.location).unwrap_or_default();
        let mode_of_event = match non_blank(self.mode_of_event) {
            Some(raw) => {
                let mode: EventMode = raw.parse()?;
                check_mode_requirements(mode, &meeting_link, &location)?;
                mode
            }
            None => EventMode::default(),
        };

        let status = non_blank(self.status)
            .map(|s| s.parse::<EventStatus>())
            .transpose()?
            .unwrap_or_default();

        Ok(NewEvent {
            title,
            description: self.description.unwrap_or_default(),
            organizer,
            organizer_email,
            date,
            start_time,
            end_time,
            duration: positive("duration", self.duration)?.unwrap_or(DEFAULT_DURATION_MIN),
            timezone,
            mode_of_event,
            meeting_link,
            location,
            status,
            max_attendees: positive("max_attendees", self.max_attendees)?,
            tags: normalize_tags(self.tags.unwrap_or_default()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub organizer_email: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration: Option<IntOrString>,
    pub timezone: Option<String>,
    pub mode_of_event: Option<String>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub max_attendees: Option<IntOrString>,
    pub tags: Option<Vec<String>>,
}

impl UpdateEventRequest {
    pub fn into_changes(self) -> Result<EventChanges, AppError> {
        let required_text = |field: &str, value: Option<String>| -> Result<Option<String>, AppError> {
            match value {
                Some(v) if v.trim().is_empty() => {
                    Err(AppError::Validation(format!("{} cannot be empty", field)))
                }
                Some(v) => Ok(Some(v.trim().to_string())),
                None => Ok(None),
            }
        };

        let start_time = optional_time("start_time", self.start_time)?;
        let end_time = optional_time("end_time", self.end_time)?;
        check_time_order(start_time, end_time)?;

        let organizer_email = non_blank(self.organizer_email)
            .map(|email| validate_email(&email).map(|_| email))
            .transpose()?;
        let timezone = non_blank(self.timezone)
            .map(|tz| validate_timezone(&tz).map(|_| tz))
            .transpose()?;

        Ok(EventChanges {
            title: required_text("title", self.title)?,
            description: self.description,
            organizer: required_text("organizer", self.organizer)?,
            organizer_email,
            date: non_blank(self.date).map(|d| parse_date("date", &d)).transpose()?,
            start_time,
            end_time,
            duration: positive("duration", self.duration)?,
            timezone,
            mode_of_event: non_blank(self.mode_of_event).map(|m| m.parse::<EventMode>()).transpose()?,
            meeting_link: self.meeting_link.map(|s| s.trim().to_string()),
            location: self.location.map(|s| s.trim().to_string()),
            status: non_blank(self.status).map(|s| s.parse::<EventStatus>()).transpose()?,
            max_attendees: positive("max_attendees", self.max_attendees)?,
            tags: self.tags.map(normalize_tags),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<String>,
    pub mode: Option<String>,
    pub organizer: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
}

impl ListEventsQuery {
    pub fn into_filter(self) -> Result<EventFilter, AppError> {
        Ok(EventFilter {
            status: self.status,
            mode: self.mode,
            organizer: self.organizer,
            date_from: non_blank(self.date_from)
                .map(|d| parse_date("date_from", &d))
                .transpose()?,
            date_to: non_blank(self.date_to)
                .map(|d| parse_date("date_to", &d))
                .transpose()?,
            search: self.search,
        }
        .normalized())
    }
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub timeframe: Option<String>,
    pub department: Option<String>,
}

impl DashboardQuery {
    pub fn timeframe(&self) -> Result<Timeframe, AppError> {
        match self.timeframe.as_deref().map(str::trim) {
            None | Some("") => Ok(Timeframe::default()),
            Some(raw) => serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
                .map_err(|_| {
                    AppError::Validation(format!(
                        "Invalid timeframe '{}' (expected week, month, quarter, year)",
                        raw
                    ))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn create(body: serde_json::Value) -> Result<NewEvent, AppError> {
        serde_json::from_value::<CreateEventRequest>(body).unwrap().into_new_event()
    }

    #[test]
    fn test_minimal_payload_gets_defaults() {
        let event = create(json!({
            "title": "Standup",
            "date": "2025-01-15",
            "organizer": "A",
            "start_time": "09:00"
        }))
        .unwrap();

        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(event.duration, 60);
        assert_eq!(event.timezone, "UTC");
        assert_eq!(event.mode_of_event, EventMode::Online);
        assert_eq!(event.status, EventStatus::Upcoming);
        assert_eq!(event.organizer_email, DEFAULT_ORGANIZER_EMAIL);
        assert!(event.tags.is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        for body in [
            json!({ "date": "2025-01-15", "organizer": "A" }),
            json!({ "title": "X", "organizer": "A" }),
            json!({ "title": "X", "date": "2025-01-15" }),
            json!({ "title": "   ", "date": "2025-01-15", "organizer": "A" }),
        ] {
            assert!(matches!(create(body), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_lenient_numbers() {
        let event = create(json!({
            "title": "X", "date": "2025-01-15", "organizer": "A",
            "duration": "90", "max_attendees": ""
        }))
        .unwrap();
        assert_eq!(event.duration, 90);
        assert_eq!(event.max_attendees, None);

        let err = create(json!({
            "title": "X", "date": "2025-01-15", "organizer": "A", "duration": 0
        }));
        assert!(err.is_err());
    }

    #[test]
    fn test_whole_floats_are_accepted() {
        let event = create(json!({
            "title": "X", "date": "2025-01-15", "organizer": "A",
            "duration": 90.0, "max_attendees": "12.0"
        }))
        .unwrap();
        assert_eq!(event.duration, 90);
        assert_eq!(event.max_attendees, Some(12));

        for duration in [json!(90.5), json!(true), json!([60]), json!("1e400")] {
            let result = create(json!({
                "title": "X", "date": "2025-01-15", "organizer": "A", "duration": duration
            }));
            match result {
                Err(AppError::Validation(msg)) => assert!(msg.starts_with("duration must be")),
                other => panic!("expected validation error, got {:?}", other.map(|e| e.duration)),
            }
        }
    }

    #[test]
    fn test_explicit_mode_requires_its_field() {
        let base = |mode: &str, extra: serde_json::Value| {
            let mut body = json!({ "title": "X", "date": "2025-01-15", "organizer": "A", "mode_of_event": mode });
            if let (Some(obj), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
                obj.extend(extra.clone());
            }
            create(body)
        };

        assert!(base("online", json!({})).is_err());
        assert!(base("online", json!({ "meeting_link": "https://meet/x" })).is_ok());
        assert!(base("offline", json!({ "meeting_link": "https://meet/x" })).is_err());
        assert!(base("offline", json!({ "location": "Room A" })).is_ok());
        assert!(base("hybrid", json!({})).is_err());
        assert!(base("hybrid", json!({ "location": "Room A" })).is_ok());
        assert!(base("carrier-pigeon", json!({ "location": "Room A" })).is_err());
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert!(create(json!({
            "title": "X", "date": "2025-01-15", "organizer": "A",
            "start_time": "10:00", "end_time": "09:00"
        }))
        .is_err());
    }

    #[test]
    fn test_update_request_only_sets_supplied_fields() {
        let changes = serde_json::from_value::<UpdateEventRequest>(json!({ "title": "Renamed" }))
            .unwrap()
            .into_changes()
            .unwrap();
        assert_eq!(changes.title.as_deref(), Some("Renamed"));
        assert!(changes.description.is_none());
        assert!(changes.status.is_none());

        let empty = serde_json::from_value::<UpdateEventRequest>(json!({ "title": null }))
            .unwrap()
            .into_changes()
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_rejects_blank_title_and_bad_status() {
        let blank = serde_json::from_value::<UpdateEventRequest>(json!({ "title": " " }))
            .unwrap()
            .into_changes();
        assert!(blank.is_err());

        let bogus = serde_json::from_value::<UpdateEventRequest>(json!({ "status": "bogus" }))
            .unwrap()
            .into_changes();
        assert!(bogus.is_err());
    }

    #[test]
    fn test_dashboard_timeframe_parsing() {
        let q = |tf: Option<&str>| DashboardQuery {
            timeframe: tf.map(String::from),
            department: None,
        };
        assert_eq!(q(None).timeframe().unwrap(), Timeframe::Month);
        assert_eq!(q(Some("Week")).timeframe().unwrap(), Timeframe::Week);
        assert!(q(Some("decade")).timeframe().is_err());
    }
}
