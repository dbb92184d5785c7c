use crate::error::AppError;
use serde_json::Value;

pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("name", "title"),
    ("startTime", "start_time"),
    ("endTime", "end_time"),
    ("mode", "mode_of_event"),
    ("meetingLink", "meeting_link"),
    ("organizerEmail", "organizer_email"),
    ("maxAttendees", "max_attendees"),
];

/// Rewrites alias keys to their canonical names. A canonical key that is
/// present and non-null wins over its alias.
pub fn normalize_aliases(body: Value) -> Result<Value, AppError> {
    let Value::Object(mut map) = body else {
        return Err(AppError::Validation("Request body must be a JSON object".into()));
    };

    for (alias, canonical) in FIELD_ALIASES {
        if let Some(value) = map.remove(*alias) {
            let canonical_missing = map.get(*canonical).map_or(true, Value::is_null);
            if canonical_missing {
                map.insert(canonical.to_string(), value);
            }
        }
    }

    Ok(Value::Object(map))
}
