use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    aliases::normalize_aliases,
    requests::{check_time_order, CreateEventRequest, DateRangeQuery, ListEventsQuery, UpdateEventRequest, UpdateStatusRequest},
    responses::ApiResponse,
};
use crate::api::extractors::{event_id::EventId, payload::{ApiJson, ApiQuery}};
use crate::domain::models::event::EventStatus;
use crate::domain::services::validation::parse_date;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

fn not_found() -> AppError {
    AppError::NotFound("Event not found".into())
}

fn decode_event_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    let body = normalize_aliases(body)?;
    serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid event payload: {}", e)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListEventsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;
    debug!(?filter, "Listing events");

    let events = state.event_repo.list(&filter).await?;
    info!("Found {} events", events.len());
    Ok(ApiResponse::list(events, "Events fetched successfully"))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    EventId(id): EventId,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(ApiResponse::ok(event, "Event fetched successfully"))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: CreateEventRequest = decode_event_body(body)?;
    let new_event = payload.into_new_event()?;
    info!("Creating event '{}' on {} by {}", new_event.title, new_event.date, new_event.organizer);

    let created = state.event_repo.create(&new_event).await?;
    info!("Event created: id={}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(created, "Event created successfully")),
    ))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    EventId(id): EventId,
    ApiJson(body): ApiJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: UpdateEventRequest = decode_event_body(body)?;
    let changes = payload.into_changes()?;
    if changes.is_empty() {
        return Err(AppError::Validation("No data provided for update".into()));
    }
    // A one-sided time change is checked against the stored counterpart.
    if changes.start_time.is_some() != changes.end_time.is_some() {
        let current = state.event_repo.find_by_id(id).await?.ok_or_else(not_found)?;
        check_time_order(
            changes.start_time.or(current.start_time),
            changes.end_time.or(current.end_time),
        )?;
    }

    let updated = state.event_repo.update(id, &changes).await?.ok_or_else(not_found)?;
    info!("Event updated: id={}", id);
    Ok(ApiResponse::ok(updated, "Event updated successfully"))
}

pub async fn update_event_status(
    State(state): State<Arc<AppState>>,
    EventId(id): EventId,
    ApiJson(payload): ApiJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status: EventStatus = payload.status.as_deref().unwrap_or_default().trim().parse()?;

    let updated = state
        .event_repo
        .update_status(id, status)
        .await?
        .ok_or_else(not_found)?;
    info!("Event {} status set to {}", id, status);
    Ok(ApiResponse::ok(updated, "Event status updated successfully"))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    EventId(id): EventId,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.event_repo.delete(id).await?.ok_or_else(not_found)?;
    info!("Event deleted: id={}", id);
    Ok(ApiResponse::ok(deleted, "Event deleted successfully"))
}

pub async fn list_events_by_date_range(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (start, end) = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
            (parse_date("start_date", start)?, parse_date("end_date", end)?)
        }
        _ => {
            return Err(AppError::Validation(
                "Start date and end date are required".into(),
            ))
        }
    };
    if end < start {
        return Err(AppError::Validation("end_date must not be before start_date".into()));
    }

    let events = state.event_repo.list_by_date_range(start, end).await?;
    info!("Found {} events between {} and {}", events.len(), start, end);
    Ok(ApiResponse::list(events, "Events fetched successfully"))
}
