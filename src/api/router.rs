use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::cors::create_cors_layer;
use crate::api::handlers::{dashboard, event, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = create_cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/", get(health::root))

        // Health
        .route("/api/health", get(health::health_check))
        .route("/api/health/database", get(health::database_health))

        // Events
        .route("/api/events", get(event::list_events).post(event::create_event))
        .route("/api/events/date-range", get(event::list_events_by_date_range))
        .route("/api/events/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))
        .route("/api/events/{id}/status", patch(event::update_event_status))

        // Dashboard
        .route("/api/dashboard/data", get(dashboard::get_dashboard_data))
        .route("/api/dashboard/employees", get(dashboard::get_employees))
        .route("/api/dashboard/departments", get(dashboard::get_departments))
        .route("/api/dashboard/attendance", get(dashboard::get_attendance))
        .route("/api/dashboard/performance", get(dashboard::get_performance))

        .fallback(health::route_not_found)

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}
