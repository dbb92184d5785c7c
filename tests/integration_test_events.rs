mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_event_applies_defaults() {
    let app = TestApp::new().await;

    let response = app.send_json("POST", "/api/events", json!({
        "title": "Standup",
        "date": "2025-01-15",
        "organizer": "A",
        "start_time": "09:00"
    })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = parse_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Event created successfully");

    let event = &body["data"];
    assert!(event["id"].as_i64().unwrap() > 0);
    assert_eq!(event["title"], "Standup");
    assert_eq!(event["date"], "2025-01-15");
    assert_eq!(event["start_time"], "09:00:00");
    assert_eq!(event["duration"], 60);
    assert_eq!(event["timezone"], "UTC");
    assert_eq!(event["mode_of_event"], "online");
    assert_eq!(event["status"], "upcoming");
    assert_eq!(event["organizer_email"], "organizer@company.com");
    assert_eq!(event["tags"], json!([]));
    assert!(event["created_at"].is_string());
    assert_eq!(event["created_at"], event["updated_at"]);
}

#[tokio::test]
async fn test_create_event_with_full_payload() {
    let app = TestApp::new().await;

    let event = app.create_event(json!({
        "title": "Quarterly Review",
        "description": "Numbers and plans",
        "organizer": "Finance Team",
        "organizer_email": "finance@company.com",
        "date": "2025-03-31",
        "start_time": "14:00",
        "end_time": "15:30",
        "duration": "90",
        "timezone": "Europe/Berlin",
        "mode_of_event": "hybrid",
        "meeting_link": "https://meet.example.com/qr",
        "location": "Board Room",
        "max_attendees": 25,
        "tags": [" finance ", "review", "finance", ""]
    })).await;

    assert_eq!(event["end_time"], "15:30:00");
    assert_eq!(event["duration"], 90);
    assert_eq!(event["timezone"], "Europe/Berlin");
    assert_eq!(event["mode_of_event"], "hybrid");
    assert_eq!(event["max_attendees"], 25);
    assert_eq!(event["tags"], json!(["finance", "review"]));
}

#[tokio::test]
async fn test_create_event_rejects_missing_required_fields() {
    let app = TestApp::new().await;

    for payload in [
        json!({ "date": "2025-01-15", "organizer": "A" }),
        json!({ "title": "X", "organizer": "A" }),
        json!({ "title": "X", "date": "2025-01-15" }),
        json!({ "title": "", "date": "2025-01-15", "organizer": "A" }),
    ] {
        let response = app.send_json("POST", "/api/events", payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Title, date, and organizer are required.");
    }

    let list = parse_body(app.get("/api/events").await).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_create_event_rejects_invalid_values() {
    let app = TestApp::new().await;
    let base = |extra: Value| {
        let mut body = json!({ "title": "X", "date": "2025-01-15", "organizer": "A" });
        body.as_object_mut().unwrap().extend(extra.as_object().unwrap().clone());
        body
    };

    for extra in [
        json!({ "date": "15/01/2025" }),
        json!({ "start_time": "25:00" }),
        json!({ "start_time": "10:00", "end_time": "09:00" }),
        json!({ "timezone": "Mars/Olympus" }),
        json!({ "organizer_email": "not-an-email" }),
        json!({ "mode_of_event": "telepathy" }),
        json!({ "mode_of_event": "offline" }),
        json!({ "status": "bogus" }),
        json!({ "duration": -5 }),
        json!({ "max_attendees": "many" }),
    ] {
        let response = app.send_json("POST", "/api/events", base(extra.clone())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {:?}", extra);
    }
}

#[tokio::test]
async fn test_create_event_rejects_malformed_json() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        axum::http::Request::builder()
            .method("POST")
            .uri("/api/events")
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from("{ not json"))
            .unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_aliased_payload_is_accepted() {
    let app = TestApp::new().await;

    let event = app.create_event(json!({
        "name": "Design Sync",
        "date": "2025-02-10",
        "organizer": "Design",
        "startTime": "11:00",
        "endTime": "11:45",
        "mode": "offline",
        "location": "Studio",
        "organizerEmail": "design@company.com",
        "maxAttendees": "8"
    })).await;

    assert_eq!(event["title"], "Design Sync");
    assert_eq!(event["start_time"], "11:00:00");
    assert_eq!(event["end_time"], "11:45:00");
    assert_eq!(event["mode_of_event"], "offline");
    assert_eq!(event["organizer_email"], "design@company.com");
    assert_eq!(event["max_attendees"], 8);
}

#[tokio::test]
async fn test_canonical_key_wins_over_alias() {
    let app = TestApp::new().await;

    let event = app.create_event(json!({
        "title": "Canonical",
        "name": "Alias",
        "date": "2025-02-10",
        "organizer": "A"
    })).await;

    assert_eq!(event["title"], "Canonical");
}

#[tokio::test]
async fn test_created_events_get_distinct_ids() {
    let app = TestApp::new().await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let event = app.create_event(json!({
            "title": format!("Event {}", i),
            "date": "2025-01-20",
            "organizer": "A"
        })).await;
        ids.push(event["id"].as_i64().unwrap());
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn test_list_orders_by_date_then_start_time() {
    let app = TestApp::new().await;

    app.create_event(json!({ "title": "Late", "date": "2025-01-16", "organizer": "A", "start_time": "08:00" })).await;
    app.create_event(json!({ "title": "Untimed", "date": "2025-01-15", "organizer": "A" })).await;
    app.create_event(json!({ "title": "Afternoon", "date": "2025-01-15", "organizer": "A", "start_time": "14:00" })).await;
    app.create_event(json!({ "title": "Morning", "date": "2025-01-15", "organizer": "A", "start_time": "09:00" })).await;

    let response = app.get("/api/events").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 4);
    assert_eq!(titles(&body), vec!["Morning", "Afternoon", "Untimed", "Late"]);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;

    let ai = app.create_event(json!({
        "title": "AI Workshop", "date": "2025-01-10", "organizer": "Research Lab",
        "mode_of_event": "offline", "location": "Lab 1"
    })).await;
    app.create_event(json!({
        "title": "Budget Planning", "description": "Includes an AI forecast", "date": "2025-01-20",
        "organizer": "Finance"
    })).await;
    app.create_event(json!({
        "title": "Offsite", "date": "2025-02-01", "organizer": "HR", "status": "completed"
    })).await;

    let body = parse_body(app.get("/api/events?search=ai").await).await;
    assert_eq!(titles(&body), vec!["AI Workshop", "Budget Planning"]);

    let body = parse_body(app.get("/api/events?status=completed").await).await;
    assert_eq!(titles(&body), vec!["Offsite"]);

    let body = parse_body(app.get("/api/events?mode=offline").await).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], ai["id"]);

    let body = parse_body(app.get("/api/events?organizer=research").await).await;
    assert_eq!(titles(&body), vec!["AI Workshop"]);

    let body = parse_body(app.get("/api/events?date_from=2025-01-01&date_to=2025-01-31").await).await;
    assert_eq!(titles(&body), vec!["AI Workshop", "Budget Planning"]);

    let body = parse_body(app.get("/api/events?date_from=2025-01-15&search=AI").await).await;
    assert_eq!(titles(&body), vec!["Budget Planning"]);

    // Blank filters are ignored.
    let body = parse_body(app.get("/api/events?status=&search=").await).await;
    assert_eq!(body["count"], 3);

    let response = app.get("/api/events?date_from=yesterday").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_event_by_id() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({ "title": "Lookup", "date": "2025-01-15", "organizer": "A" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = app.get(&format!("/api/events/{}", id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["message"], "Event fetched successfully");
    assert_eq!(body["data"], created);

    let response = app.get(&format!("/api/events/{}", id + 1000)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Event not found");
}

#[tokio::test]
async fn test_invalid_ids_are_rejected() {
    let app = TestApp::new().await;

    for uri in ["/api/events/abc", "/api/events/0", "/api/events/-3"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
    }

    let response = app.delete("/api/events/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PATCH", "/api/events/xyz/status", json!({ "status": "live" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({
        "title": "Old Title", "description": "Keep me", "date": "2025-01-15",
        "organizer": "A", "start_time": "09:00", "tags": ["x"]
    })).await;
    let id = created["id"].as_i64().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let response = app.send_json("PUT", &format!("/api/events/{}", id), json!({
        "title": "New Title",
        "description": null
    })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["message"], "Event updated successfully");

    let updated = &body["data"];
    assert_eq!(updated["title"], "New Title");
    assert_eq!(updated["description"], "Keep me");
    assert_eq!(updated["start_time"], created["start_time"]);
    assert_eq!(updated["tags"], created["tags"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    let fetched = parse_body(app.get(&format!("/api/events/{}", id)).await).await;
    assert_eq!(&fetched["data"], updated);
}

#[tokio::test]
async fn test_update_validation_and_missing_event() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({ "title": "T", "date": "2025-01-15", "organizer": "A" })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/events/{}", id);

    let response = app.send_json("PUT", &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PUT", &uri, json!({ "title": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PUT", &uri, json!({ "status": "bogus" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PUT", "/api/events/99999", json!({ "title": "Ghost" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let fetched = parse_body(app.get(&uri).await).await;
    assert_eq!(fetched["data"], created);
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({ "title": "T", "date": "2025-01-15", "organizer": "A" })).await;
    let uri = format!("/api/events/{}/status", created["id"]);

    let response = app.send_json("PATCH", &uri, json!({ "status": "live" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["message"], "Event status updated successfully");
    assert_eq!(body["data"]["status"], "live");
    assert_eq!(body["data"]["title"], "T");

    // Any transition is allowed, including back to upcoming.
    let response = app.send_json("PATCH", &uri, json!({ "status": "upcoming" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send_json("PATCH", &uri, json!({ "status": "bogus" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PATCH", &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = parse_body(app.get(&format!("/api/events/{}", created["id"])).await).await;
    assert_eq!(fetched["data"]["status"], "upcoming");

    let response = app.send_json("PATCH", "/api/events/4242/status", json!({ "status": "cancelled" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_event() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({ "title": "Doomed", "date": "2025-01-15", "organizer": "A" })).await;
    let uri = format!("/api/events/{}", created["id"]);

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["message"], "Event deleted successfully");
    assert_eq!(body["data"]["title"], "Doomed");

    let response = app.get(&uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_date_range_endpoint() {
    let app = TestApp::new().await;

    app.create_event(json!({ "title": "Before", "date": "2024-12-31", "organizer": "A" })).await;
    app.create_event(json!({ "title": "Start", "date": "2025-01-01", "organizer": "A", "start_time": "10:00" })).await;
    app.create_event(json!({ "title": "End", "date": "2025-01-31", "organizer": "A" })).await;
    app.create_event(json!({ "title": "After", "date": "2025-02-01", "organizer": "A" })).await;

    let response = app.get("/api/events/date-range?start_date=2025-01-01&end_date=2025-01-31").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(titles(&body), vec!["Start", "End"]);

    for uri in [
        "/api/events/date-range",
        "/api/events/date-range?start_date=2025-01-01",
        "/api/events/date-range?start_date=2025-01-31&end_date=2025-01-01",
        "/api/events/date-range?start_date=soon&end_date=2025-01-31",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_search_matches_wildcard_characters_literally() {
    let app = TestApp::new().await;

    app.create_event(json!({ "title": "Budget", "date": "2025-01-10", "organizer": "Finance" })).await;
    app.create_event(json!({ "title": "50% Off", "date": "2025-01-11", "organizer": "Sales_Team" })).await;

    let body = parse_body(app.get("/api/events?search=%25").await).await;
    assert_eq!(titles(&body), vec!["50% Off"]);

    let body = parse_body(app.get("/api/events?search=_").await).await;
    assert_eq!(body["count"], 0);

    let body = parse_body(app.get("/api/events?organizer=s_t").await).await;
    assert_eq!(titles(&body), vec!["50% Off"]);

    let body = parse_body(app.get("/api/events?organizer=_").await).await;
    assert_eq!(titles(&body), vec!["50% Off"]);
}

#[tokio::test]
async fn test_filters_ignore_case_for_accented_text() {
    let app = TestApp::new().await;

    app.create_event(json!({ "title": "ÉTÉ Party", "date": "2025-07-01", "organizer": "Ärzte" })).await;
    app.create_event(json!({ "title": "Winter", "date": "2025-12-01", "organizer": "Board" })).await;

    // été
    let body = parse_body(app.get("/api/events?search=%C3%A9t%C3%A9").await).await;
    assert_eq!(titles(&body), vec!["ÉTÉ Party"]);

    // ärzte
    let body = parse_body(app.get("/api/events?organizer=%C3%A4rzte").await).await;
    assert_eq!(titles(&body), vec!["ÉTÉ Party"]);
}

#[tokio::test]
async fn test_whole_number_floats_are_accepted() {
    let app = TestApp::new().await;

    let event = app.create_event(json!({
        "title": "Float", "date": "2025-01-15", "organizer": "A", "duration": 90.0
    })).await;
    assert_eq!(event["duration"], 90);

    let response = app.send_json("POST", "/api/events", json!({
        "title": "Float", "date": "2025-01-15", "organizer": "A", "duration": true
    })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "duration must be an integer");

    let response = app.send_json("POST", "/api/events", json!({
        "title": "Float", "date": "2025-01-15", "organizer": "A", "duration": 90.5
    })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_end_time_is_checked_against_stored_start_time() {
    let app = TestApp::new().await;
    let created = app.create_event(json!({
        "title": "Morning", "date": "2025-01-15", "organizer": "A", "start_time": "09:00"
    })).await;
    let uri = format!("/api/events/{}", created["id"]);

    let response = app.send_json("PUT", &uri, json!({ "end_time": "08:00" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "end_time must not be earlier than start_time");

    let response = app.send_json("PUT", &uri, json!({ "end_time": "10:00" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send_json("PUT", &uri, json!({ "start_time": "11:00" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.send_json("PUT", &uri, json!({ "start_time": "07:00", "end_time": "07:30" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send_json("PUT", "/api/events/9999", json!({ "end_time": "08:00" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
