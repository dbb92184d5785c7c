use crate::domain::{
    models::event::{Event, EventChanges, EventFilter, EventStatus, NewEvent},
    ports::EventRepository,
};
use crate::error::AppError;
use crate::infra::repositories::{contains_pattern, LIKE_ESCAPE};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{types::Json, QueryBuilder, PgPool, Postgres};

const ORDER_BY: &str = " ORDER BY date ASC, start_time ASC NULLS LAST, id ASC";

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &EventFilter) {
    let mut sep = " WHERE ";

    if let Some(status) = &filter.status {
        qb.push(sep).push("status = ").push_bind(status.clone());
        sep = " AND ";
    }
    if let Some(mode) = &filter.mode {
        qb.push(sep).push("mode_of_event = ").push_bind(mode.clone());
        sep = " AND ";
    }
    if let Some(organizer) = &filter.organizer {
        qb.push(sep)
            .push("organizer ILIKE ")
            .push_bind(contains_pattern(organizer))
            .push(LIKE_ESCAPE);
        sep = " AND ";
    }
    if let Some(from) = filter.date_from {
        qb.push(sep).push("date >= ").push_bind(from);
        sep = " AND ";
    }
    if let Some(to) = filter.date_to {
        qb.push(sep).push("date <= ").push_bind(to);
        sep = " AND ";
    }
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(search);
        qb.push(sep)
            .push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(LIKE_ESCAPE)
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(LIKE_ESCAPE)
            .push(")");
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &NewEvent) -> Result<Event, AppError> {
        let now = Utc::now();
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                title, description, organizer, organizer_email, date, start_time, end_time,
                duration, timezone, mode_of_event, meeting_link, location, status,
                max_attendees, tags, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *"#,
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.organizer)
            .bind(&event.organizer_email)
            .bind(event.date)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(event.duration)
            .bind(&event.timezone)
            .bind(event.mode_of_event.as_str())
            .bind(&event.meeting_link)
            .bind(&event.location)
            .bind(event.status.as_str())
            .bind(event.max_attendees)
            .bind(Json(&event.tags))
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM events");
        push_filters(&mut qb, filter);
        qb.push(ORDER_BY);

        qb.build_query_as::<Event>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>, AppError> {
        if changes.is_empty() {
            return Err(AppError::Validation("No data provided for update".into()));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE events SET ");
        let mut set = qb.separated(", ");

        if let Some(v) = &changes.title { set.push("title = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = &changes.description { set.push("description = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = &changes.organizer { set.push("organizer = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = &changes.organizer_email { set.push("organizer_email = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = changes.date { set.push("date = ").push_bind_unseparated(v); }
        if let Some(v) = changes.start_time { set.push("start_time = ").push_bind_unseparated(v); }
        if let Some(v) = changes.end_time { set.push("end_time = ").push_bind_unseparated(v); }
        if let Some(v) = changes.duration { set.push("duration = ").push_bind_unseparated(v); }
        if let Some(v) = &changes.timezone { set.push("timezone = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = changes.mode_of_event { set.push("mode_of_event = ").push_bind_unseparated(v.as_str()); }
        if let Some(v) = &changes.meeting_link { set.push("meeting_link = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = &changes.location { set.push("location = ").push_bind_unseparated(v.clone()); }
        if let Some(v) = changes.status { set.push("status = ").push_bind_unseparated(v.as_str()); }
        if let Some(v) = changes.max_attendees { set.push("max_attendees = ").push_bind_unseparated(v); }
        if let Some(v) = &changes.tags { set.push("tags = ").push_bind_unseparated(Json(v.clone())); }
        set.push("updated_at = ").push_bind_unseparated(Utc::now());

        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Event>()
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_status(&self, id: i64, status: EventStatus) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: i64) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("DELETE FROM events WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>, AppError> {
        let sql = format!("SELECT * FROM events WHERE date BETWEEN $1 AND $2{}", ORDER_BY);
        sqlx::query_as::<_, Event>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
