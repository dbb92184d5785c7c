use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use crate::error::AppError;

pub struct EventId(pub i64);

impl<S> FromRequestParts<S> for EventId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(EventId(id)),
            _ => Err(AppError::Validation(format!("Invalid event id '{}'", raw))),
        }
    }
}
