use crate::domain::ports::DatabaseProbe;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProbe {
    pool: SqlitePool,
}

impl SqliteProbe {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for SqliteProbe {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::Database)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
