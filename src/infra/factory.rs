use crate::config::Config;
use crate::error::AppError;
use crate::infra::repositories::{
    postgres_dashboard_repo::PostgresDashboardRepo, postgres_event_repo::PostgresEventRepo,
    postgres_probe::PostgresProbe, sqlite_dashboard_repo::SqliteDashboardRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_probe::SqliteProbe,
};
use crate::state::AppState;
use sqlx::{
    postgres::{PgConnectOptions, PgPool, PgPoolOptions},
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    ConnectOptions,
};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, log::LevelFilter};

pub fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    if is_postgres_url(database_url) {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;
        Ok(postgres_state(config, pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;
        Ok(sqlite_state(config, pool))
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    AppState {
        config: config.clone(),
        event_repo: Arc::new(PostgresEventRepo::new(pool.clone())),
        dashboard_repo: Arc::new(PostgresDashboardRepo::new(pool.clone())),
        db_probe: Arc::new(PostgresProbe::new(pool)),
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    AppState {
        config: config.clone(),
        event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
        dashboard_repo: Arc::new(SqliteDashboardRepo::new(pool.clone())),
        db_probe: Arc::new(SqliteProbe::new(pool)),
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    info!("PostgreSQL migrations applied");
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    info!("SQLite migrations applied");
    Ok(())
}
