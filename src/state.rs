use std::sync::Arc;
use crate::domain::ports::{DashboardRepository, DatabaseProbe, EventRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub dashboard_repo: Arc<dyn DashboardRepository>,
    pub db_probe: Arc<dyn DatabaseProbe>,
}
