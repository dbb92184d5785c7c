use axum::{extract::State, response::IntoResponse};
use crate::api::dtos::{requests::DashboardQuery, responses::ApiResponse};
use crate::api::extractors::payload::ApiQuery;
use crate::domain::services::dashboard::{
    attendance_window_start, build_overview, department_slices, label_weeks, round1, ALL_DEPARTMENTS,
};
use crate::error::AppError;
use crate::state::AppState;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn get_dashboard_data(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let timeframe = query.timeframe()?;
    let department = query.department.as_deref().unwrap_or(ALL_DEPARTMENTS);
    info!("Fetching dashboard data for timeframe: {}, department: {}", timeframe.as_str(), department);

    let today = Utc::now().date_naive();
    let overview = build_overview(state.dashboard_repo.as_ref(), timeframe, department, today).await?;
    Ok(ApiResponse::ok(overview, "Dashboard data fetched successfully"))
}

pub async fn get_employees(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let employees = state.dashboard_repo.list_employees().await?;
    Ok(ApiResponse::list(employees, "Employees data fetched successfully"))
}

pub async fn get_departments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.dashboard_repo.department_headcounts().await?;
    Ok(ApiResponse::list(department_slices(rows), "Departments data fetched successfully"))
}

pub async fn get_attendance(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let since = attendance_window_start(Utc::now().date_naive());
    let rows = state.dashboard_repo.weekly_attendance(since).await?;
    Ok(ApiResponse::list(label_weeks(rows), "Attendance data fetched successfully"))
}

pub async fn get_performance(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let mut rows = state.dashboard_repo.performance_by_department().await?;
    for row in &mut rows {
        row.performance = round1(row.performance);
    }
    Ok(ApiResponse::list(rows, "Performance data fetched successfully"))
}
