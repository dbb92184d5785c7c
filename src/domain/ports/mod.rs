use crate::domain::models::{
    dashboard::{
        DepartmentHeadcount, DepartmentPerformance, EmployeeSummary, Headcount, HiringBucket,
        Timeframe, WeeklyAttendanceRow,
    },
    event::{Event, EventChanges, EventFilter, EventStatus, NewEvent},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &NewEvent) -> Result<Event, AppError>;
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn update(&self, id: i64, changes: &EventChanges) -> Result<Option<Event>, AppError>;
    async fn update_status(&self, id: i64, status: EventStatus) -> Result<Option<Event>, AppError>;
    async fn delete(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn list_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>, AppError>;
}

/// Read-only aggregates over the HR tables. `department` is a department
/// name; `None` means the whole organisation.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn headcount(&self, department: Option<&str>) -> Result<Headcount, AppError>;
    async fn present_on(&self, day: NaiveDate, department: Option<&str>) -> Result<i64, AppError>;
    async fn on_leave_on(&self, day: NaiveDate, department: Option<&str>) -> Result<i64, AppError>;
    async fn average_rating(&self, department: Option<&str>) -> Result<Option<f64>, AppError>;
    async fn hiring_buckets(
        &self,
        timeframe: Timeframe,
        from: NaiveDate,
        to: NaiveDate,
        department: Option<&str>,
    ) -> Result<Vec<HiringBucket>, AppError>;
    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>, AppError>;
    async fn department_headcounts(&self) -> Result<Vec<DepartmentHeadcount>, AppError>;
    async fn weekly_attendance(&self, since: NaiveDate) -> Result<Vec<WeeklyAttendanceRow>, AppError>;
    async fn performance_by_department(&self) -> Result<Vec<DepartmentPerformance>, AppError>;
}

#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
    fn backend(&self) -> &'static str;
}
