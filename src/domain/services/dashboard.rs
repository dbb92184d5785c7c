use crate::domain::models::dashboard::{
    DashboardOverview, DepartmentHeadcount, DepartmentSlice, HiringBucket, HiringTrend, Kpis,
    Timeframe, WeeklyAttendance, WeeklyAttendanceRow,
};
use crate::domain::ports::DashboardRepository;
use crate::error::AppError;
use chrono::{Duration, NaiveDate};
use tracing::debug;

pub const ALL_DEPARTMENTS: &str = "all";
const ATTENDANCE_WEEKS: i64 = 5;
const FALLBACK_COLOR: &str = "#6b7280";

pub fn department_scope(department: &str) -> Option<&str> {
    let department = department.trim();
    if department.is_empty() || department.eq_ignore_ascii_case(ALL_DEPARTMENTS) {
        None
    } else {
        Some(department)
    }
}

pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn department_color(name: &str) -> &'static str {
    match name {
        "Health" => "#ef4444",
        "Sales" => "#10b981",
        "Marketing" => "#06b6d4",
        "Training" => "#f97316",
        "Design" => "#6366f1",
        "Engineering" => "#8b5cf6",
        "HR" => "#ec4899",
        "Finance" => "#14b8a6",
        _ => FALLBACK_COLOR,
    }
}

pub fn label_buckets(timeframe: Timeframe, buckets: Vec<HiringBucket>) -> Vec<HiringTrend> {
    buckets
        .into_iter()
        .map(|b| HiringTrend {
            period: timeframe.bucket_label(b.bucket),
            hires: b.hires,
            departures: 0,
        })
        .collect()
}

pub async fn build_overview(
    repo: &dyn DashboardRepository,
    timeframe: Timeframe,
    department: &str,
    today: NaiveDate,
) -> Result<DashboardOverview, AppError> {
    let scope = department_scope(department);
    debug!(timeframe = timeframe.as_str(), department = ?scope, "Computing dashboard overview");

    let (headcount, present_today, on_leave, avg_rating, buckets) = tokio::try_join!(
        repo.headcount(scope),
        repo.present_on(today, scope),
        repo.on_leave_on(today, scope),
        repo.average_rating(scope),
        repo.hiring_buckets(timeframe, timeframe.window_start(today), today, scope),
    )?;

    let kpis = Kpis {
        total_employees: headcount.total,
        active_employees: headcount.active,
        present_today,
        attendance_rate: percentage(present_today, headcount.total),
        on_leave,
        on_leave_rate: percentage(on_leave, headcount.total),
        avg_performance: avg_rating.map(round1),
    };

    Ok(DashboardOverview {
        timeframe,
        department: scope.unwrap_or(ALL_DEPARTMENTS).to_string(),
        kpis,
        hiring_trends: label_buckets(timeframe, buckets),
    })
}

pub fn department_slices(rows: Vec<DepartmentHeadcount>) -> Vec<DepartmentSlice> {
    rows.into_iter()
        .map(|row| DepartmentSlice {
            color: department_color(&row.name),
            count: row.employee_count,
            name: row.name,
        })
        .collect()
}

// Start of the attendance window: Monday of the week `ATTENDANCE_WEEKS - 1` weeks back.
pub fn attendance_window_start(today: NaiveDate) -> NaiveDate {
    use chrono::Datelike;
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    monday - Duration::weeks(ATTENDANCE_WEEKS - 1)
}

pub fn label_weeks(rows: Vec<WeeklyAttendanceRow>) -> Vec<WeeklyAttendance> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| WeeklyAttendance {
            week: format!("Week {}", idx + 1),
            week_start: row.week_start,
            attendance: round1(row.attendance_rate),
        })
        .collect()
}
