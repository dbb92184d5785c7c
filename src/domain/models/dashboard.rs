use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Quarter => "quarter",
            Timeframe::Year => "year",
        }
    }

    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        let months_back = match self {
            Timeframe::Week => return today - Duration::days(6),
            Timeframe::Month => 6,
            Timeframe::Quarter => 12,
            Timeframe::Year => 60,
        };
        today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Human label for a bucket key produced by the repository.
    ///
    /// Keys are: day of week (0 = Sunday) for `Week`, `year * 100 + month` for
    /// `Month`, `year * 10 + quarter` for `Quarter` and the plain year for `Year`.
    pub fn bucket_label(&self, key: i64) -> String {
        match self {
            Timeframe::Week => WEEKDAYS
                .get(key.rem_euclid(7) as usize)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            Timeframe::Month => {
                let month = key.rem_euclid(100);
                MONTHS
                    .get((month - 1).clamp(0, 11) as usize)
                    .map(|m| m.to_string())
                    .unwrap_or_default()
            }
            Timeframe::Quarter => format!("Q{} {}", key.rem_euclid(10), key / 10),
            Timeframe::Year => key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct Headcount {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct HiringBucket {
    pub bucket: i64,
    pub hires: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HiringTrend {
    pub period: String,
    pub hires: i64,
    pub departures: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Kpis {
    pub total_employees: i64,
    pub active_employees: i64,
    pub present_today: i64,
    pub attendance_rate: f64,
    pub on_leave: i64,
    pub on_leave_rate: f64,
    pub avg_performance: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub timeframe: Timeframe,
    pub department: String,
    pub kpis: Kpis,
    pub hiring_trends: Vec<HiringTrend>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeSummary {
    pub id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub employee_type: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Option<f64>,
    pub status: String,
    pub department_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentHeadcount {
    pub name: String,
    pub employee_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentSlice {
    pub name: String,
    pub count: i64,
    pub color: &'static str,
}

#[derive(Debug, Clone, FromRow)]
pub struct WeeklyAttendanceRow {
    pub week_start: NaiveDate,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyAttendance {
    pub week: String,
    pub week_start: NaiveDate,
    pub attendance: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DepartmentPerformance {
    pub department: String,
    pub performance: f64,
}
