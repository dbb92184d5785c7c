use crate::domain::{
    models::dashboard::{
        DepartmentHeadcount, DepartmentPerformance, EmployeeSummary, Headcount, HiringBucket,
        Timeframe, WeeklyAttendanceRow,
    },
    ports::DashboardRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, PgPool, Postgres};

pub struct PostgresDashboardRepo {
    pool: PgPool,
}

impl PostgresDashboardRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bucket_expr(timeframe: Timeframe) -> &'static str {
    match timeframe {
        Timeframe::Week => "EXTRACT(DOW FROM hire_date)::BIGINT",
        Timeframe::Month => {
            "(EXTRACT(YEAR FROM hire_date) * 100 + EXTRACT(MONTH FROM hire_date))::BIGINT"
        }
        Timeframe::Quarter => {
            "(EXTRACT(YEAR FROM hire_date) * 10 + EXTRACT(QUARTER FROM hire_date))::BIGINT"
        }
        Timeframe::Year => "EXTRACT(YEAR FROM hire_date)::BIGINT",
    }
}

fn push_employee_scope(qb: &mut QueryBuilder<'_, Postgres>, department: Option<&str>) {
    if let Some(name) = department {
        qb.push(" AND employee_id IN (SELECT id FROM employees WHERE department_id = (SELECT id FROM departments WHERE name = ")
            .push_bind(name.to_string())
            .push("))");
    }
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepo {
    async fn headcount(&self, department: Option<&str>) -> Result<Headcount, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS total, COUNT(CASE WHEN status = 'Active' THEN 1 END) AS active FROM employees",
        );
        if let Some(name) = department {
            qb.push(" WHERE department_id = (SELECT id FROM departments WHERE name = ")
                .push_bind(name.to_string())
                .push(")");
        }

        qb.build_query_as::<Headcount>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn present_on(&self, day: NaiveDate, department: Option<&str>) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM attendance WHERE status = 'Present' AND date = ",
        );
        qb.push_bind(day);
        push_employee_scope(&mut qb, department);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn on_leave_on(&self, day: NaiveDate, department: Option<&str>) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM leave_requests WHERE status = 'Approved' AND start_date <= ",
        );
        qb.push_bind(day).push(" AND end_date >= ").push_bind(day);
        push_employee_scope(&mut qb, department);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn average_rating(&self, department: Option<&str>) -> Result<Option<f64>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT AVG(overall_rating)::FLOAT8 FROM performance_reviews WHERE status = 'Completed'",
        );
        push_employee_scope(&mut qb, department);

        qb.build_query_scalar::<Option<f64>>()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn hiring_buckets(
        &self,
        timeframe: Timeframe,
        from: NaiveDate,
        to: NaiveDate,
        department: Option<&str>,
    ) -> Result<Vec<HiringBucket>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(bucket_expr(timeframe))
            .push(" AS bucket, COUNT(*) AS hires FROM employees WHERE hire_date >= ")
            .push_bind(from)
            .push(" AND hire_date <= ")
            .push_bind(to);
        if let Some(name) = department {
            qb.push(" AND department_id = (SELECT id FROM departments WHERE name = ")
                .push_bind(name.to_string())
                .push(")");
        }
        qb.push(" GROUP BY bucket ORDER BY bucket");

        qb.build_query_as::<HiringBucket>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeSummary>, AppError> {
        sqlx::query_as::<_, EmployeeSummary>(
            r#"SELECT e.id, e.employee_id, e.first_name, e.last_name, e.email, e.phone,
                      e.position, e.employee_type, e.hire_date, e.salary, e.status,
                      d.name AS department_name, e.created_at
               FROM employees e
               LEFT JOIN departments d ON e.department_id = d.id
               ORDER BY e.created_at DESC, e.id DESC"#,
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn department_headcounts(&self) -> Result<Vec<DepartmentHeadcount>, AppError> {
        sqlx::query_as::<_, DepartmentHeadcount>(
            r#"SELECT d.name, COUNT(e.id) AS employee_count
               FROM departments d
               LEFT JOIN employees e ON d.id = e.department_id AND e.status = 'Active'
               GROUP BY d.id, d.name
               ORDER BY employee_count DESC, d.name ASC"#,
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn weekly_attendance(&self, since: NaiveDate) -> Result<Vec<WeeklyAttendanceRow>, AppError> {
        sqlx::query_as::<_, WeeklyAttendanceRow>(
            r#"SELECT DATE_TRUNC('week', date)::DATE AS week_start,
                      (AVG(CASE WHEN status = 'Present' THEN 1.0 ELSE 0.0 END) * 100)::FLOAT8 AS attendance_rate
               FROM attendance
               WHERE date >= $1
               GROUP BY 1
               ORDER BY 1"#,
        )
            .bind(since)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn performance_by_department(&self) -> Result<Vec<DepartmentPerformance>, AppError> {
        sqlx::query_as::<_, DepartmentPerformance>(
            r#"SELECT d.name AS department, AVG(pr.overall_rating)::FLOAT8 AS performance
               FROM performance_reviews pr
               JOIN employees e ON pr.employee_id = e.id
               JOIN departments d ON e.department_id = d.id
               WHERE pr.status = 'Completed'
               GROUP BY d.name
               ORDER BY performance DESC"#,
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
