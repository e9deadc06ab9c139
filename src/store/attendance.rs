use sqlx::SqlitePool;

use crate::model::attendance::{Attendance, AttendanceStatus};

/// Validated attendance input: `date` is already normalized to the
/// zero-padded `YYYY-MM-DD` form.
#[derive(Debug)]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: String,
    pub status: AttendanceStatus,
}

/// Insert one day's status for one employee. A second record for the same
/// (employee_id, date) pair fails on the UNIQUE constraint.
pub async fn insert_attendance(
    pool: &SqlitePool,
    new: &NewAttendance,
) -> Result<Attendance, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&new.employee_id)
    .bind(&new.date)
    .bind(new.status)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendance WHERE id = ?",
    )
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
}

pub async fn attendance_exists(
    pool: &SqlitePool,
    employee_id: &str,
    date: &str,
) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ?")
            .bind(employee_id)
            .bind(date)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

pub async fn count_attendance(
    pool: &SqlitePool,
    employee_id: &str,
    status: AttendanceStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = ?")
        .bind(employee_id)
        .bind(status)
        .fetch_one(pool)
        .await
}

/// One employee's records, newest first, with optional inclusive bounds.
/// Lexicographic comparison is date order because the stored dates are
/// zero-padded ISO strings.
pub async fn list_attendance(
    pool: &SqlitePool,
    employee_id: &str,
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Result<Vec<Attendance>, sqlx::Error> {
    let mut where_sql = String::from(" WHERE employee_id = ?");

    if date_from.is_some() {
        where_sql.push_str(" AND date >= ?");
    }
    if date_to.is_some() {
        where_sql.push_str(" AND date <= ?");
    }

    let sql = format!(
        "SELECT id, employee_id, date, status FROM attendance{} ORDER BY date DESC",
        where_sql
    );

    let mut query = sqlx::query_as::<_, Attendance>(&sql).bind(employee_id);
    if let Some(from) = date_from {
        query = query.bind(from);
    }
    if let Some(to) = date_to {
        query = query.bind(to);
    }

    query.fetch_all(pool).await
}

/// Dashboard count: records with the given status on one calendar day,
/// across all employees.
pub async fn count_attendance_on(
    pool: &SqlitePool,
    date: &str,
    status: AttendanceStatus,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?")
        .bind(date)
        .bind(status)
        .fetch_one(pool)
        .await
}
