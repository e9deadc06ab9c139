use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::model::attendance::AttendanceStatus;
use crate::store;
use crate::store::attendance::NewAttendance;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct AttendanceCreate {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-06-01", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "2024-06-01")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
    #[schema(example = "John Doe")]
    pub employee_name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub date_to: Option<String>,
}

impl AttendanceCreate {
    /// Normalize and check every field. The date must be a real calendar
    /// date and is re-formatted to the zero-padded 10-character form the
    /// store keys on; the status must match a variant name exactly.
    fn validate(&self) -> Result<NewAttendance, ApiError> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err(ApiError::validation("employee_id", "Employee ID is required"));
        }

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ApiError::validation("date", "Date is required"));
        }
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| ApiError::validation("date", "Date must be in YYYY-MM-DD format"))?;

        let status = self.status.trim();
        if status.is_empty() {
            return Err(ApiError::validation("status", "Status is required"));
        }
        let status = status
            .parse::<AttendanceStatus>()
            .map_err(|_| ApiError::validation("status", "Status must be 'Present' or 'Absent'"))?;

        Ok(NewAttendance {
            employee_id: employee_id.to_string(),
            date: parsed.format("%Y-%m-%d").to_string(),
            status,
        })
    }
}

/// Mark Attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = AttendanceCreate,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 'EMP-001' not found"
        })),
        (status = 409, description = "Attendance already marked for this day", body = Object, example = json!({
            "detail": "Attendance already marked for employee 'EMP-001' on 2024-06-01"
        })),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "detail": "Status must be 'Present' or 'Absent'",
            "field": "status"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<AttendanceCreate>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.validate()?;

    let employee = store::employee::get_employee(pool.get_ref(), &new.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %new.employee_id, "Failed to fetch employee");
            ApiError::from(e)
        })?
        .ok_or_else(|| {
            ApiError::not_found(format!("Employee with ID '{}' not found", new.employee_id))
        })?;

    // One status per employee per day, no overwrite.
    let already_marked =
        store::attendance::attendance_exists(pool.get_ref(), &new.employee_id, &new.date)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = %new.employee_id, "Failed to check attendance");
                ApiError::from(e)
            })?;
    if already_marked {
        return Err(ApiError::conflict(format!(
            "Attendance already marked for employee '{}' on {}",
            new.employee_id, new.date
        )));
    }

    let record = store::attendance::insert_attendance(pool.get_ref(), &new)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %new.employee_id, date = %new.date, "Failed to insert attendance");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Created().json(AttendanceResponse {
        id: record.id,
        employee_id: record.employee_id,
        date: record.date,
        status: record.status,
        employee_name: employee.full_name,
    }))
}

/// Get Attendance
#[utoipa::path(
    get,
    path = "/api/attendance/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Caller-assigned employee identifier"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Attendance records, newest first", body = [AttendanceResponse]),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let employee = store::employee::get_employee(pool.get_ref(), &employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, %employee_id, "Failed to fetch employee");
            ApiError::from(e)
        })?
        .ok_or_else(|| {
            ApiError::not_found(format!("Employee with ID '{}' not found", employee_id))
        })?;

    let records = store::attendance::list_attendance(
        pool.get_ref(),
        &employee_id,
        query.date_from.as_deref(),
        query.date_to.as_deref(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, %employee_id, "Failed to fetch attendance");
        ApiError::from(e)
    })?;

    let response: Vec<AttendanceResponse> = records
        .into_iter()
        .map(|r| AttendanceResponse {
            id: r.id,
            employee_id: r.employee_id,
            date: r.date,
            status: r.status,
            employee_name: employee.full_name.clone(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}
