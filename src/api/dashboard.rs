use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::attendance::AttendanceStatus;
use crate::store;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = 42)]
    pub total_employees: i64,
    #[schema(example = 30)]
    pub present_today: i64,
    #[schema(example = 5)]
    pub absent_today: i64,
    #[schema(example = json!(["Engineering", "HR"]))]
    pub departments: Vec<String>,
}

/// Dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Aggregate counts, computed on demand", body = DashboardResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let total_employees = store::employee::count_employees(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count employees");
            ApiError::from(e)
        })?;

    // The server's local calendar date, computed once per call.
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let present_today =
        store::attendance::count_attendance_on(pool.get_ref(), &today, AttendanceStatus::Present)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count today's attendance");
                ApiError::from(e)
            })?;

    let absent_today =
        store::attendance::count_attendance_on(pool.get_ref(), &today, AttendanceStatus::Absent)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to count today's attendance");
                ApiError::from(e)
            })?;

    let departments = store::employee::distinct_departments(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch departments");
            ApiError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(DashboardResponse {
        total_employees,
        present_today,
        absent_today,
        departments,
    }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "healthy",
            "message": "HRMS Lite API is running"
        }))
    ),
    tag = "Health"
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "message": "HRMS Lite API is running"
    }))
}
