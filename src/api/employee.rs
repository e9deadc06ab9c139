use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::attendance::AttendanceStatus;
use crate::model::employee::Employee;
use crate::store;
use crate::store::employee::NewEmployee;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

#[derive(Deserialize, Serialize, ToSchema)]
pub struct EmployeeCreate {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(
        example = "2024-01-01T09:00:00Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: DateTime<Utc>,
    #[schema(example = 12)]
    pub total_present: i64,
    #[schema(example = 3)]
    pub total_absent: i64,
}

impl EmployeeCreate {
    /// Normalize and check every field; the email is lower-cased before the
    /// uniqueness check so lookups stay case-insensitive.
    fn validate(&self) -> Result<NewEmployee, ApiError> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err(ApiError::validation("employee_id", "Employee ID is required"));
        }

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            return Err(ApiError::validation("full_name", "Full name is required"));
        }

        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApiError::validation("email", "Email is required"));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(ApiError::validation("email", "Invalid email format"));
        }

        let department = self.department.trim();
        if department.is_empty() {
            return Err(ApiError::validation("department", "Department is required"));
        }

        Ok(NewEmployee {
            employee_id: employee_id.to_string(),
            full_name: full_name.to_string(),
            email,
            department: department.to_string(),
        })
    }
}

/// Attach the live present/absent counts; they are computed per request,
/// never stored.
async fn with_counts(pool: &SqlitePool, employee: Employee) -> Result<EmployeeResponse, ApiError> {
    let total_present =
        store::attendance::count_attendance(pool, &employee.employee_id, AttendanceStatus::Present)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = %employee.employee_id, "Failed to count attendance");
                ApiError::from(e)
            })?;

    let total_absent =
        store::attendance::count_attendance(pool, &employee.employee_id, AttendanceStatus::Absent)
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = %employee.employee_id, "Failed to count attendance");
                ApiError::from(e)
            })?;

    Ok(EmployeeResponse {
        id: employee.id,
        employee_id: employee.employee_id,
        full_name: employee.full_name,
        email: employee.email,
        department: employee.department,
        created_at: employee.created_at,
        total_present,
        total_absent,
    })
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeCreate,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 409, description = "Duplicate employee ID or email", body = Object, example = json!({
            "detail": "Employee with ID 'EMP-001' already exists"
        })),
        (status = 422, description = "Validation failed", body = Object, example = json!({
            "detail": "Invalid email format",
            "field": "email"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<EmployeeCreate>,
) -> Result<HttpResponse, ApiError> {
    let new = payload.validate()?;

    // Duplicate checks in a fixed order: employee_id first, then email.
    let existing = store::employee::get_employee(pool.get_ref(), &new.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %new.employee_id, "Failed to check employee id");
            ApiError::from(e)
        })?;
    if existing.is_some() {
        return Err(ApiError::conflict(format!(
            "Employee with ID '{}' already exists",
            new.employee_id
        )));
    }

    let email_taken = store::employee::email_exists(pool.get_ref(), &new.email)
        .await
        .map_err(|e| {
            error!(error = %e, email = %new.email, "Failed to check email");
            ApiError::from(e)
        })?;
    if email_taken {
        return Err(ApiError::conflict(format!(
            "Employee with email '{}' already exists",
            new.email
        )));
    }

    let employee = store::employee::insert_employee(pool.get_ref(), &new)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %new.employee_id, "Failed to insert employee");
            ApiError::from(e)
        })?;

    let response = with_counts(pool.get_ref(), employee).await?;

    Ok(HttpResponse::Created().json(response))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [EmployeeResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = store::employee::list_employees(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employees");
            ApiError::from(e)
        })?;

    let mut result = Vec::with_capacity(employees.len());
    for employee in employees {
        result.push(with_counts(pool.get_ref(), employee).await?);
    }

    Ok(HttpResponse::Ok().json(result))
}

/// Get Employee
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Caller-assigned employee identifier")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
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

    let response = with_counts(pool.get_ref(), employee).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Caller-assigned employee identifier")
    ),
    responses(
        (status = 200, description = "Employee and attendance records deleted", body = Object, example = json!({
            "message": "Employee 'EMP-001' deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee with ID 'EMP-001' not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let deleted = store::employee::delete_employee(pool.get_ref(), &employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, %employee_id, "Failed to delete employee");
            ApiError::from(e)
        })?;

    if deleted == 0 {
        return Err(ApiError::not_found(format!(
            "Employee with ID '{}' not found",
            employee_id
        )));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("Employee '{}' deleted successfully", employee_id)
    })))
}
