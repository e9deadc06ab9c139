use crate::api::attendance::{AttendanceCreate, AttendanceResponse};
use crate::api::dashboard::DashboardResponse;
use crate::api::employee::{EmployeeCreate, EmployeeResponse};
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight HR record-keeping API: employees, daily attendance, and
on-demand dashboard counts.

### Key Features
- **Employee Management**
  - Create, list, view, and delete employee records
- **Attendance Tracking**
  - One Present/Absent record per employee per calendar day
- **Dashboard**
  - Live headcount, today's attendance, and departments in use

### Response Format
- JSON-based RESTful responses
- Errors carry a `detail` message (and `field` for validation failures)

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::dashboard::get_dashboard,
        crate::api::dashboard::health_check,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_attendance
    ),
    components(
        schemas(
            EmployeeCreate,
            EmployeeResponse,
            Employee,
            AttendanceCreate,
            AttendanceResponse,
            Attendance,
            AttendanceStatus,
            DashboardResponse
        )
    ),
    tags(
        (name = "Dashboard", description = "Aggregate counts for the dashboard"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Daily attendance APIs"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
