#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::web::Data;
use actix_web::{App, Error, test};
use serde_json::Value;
use sqlx::SqlitePool;

use hrms_lite::config::Config;
use hrms_lite::{db, routes};

pub async fn test_pool() -> SqlitePool {
    db::init_db("sqlite::memory:")
        .await
        .expect("in-memory database should initialize")
}

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        database_url: "sqlite::memory:".to_string(),
        api_prefix: "/api".to_string(),
    }
}

pub async fn init_app(
    pool: SqlitePool,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(Data::new(pool))
            .configure(|cfg| routes::configure(cfg, test_config())),
    )
    .await
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    test::call_service(app, req).await
}

pub async fn get<S>(app: &S, uri: &str) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await
}

pub async fn delete<S>(app: &S, uri: &str) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    test::call_service(app, test::TestRequest::delete().uri(uri).to_request()).await
}

/// Create an employee through the API, asserting success.
pub async fn create_employee<S>(app: &S, employee_id: &str, email: &str, department: &str)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = post_json(
        app,
        "/api/employees",
        serde_json::json!({
            "employee_id": employee_id,
            "full_name": format!("Employee {employee_id}"),
            "email": email,
            "department": department
        }),
    )
    .await;
    assert_eq!(resp.status(), 201, "employee {employee_id} should be created");
}

/// Mark attendance through the API, asserting success.
pub async fn mark_attendance<S>(app: &S, employee_id: &str, date: &str, status: &str)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = post_json(
        app,
        "/api/attendance",
        serde_json::json!({
            "employee_id": employee_id,
            "date": date,
            "status": status
        }),
    )
    .await;
    assert_eq!(
        resp.status(),
        201,
        "attendance for {employee_id} on {date} should be created"
    );
}
