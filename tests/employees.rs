mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

#[actix_web::test]
async fn create_employee_returns_enriched_record() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    let resp = common::post_json(
        &app,
        "/api/employees",
        json!({
            "employee_id": "E1",
            "full_name": "  Alice Smith  ",
            "email": "Alice@X.COM",
            "department": "Engineering"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["employee_id"], "E1");
    assert_eq!(body["full_name"], "Alice Smith");
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(body["department"], "Engineering");
    assert_eq!(body["total_present"], 0);
    assert_eq!(body["total_absent"], 0);
    assert!(body["id"].as_i64().unwrap() >= 1);
    assert!(body["created_at"].is_string());
}

#[actix_web::test]
async fn duplicate_employee_id_conflicts() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    common::create_employee(&app, "E1", "first@x.com", "Engineering").await;

    let resp = common::post_json(
        &app,
        "/api/employees",
        json!({
            "employee_id": "E1",
            "full_name": "Someone Else",
            "email": "second@x.com",
            "department": "HR"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with ID 'E1' already exists");
}

#[actix_web::test]
async fn duplicate_email_conflicts() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    common::create_employee(&app, "E1", "shared@x.com", "Engineering").await;

    let resp = common::post_json(
        &app,
        "/api/employees",
        json!({
            "employee_id": "E2",
            "full_name": "Someone Else",
            "email": "SHARED@x.com",
            "department": "HR"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with email 'shared@x.com' already exists");
}

#[actix_web::test]
async fn employee_id_check_runs_before_email_check() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    common::create_employee(&app, "E1", "taken@x.com", "Engineering").await;

    // Both keys collide; the id conflict is the one reported.
    let resp = common::post_json(
        &app,
        "/api/employees",
        json!({
            "employee_id": "E1",
            "full_name": "Someone Else",
            "email": "taken@x.com",
            "department": "HR"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with ID 'E1' already exists");
}

#[actix_web::test]
async fn invalid_email_is_rejected_before_any_mutation() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    let resp = common::post_json(
        &app,
        "/api/employees",
        json!({
            "employee_id": "E1",
            "full_name": "Alice",
            "email": "not-an-email",
            "department": "Engineering"
        }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "email");
    assert_eq!(body["detail"], "Invalid email format");

    // Nothing was persisted.
    let resp = common::get(&app, "/api/employees").await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn blank_fields_are_rejected_with_field_messages() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    let cases = [
        (json!({"employee_id": "  ", "full_name": "A", "email": "a@x.com", "department": "Eng"}), "employee_id"),
        (json!({"employee_id": "E1", "full_name": "", "email": "a@x.com", "department": "Eng"}), "full_name"),
        (json!({"employee_id": "E1", "full_name": "A", "email": "   ", "department": "Eng"}), "email"),
        (json!({"employee_id": "E1", "full_name": "A", "email": "a@x.com", "department": " "}), "department"),
    ];

    for (payload, field) in cases {
        let resp = common::post_json(&app, "/api/employees", payload).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["field"], field);
    }
}

#[actix_web::test]
async fn list_employees_orders_newest_first() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    common::create_employee(&app, "E1", "e1@x.com", "Engineering").await;
    common::create_employee(&app, "E2", "e2@x.com", "HR").await;
    common::create_employee(&app, "E3", "e3@x.com", "Finance").await;

    let resp = common::get(&app, "/api/employees").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["employee_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["E3", "E2", "E1"]);
}

#[actix_web::test]
async fn get_missing_employee_returns_404() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    let resp = common::get(&app, "/api/employees/E99").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Employee with ID 'E99' not found");
}

#[actix_web::test]
async fn delete_missing_employee_returns_404() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    let resp = common::delete(&app, "/api/employees/E99").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_employee_cascades_to_attendance() {
    let pool = common::test_pool().await;
    let app = common::init_app(pool).await;

    common::create_employee(&app, "E1", "e1@x.com", "Engineering").await;
    common::create_employee(&app, "E2", "e2@x.com", "Engineering").await;
    common::mark_attendance(&app, "E1", "2024-06-01", "Present").await;
    common::mark_attendance(&app, "E1", "2024-06-02", "Absent").await;
    common::mark_attendance(&app, "E2", "2024-06-01", "Present").await;

    let resp = common::delete(&app, "/api/employees/E1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee 'E1' deleted successfully");

    // Employee and its attendance are gone.
    let resp = common::get(&app, "/api/employees/E1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let resp = common::get(&app, "/api/attendance/E1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The other employee's records are untouched.
    let resp = common::get(&app, "/api/attendance/E2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let resp = common::get(&app, "/api/dashboard").await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_employees"], 1);
}
