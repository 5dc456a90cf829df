//! End-to-end tests of the REST API over an in-memory database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use portfolio_core::clock::FixedClock;
use portfolio_core::ProjectService;
use portfolio_web::{create_router, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let db = portfolio_db::init_memory_pool().unwrap();
    let service = ProjectService::new(db.clone(), db.clone())
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
    create_router(AppState::with_service(db, service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_member(app: &Router, name: &str, role: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/members",
        Some(json!({ "name": name, "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn project_body(manager: i64, staff: &[i64]) -> Value {
    json!({
        "name": "Apollo",
        "start_date": "2024-01-01",
        "planned_end_date": "2024-02-01",
        "budget": 50000.0,
        "description": "Moon shot",
        "manager_id": manager,
        "staff": staff,
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_member_endpoints() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    create_member(&app, "Bruno", "STAFF").await;

    let (status, body) = send(&app, "GET", &format!("/api/members/{}", manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "manager");

    let (_, body) = send(&app, "GET", "/api/members/role/staff", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Bruno");

    let (status, body) = send(
        &app,
        "POST",
        "/api/members",
        Some(json!({ "name": "Caio", "role": "intern" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = send(&app, "GET", "/api/members/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/members", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana", "Bruno"]);
}

#[tokio::test]
async fn test_malformed_ids_get_json_errors() {
    let app = test_app();

    for (method, uri) in [
        ("GET", "/api/projects/abc"),
        ("DELETE", "/api/projects/abc"),
        ("GET", "/api/members/abc"),
        ("POST", "/api/projects/1/members/xyz"),
    ] {
        let (status, body) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_remove_member_endpoint() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    let first = create_member(&app, "Bruno", "staff").await;
    let second = create_member(&app, "Carla", "staff").await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/projects",
        Some(project_body(manager, &[first, second])),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/projects/{}/members/{}", id, first),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staff_ids"], json!([second]));

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/projects/{}/members/{}", id, second),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "minimum_staff_violation");
}

#[tokio::test]
async fn test_project_lifecycle() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    let staff = create_member(&app, "Bruno", "staff").await;
    let other = create_member(&app, "Carla", "staff").await;

    let (status, created) = send(&app, "POST", "/api/projects", Some(project_body(manager, &[staff]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "under_review");
    assert_eq!(created["risk"], "low");
    assert_eq!(created["manager"]["id"], manager);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/projects/{}/members/{}", id, other),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staff_ids"], json!([staff, other]));

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/projects/{}/status", id),
        Some(json!({ "status": "review_approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_transition");

    for next in ["review_done", "review_approved", "started", "planned", "in_progress", "closed"] {
        let (status, body) = send(
            &app,
            "PATCH",
            &format!("/api/projects/{}/status", id),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    let (_, body) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
    assert_eq!(body["actual_end_date"], "2024-06-30");

    let (status, body) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "deletion_forbidden");

    let (_, report) = send(&app, "GET", "/api/projects/report", None).await;
    assert_eq!(report["counts_by_status"]["closed"], 1);
    assert_eq!(report["distinct_staff_count"], 2);
}

#[tokio::test]
async fn test_create_rejections() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    let staff = create_member(&app, "Bruno", "staff").await;

    let (status, body) = send(&app, "POST", "/api/projects", Some(project_body(manager, &[]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "empty_staff_list");

    let (status, body) = send(&app, "POST", "/api/projects", Some(project_body(staff, &[staff]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "role_mismatch");

    let (status, body) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({ "name": "No dates", "manager_id": manager, "staff": [staff] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let mut without_staff = project_body(manager, &[staff]);
    without_staff.as_object_mut().unwrap().remove("staff");
    let (status, body) = send(&app, "POST", "/api/projects", Some(without_staff)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = send(&app, "POST", &format!("/api/projects/1/members/{}", staff), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (_, page) = send(&app, "GET", "/api/projects", None).await;
    assert_eq!(page["total_items"], 0);
}

#[tokio::test]
async fn test_update_and_delete() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    let staff = create_member(&app, "Bruno", "staff").await;
    let (_, created) = send(&app, "POST", "/api/projects", Some(project_body(manager, &[staff]))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/projects/{}", id),
        Some(json!({ "budget": 750000.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["risk"], "high");
    assert_eq!(updated["name"], "Apollo");

    let (status, body) = send(&app, "DELETE", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &format!("/api/projects/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination_and_filter() {
    let app = test_app();
    let manager = create_member(&app, "Ana", "manager").await;
    let mut staff = Vec::new();
    for name in ["B", "C", "D"] {
        staff.push(create_member(&app, name, "staff").await);
    }
    for member in &staff {
        send(&app, "POST", "/api/projects", Some(project_body(manager, &[*member]))).await;
    }
    send(
        &app,
        "PATCH",
        "/api/projects/3/status",
        Some(json!({ "status": "review_done" })),
    )
    .await;

    let (status, page) = send(&app, "GET", "/api/projects?page=1&size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_items"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);

    let (_, page) = send(&app, "GET", "/api/projects?status=review_done", None).await;
    assert_eq!(page["items"][0]["id"], 3);

    let (status, _) = send(&app, "GET", "/api/projects?size=500", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "GET", "/api/projects?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
