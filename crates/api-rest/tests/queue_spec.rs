//! Admission queue and OPD desk endpoints.

use std::sync::Arc;

use api_rest::{create_app, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use ward_core::{BedBoard, InMemoryPatientStore, PatientService, WardPlan};

fn app() -> Router {
    let state = AppState::new(
        BedBoard::from_plan(&WardPlan::default()),
        PatientService::new(Arc::new(InMemoryPatientStore::new())),
    );
    create_app(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn enqueue_all(app: &Router, patients: &[&str]) {
    for patient in patients {
        let (status, _) = send(app, "POST", "/queue", Some(json!({"patientId": patient}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

async fn register(app: &Router, name: &str, priority: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/opd",
        Some(json!({
            "name": name,
            "age": 30,
            "gender": "F",
            "contactNumber": "555-0100",
            "priority": priority,
            "symptoms": "fever"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn reorder_moves_patient_and_returns_warning() {
    let app = app();
    enqueue_all(&app, &["A", "B", "C"]).await;

    let (status, body) = send(
        &app,
        "POST",
        "/queue/reorder",
        Some(json!({"index": 2, "direction": "up"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"], json!(["A", "C", "B"]));
    assert_eq!(body["warning"]["dismissAfterSecs"], json!(5));
    assert!(body["warning"]["message"].as_str().unwrap().contains("C"));
}

#[tokio::test]
async fn reorder_at_boundary_is_silent_noop() {
    let app = app();
    enqueue_all(&app, &["A", "B"]).await;

    let (_, body) = send(
        &app,
        "POST",
        "/queue/reorder",
        Some(json!({"index": 0, "direction": "up"})),
    )
    .await;
    assert_eq!(body["patients"], json!(["A", "B"]));
    assert_eq!(body["warning"], Value::Null);

    let (_, body) = send(
        &app,
        "POST",
        "/queue/reorder",
        Some(json!({"index": 1, "direction": "down"})),
    )
    .await;
    assert_eq!(body["patients"], json!(["A", "B"]));
    assert_eq!(body["warning"], Value::Null);
}

#[tokio::test]
async fn duplicates_are_kept_and_removal_takes_first_match() {
    let app = app();
    enqueue_all(&app, &["A", "B", "A"]).await;

    let (status, body) = send(&app, "DELETE", "/queue/patients/A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"], json!(["B", "A"]));

    let (status, body) = send(&app, "DELETE", "/queue/at/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"], json!(["A"]));

    let (status, _) = send(&app, "DELETE", "/queue/patients/Z", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/queue/at/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patient_ids_that_look_like_routes_can_be_removed() {
    let app = app();
    enqueue_all(&app, &["reorder", "at", "B"]).await;

    let (status, body) = send(&app, "DELETE", "/queue/patients/reorder", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"], json!(["at", "B"]));

    let (status, body) = send(&app, "DELETE", "/queue/patients/at", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patients"], json!(["B"]));

    let (status, body) = send(&app, "DELETE", "/queue/at/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn outpatient_without_priority_joins_normal_lane() {
    let app = app();
    let (status, patient) = send(
        &app,
        "POST",
        "/opd",
        Some(json!({"name": "Walk In", "age": 52, "symptoms": "cough"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(patient["priority"], json!("Normal"));

    let (_, lanes) = send(&app, "GET", "/opd", None).await;
    assert_eq!(lanes["normal"][0]["id"], patient["id"]);
    assert_eq!(lanes["counts"], json!({"normal": 1, "emergency": 0, "total": 1}));
}

#[tokio::test]
async fn emergencies_are_called_before_earlier_normal_patients() {
    let app = app();
    let first = register(&app, "Normal One", "Normal").await;
    let emergency = register(&app, "Urgent", "Emergency").await;

    assert_eq!(first["id"].as_str().unwrap().len(), 9);

    let (_, lanes) = send(&app, "GET", "/opd", None).await;
    assert_eq!(lanes["counts"], json!({"normal": 1, "emergency": 1, "total": 2}));

    let (status, called) = send(&app, "POST", "/opd/next", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(called["id"], emergency["id"]);

    let (_, called) = send(&app, "POST", "/opd/next", None).await;
    assert_eq!(called["id"], first["id"]);

    let (status, body) = send(&app, "POST", "/opd/next", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], json!("no patient is waiting"));
}

#[tokio::test]
async fn opd_reorder_and_removal_stay_within_lane() {
    let app = app();
    let a = register(&app, "A", "Normal").await;
    let b = register(&app, "B", "Normal").await;
    let e = register(&app, "E", "Emergency").await;

    let (status, lanes) = send(
        &app,
        "POST",
        "/opd/reorder",
        Some(json!({"priority": "Normal", "index": 1, "direction": "up"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lanes["normal"][0]["id"], b["id"]);
    assert_eq!(lanes["normal"][1]["id"], a["id"]);
    assert_eq!(lanes["emergency"][0]["id"], e["id"]);
    assert!(lanes["warning"].is_object());

    let uri = format!("/opd/patients/{}", e["id"].as_str().unwrap());
    let (status, removed) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["name"], json!("E"));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, lanes) = send(&app, "GET", "/opd", None).await;
    assert_eq!(lanes["counts"]["total"], json!(2));
}
