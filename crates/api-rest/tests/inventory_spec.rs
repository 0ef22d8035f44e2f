//! Stock inventory endpoints.

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

async fn add(app: &Router, name: &str, description: &str, quantity: u32) -> Value {
    let body = json!({"name": name, "description": description, "quantity": quantity});
    let (status, item) = send(app, "POST", "/inventory", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    item
}

fn names(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn added_items_get_codes_and_derived_status() {
    let app = app();
    let masks = add(&app, "Surgical Masks", "Disposable face masks", 500).await;
    let swabs = add(&app, "Alcohol Swabs", "Sterile disinfecting wipes", 50).await;
    let bandages = add(&app, "Bandages", "Assorted sizes for wound care", 0).await;

    assert_eq!(masks["id"].as_str().unwrap().len(), 9);
    assert_eq!(masks["status"], json!("In Stock"));
    assert_eq!(swabs["status"], json!("Low Stock"));
    assert_eq!(bandages["status"], json!("Out of Stock"));

    let (status, items) = send(&app, "GET", "/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&items), ["Surgical Masks", "Alcohol Swabs", "Bandages"]);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/inventory",
        Some(json!({"name": " ", "quantity": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("item name cannot be empty"));

    let (_, items) = send(&app, "GET", "/inventory", None).await;
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn edit_keeps_code_and_updates_status() {
    let app = app();
    let bandages = add(&app, "Bandages", "Assorted sizes", 0).await;
    let uri = format!("/inventory/{}", bandages["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"name": "Bandages", "description": "Restocked", "quantity": 120})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], bandages["id"]);
    assert_eq!(updated["status"], json!("In Stock"));

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn delete_removes_item_and_unknown_codes_are_not_found() {
    let app = app();
    let masks = add(&app, "Surgical Masks", "", 500).await;
    let uri = format!("/inventory/{}", masks["id"].as_str().unwrap());

    let (status, removed) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["name"], json!("Surgical Masks"));

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"name": "Masks", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_filters_by_term_and_status() {
    let app = app();
    add(&app, "Surgical Masks", "Disposable face masks", 500).await;
    add(&app, "Alcohol Swabs", "Sterile disinfecting wipes", 50).await;
    add(&app, "Bandages", "Assorted sizes for wound care", 0).await;

    let (_, items) = send(&app, "GET", "/inventory?search=MASK", None).await;
    assert_eq!(names(&items), ["Surgical Masks"]);

    let (_, items) = send(&app, "GET", "/inventory?search=wound", None).await;
    assert_eq!(names(&items), ["Bandages"]);

    let (_, items) = send(&app, "GET", "/inventory?status=low_stock", None).await;
    assert_eq!(names(&items), ["Alcohol Swabs"]);

    let (_, items) = send(&app, "GET", "/inventory?status=Out%20of%20Stock", None).await;
    assert_eq!(names(&items), ["Bandages"]);

    let (status, body) = send(&app, "GET", "/inventory?status=plenty", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
