//! Admission queue endpoints.

use api_shared::{EnqueueReq, QueueRes, ReorderReq, WarningRes};
use axum::{extract::State, http::StatusCode, response::Json};
use ward_core::{AdmissionQueue, PatientId, ReorderWarning};

use crate::extract::{ApiJson, ApiPath};
use crate::{ApiError, ApiResult, AppState};

fn queue_res(queue: &AdmissionQueue, warning: Option<ReorderWarning>) -> QueueRes {
    QueueRes {
        patients: queue.iter().map(|p| p.to_string()).collect(),
        warning: warning.map(WarningRes::from),
    }
}

#[utoipa::path(
    get,
    path = "/queue",
    responses(
        (status = 200, description = "Waiting patients, next first", body = QueueRes)
    )
)]
#[axum::debug_handler]
pub async fn list_queue(State(state): State<AppState>) -> ApiResult<Json<QueueRes>> {
    let board = state.board()?;
    Ok(Json(queue_res(board.queue(), None)))
}

#[utoipa::path(
    post,
    path = "/queue",
    request_body = EnqueueReq,
    responses(
        (status = 201, description = "Patient added to the back of the queue", body = QueueRes),
        (status = 400, description = "Blank patient id", body = api_shared::ErrorRes)
    )
)]
/// Add a patient to the back of the admission queue. The same id may be queued more than once.
#[axum::debug_handler]
pub async fn enqueue(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<EnqueueReq>,
) -> ApiResult<(StatusCode, Json<QueueRes>)> {
    let patient = PatientId::new(&req.patient_id)
        .map_err(|_| ApiError::bad_request("patientId cannot be empty"))?;
    let mut board = state.board()?;
    board.enqueue(patient);
    Ok((StatusCode::CREATED, Json(queue_res(board.queue(), None))))
}

#[utoipa::path(
    delete,
    path = "/queue/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient to remove")),
    responses(
        (status = 200, description = "First matching entry removed", body = QueueRes),
        (status = 404, description = "Patient not waiting", body = api_shared::ErrorRes)
    )
)]
/// Remove the first queue entry for a patient.
#[axum::debug_handler]
pub async fn remove_from_queue(
    State(state): State<AppState>,
    ApiPath(patient_id): ApiPath<String>,
) -> ApiResult<Json<QueueRes>> {
    let patient = PatientId::new(&patient_id)
        .map_err(|_| ApiError::bad_request("patientId cannot be empty"))?;
    let mut board = state.board()?;
    board
        .queue_mut()
        .remove_patient(&patient)
        .ok_or_else(|| ApiError::not_found(format!("patient {} is not waiting", patient)))?;
    tracing::info!(patient = %patient, "patient removed from admission queue");
    Ok(Json(queue_res(board.queue(), None)))
}

#[utoipa::path(
    delete,
    path = "/queue/at/{index}",
    params(("index" = usize, Path, description = "Zero-based queue position")),
    responses(
        (status = 200, description = "Entry removed", body = QueueRes),
        (status = 404, description = "No entry at that position", body = api_shared::ErrorRes)
    )
)]
/// Remove the queue entry at a position, counting from the head at 0.
#[axum::debug_handler]
pub async fn remove_queue_at(
    State(state): State<AppState>,
    ApiPath(index): ApiPath<usize>,
) -> ApiResult<Json<QueueRes>> {
    let mut board = state.board()?;
    let patient = board
        .queue_mut()
        .remove_at(index)
        .ok_or_else(|| ApiError::not_found(format!("no patient at queue position {}", index)))?;
    tracing::info!(patient = %patient, index, "patient removed from admission queue");
    Ok(Json(queue_res(board.queue(), None)))
}

#[utoipa::path(
    post,
    path = "/queue/reorder",
    request_body = ReorderReq,
    responses(
        (status = 200, description = "Queue after the move, with a warning if anyone moved",
            body = QueueRes)
    )
)]
/// Swap a queue entry with its neighbour.
///
/// Moving the head up or the tail down leaves the queue unchanged and returns no warning.
#[axum::debug_handler]
pub async fn reorder_queue(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ReorderReq>,
) -> ApiResult<Json<QueueRes>> {
    let mut board = state.board()?;
    let warning = board.queue_mut().reorder(req.index, req.direction.into());
    Ok(Json(queue_res(board.queue(), warning)))
}
