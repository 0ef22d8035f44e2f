//! Outpatient desk endpoints.

use api_shared::{
    OpdCountsRes, OpdPatientRes, OpdQueueRes, OpdRegisterReq, OpdReorderReq, WarningRes,
};
use axum::{extract::State, http::StatusCode, response::Json};
use ward_core::{OpdDesk, PatientId, Priority, ReorderWarning};

use crate::extract::{ApiJson, ApiPath};
use crate::{ApiError, ApiResult, AppState};

fn opd_queue_res(desk: &OpdDesk, warning: Option<ReorderWarning>) -> OpdQueueRes {
    OpdQueueRes {
        emergency: desk
            .lane(Priority::Emergency)
            .iter()
            .map(OpdPatientRes::from)
            .collect(),
        normal: desk
            .lane(Priority::Normal)
            .iter()
            .map(OpdPatientRes::from)
            .collect(),
        counts: OpdCountsRes::from(desk.counts()),
        warning: warning.map(WarningRes::from),
    }
}

#[utoipa::path(
    get,
    path = "/opd",
    responses(
        (status = 200, description = "Both lanes and their totals", body = OpdQueueRes)
    )
)]
#[axum::debug_handler]
pub async fn list_opd(State(state): State<AppState>) -> ApiResult<Json<OpdQueueRes>> {
    let desk = state.opd()?;
    Ok(Json(opd_queue_res(&desk, None)))
}

#[utoipa::path(
    post,
    path = "/opd",
    request_body = OpdRegisterReq,
    responses(
        (status = 201, description = "Outpatient registered and queued", body = OpdPatientRes)
    )
)]
/// Register an outpatient. The server assigns a 9-character code; `priority` defaults to
/// `Normal`.
#[axum::debug_handler]
pub async fn register_outpatient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OpdRegisterReq>,
) -> ApiResult<(StatusCode, Json<OpdPatientRes>)> {
    let patient = state.opd()?.register(req.into());
    Ok((StatusCode::CREATED, Json(OpdPatientRes::from(&patient))))
}

#[utoipa::path(
    post,
    path = "/opd/next",
    responses(
        (status = 200, description = "Outpatient called, emergencies first", body = OpdPatientRes),
        (status = 409, description = "Nobody is waiting", body = api_shared::ErrorRes)
    )
)]
/// Call the next outpatient. Every waiting emergency is served before any normal patient.
#[axum::debug_handler]
pub async fn call_next_outpatient(
    State(state): State<AppState>,
) -> ApiResult<Json<OpdPatientRes>> {
    let patient = state.opd()?.call_next()?;
    Ok(Json(OpdPatientRes::from(&patient)))
}

#[utoipa::path(
    delete,
    path = "/opd/patients/{id}",
    params(("id" = String, Path, description = "Outpatient code")),
    responses(
        (status = 200, description = "Outpatient removed", body = OpdPatientRes),
        (status = 404, description = "Outpatient not waiting", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn remove_outpatient(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<OpdPatientRes>> {
    let id = PatientId::new(&id).map_err(|_| ApiError::bad_request("id cannot be empty"))?;
    let patient = state
        .opd()?
        .remove(&id)
        .ok_or_else(|| ApiError::not_found(format!("outpatient {} is not waiting", id)))?;
    Ok(Json(OpdPatientRes::from(&patient)))
}

#[utoipa::path(
    post,
    path = "/opd/reorder",
    request_body = OpdReorderReq,
    responses(
        (status = 200, description = "Lanes after the move, with a warning if anyone moved",
            body = OpdQueueRes)
    )
)]
/// Swap an outpatient with their neighbour within one priority lane.
#[axum::debug_handler]
pub async fn reorder_opd(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<OpdReorderReq>,
) -> ApiResult<Json<OpdQueueRes>> {
    let mut desk = state.opd()?;
    let warning = desk.reorder(req.priority.into(), req.index, req.direction.into());
    Ok(Json(opd_queue_res(&desk, warning)))
}
