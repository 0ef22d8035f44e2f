//! Bed and ward endpoints.
//!
//! Bed ids in paths are positive integers; `0` and ids past the end of the registry both
//! answer 404, anything that is not a number answers 400.

use api_shared::{
    AddBedReq, AddWardReq, AllocateBedReq, BedQuery, BedRes, ReleaseRes,
    TransferBedReq, TransferRes, WardSummaryRes,
};
use axum::{extract::State, http::StatusCode, response::Json};
use ward_core::{BedId, PatientId, WardSeed, WardType};

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{ApiError, ApiResult, AppState};

fn bed_id(raw: u32) -> ApiResult<BedId> {
    BedId::new(raw).ok_or_else(|| ApiError::not_found(format!("bed {} does not exist", raw)))
}

fn ward(raw: &str) -> ApiResult<WardType> {
    WardType::parse(raw).map_err(|_| ApiError::bad_request("ward cannot be empty"))
}

#[utoipa::path(
    get,
    path = "/beds",
    params(BedQuery),
    responses(
        (status = 200, description = "Beds in registry order", body = [BedRes]),
        (status = 400, description = "Blank ward filter or malformed query",
            body = api_shared::ErrorRes)
    )
)]
/// List beds, optionally only those of one ward.
#[axum::debug_handler]
pub async fn list_beds(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BedQuery>,
) -> ApiResult<Json<Vec<BedRes>>> {
    let filter = query.ward.as_deref().map(ward).transpose()?;
    let board = state.board()?;
    let beds = match &filter {
        Some(w) => board.registry().beds_in(w).map(BedRes::from).collect(),
        None => board.registry().beds().iter().map(BedRes::from).collect(),
    };
    Ok(Json(beds))
}

#[utoipa::path(
    post,
    path = "/beds",
    request_body = AddBedReq,
    responses(
        (status = 201, description = "Bed added", body = BedRes),
        (status = 400, description = "Blank ward name", body = api_shared::ErrorRes)
    )
)]
/// Add an unoccupied bed to a ward, declaring the ward if it is new.
#[axum::debug_handler]
pub async fn add_bed(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddBedReq>,
) -> ApiResult<(StatusCode, Json<BedRes>)> {
    let ward = ward(&req.ward)?;
    let bed = state.board()?.registry_mut().add_bed(ward)?;
    Ok((StatusCode::CREATED, Json(BedRes::from(bed))))
}

#[utoipa::path(
    get,
    path = "/beds/summary",
    responses(
        (status = 200, description = "Counts for every declared ward", body = [WardSummaryRes])
    )
)]
/// Available, occupied and total bed counts per ward, in declaration order.
#[axum::debug_handler]
pub async fn bed_summary(State(state): State<AppState>) -> ApiResult<Json<Vec<WardSummaryRes>>> {
    let summary = state.board()?.registry().summary();
    Ok(Json(summary.into_iter().map(WardSummaryRes::from).collect()))
}

#[utoipa::path(
    get,
    path = "/beds/{id}",
    params(("id" = u32, Path, description = "Bed id")),
    responses(
        (status = 200, description = "The bed", body = BedRes),
        (status = 400, description = "Bed id is not a number", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
) -> ApiResult<Json<BedRes>> {
    let id = bed_id(id)?;
    let board = state.board()?;
    let bed = board.registry().bed(id)?;
    Ok(Json(BedRes::from(bed)))
}

#[utoipa::path(
    post,
    path = "/beds/{id}/allocate",
    params(("id" = u32, Path, description = "Bed id")),
    request_body = AllocateBedReq,
    responses(
        (status = 200, description = "Bed now occupied", body = BedRes),
        (status = 400, description = "Blank patient id", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes),
        (status = 409, description = "Bed already occupied", body = api_shared::ErrorRes)
    )
)]
/// Put a patient straight into a bed without going through the admission queue.
#[axum::debug_handler]
pub async fn allocate_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
    ApiJson(req): ApiJson<AllocateBedReq>,
) -> ApiResult<Json<BedRes>> {
    let id = bed_id(id)?;
    let patient = PatientId::new(&req.patient_id)
        .map_err(|_| ApiError::bad_request("patientId cannot be empty"))?;
    let bed = state.board()?.registry_mut().allocate(id, patient)?;
    Ok(Json(BedRes::from(bed)))
}

#[utoipa::path(
    post,
    path = "/beds/{id}/book",
    params(("id" = u32, Path, description = "Bed id")),
    responses(
        (status = 200, description = "Next waiting patient placed in the bed", body = BedRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes),
        (status = 409, description = "No waiting patient, or bed already occupied",
            body = api_shared::ErrorRes)
    )
)]
/// Book a bed for the patient at the head of the admission queue.
///
/// If the bed cannot be allocated the patient keeps their place at the head of the queue.
///
/// # Errors
/// Returns `409 Conflict` if nobody is waiting or the bed is occupied, and `404 Not Found` for
/// an unknown bed.
#[axum::debug_handler]
pub async fn book_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
) -> ApiResult<Json<BedRes>> {
    let id = bed_id(id)?;
    let bed = state.board()?.book(id)?;
    Ok(Json(BedRes::from(bed)))
}

#[utoipa::path(
    post,
    path = "/beds/{id}/transfer",
    params(("id" = u32, Path, description = "Source bed id")),
    request_body = TransferBedReq,
    responses(
        (status = 200, description = "Patient moved", body = TransferRes),
        (status = 400, description = "Blank ward name", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes),
        (status = 409, description = "Source empty, same ward, or no free bed in the target ward",
            body = api_shared::ErrorRes)
    )
)]
/// Move the patient in a bed to the first free bed of another ward.
#[axum::debug_handler]
pub async fn transfer_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
    ApiJson(req): ApiJson<TransferBedReq>,
) -> ApiResult<Json<TransferRes>> {
    let id = bed_id(id)?;
    let target = ward(&req.ward)?;
    let transfer = state.board()?.registry_mut().transfer(id, &target)?;
    Ok(Json(TransferRes::from(transfer)))
}

#[utoipa::path(
    post,
    path = "/beds/{id}/deallocate",
    params(("id" = u32, Path, description = "Bed id")),
    responses(
        (status = 200, description = "Bed emptied", body = ReleaseRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes),
        (status = 409, description = "Bed not occupied", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn deallocate_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
) -> ApiResult<Json<ReleaseRes>> {
    release(&state, id, Release::Deallocate)
}

#[utoipa::path(
    post,
    path = "/beds/{id}/discharge",
    params(("id" = u32, Path, description = "Bed id")),
    responses(
        (status = 200, description = "Patient discharged and bed emptied", body = ReleaseRes),
        (status = 404, description = "Unknown bed", body = api_shared::ErrorRes),
        (status = 409, description = "Bed not occupied", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn discharge_bed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u32>,
) -> ApiResult<Json<ReleaseRes>> {
    release(&state, id, Release::Discharge)
}

enum Release {
    Deallocate,
    Discharge,
}

fn release(state: &AppState, id: u32, kind: Release) -> ApiResult<Json<ReleaseRes>> {
    let id = bed_id(id)?;
    let mut board = state.board()?;
    let registry = board.registry_mut();
    let patient = match kind {
        Release::Deallocate => registry.deallocate(id)?,
        Release::Discharge => registry.discharge(id)?,
    };
    let bed = registry.bed(id)?;
    Ok(Json(ReleaseRes {
        bed: BedRes::from(bed),
        patient_id: patient.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/wards",
    request_body = AddWardReq,
    responses(
        (status = 201, description = "Ward declared with its beds", body = WardSummaryRes),
        (status = 400, description = "Blank name or bad bed count", body = api_shared::ErrorRes),
        (status = 409, description = "Ward already exists", body = api_shared::ErrorRes)
    )
)]
/// Declare a new ward with a number of empty beds, as done during onboarding.
#[axum::debug_handler]
pub async fn add_ward(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddWardReq>,
) -> ApiResult<(StatusCode, Json<WardSummaryRes>)> {
    let seed =
        WardSeed::new(&req.name, req.beds).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let count = state
        .board()?
        .registry_mut()
        .add_ward(seed.ward.clone(), seed.beds)?;
    Ok((
        StatusCode::CREATED,
        Json(WardSummaryRes::from((seed.ward, count))),
    ))
}
