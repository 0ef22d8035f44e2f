//! Admission-record endpoints.

use api_shared::{CreatePatientReq, PatientRes};
use axum::{extract::State, http::StatusCode, response::Json};
use ward_core::PatientError;

use crate::extract::ApiJson;
use crate::{ApiError, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All admission records, oldest first", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// List every admission record.
///
/// # Errors
/// Returns `500 Internal Server Error` if the record store cannot be read.
#[axum::debug_handler]
pub async fn list_patients(State(state): State<AppState>) -> ApiResult<Json<Vec<PatientRes>>> {
    let records = state.patients().list().map_err(|e| {
        tracing::error!("List patients error: {}", e);
        ApiError::internal("An error occurred while fetching patients")
    })?;
    Ok(Json(records.into_iter().map(PatientRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Admission record created", body = PatientRes),
        (status = 400, description = "Malformed body, or missing or invalid admission date",
            body = api_shared::ErrorRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorRes)
    )
)]
/// Create an admission record.
///
/// The record id and creation time are assigned by the server. Nothing is stored when the
/// request is rejected.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not valid JSON, a field has the wrong type, or
/// `admissionDate` is missing, empty or unparseable, and
/// `500 Internal Server Error` if the record cannot be stored.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePatientReq>,
) -> ApiResult<(StatusCode, Json<PatientRes>)> {
    match state.patients().create(req.into()) {
        Ok(record) => Ok((StatusCode::CREATED, Json(PatientRes::from(record)))),
        Err(e @ PatientError::MissingAdmissionDate) => Err(ApiError::bad_request(e.to_string())),
        Err(PatientError::InvalidInput(msg)) => Err(ApiError::bad_request(msg)),
        Err(e) => {
            tracing::error!("Create patient error: {}", e);
            Err(ApiError::internal(
                "An error occurred while creating the patient",
            ))
        }
    }
}
