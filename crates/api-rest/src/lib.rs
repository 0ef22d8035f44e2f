//! # API REST
//!
//! REST API for the ward service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - the OpenAPI document at `/api-docs/openapi.json`
//! - REST-specific concerns (JSON bodies, status codes, CORS, request tracing)
//!
//! Request and response shapes live in `api-shared`; all behaviour lives in `ward-core`.

#![warn(rust_2018_idioms)]

pub mod beds;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod opd;
pub mod patients;
pub mod queue;

use std::sync::{Arc, Mutex, MutexGuard};

use api_shared::{HealthRes, HealthService};
use axum::{
    response::Json,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use ward_core::{BedBoard, CoreConfig, Inventory, OpdDesk, PatientService};

pub use error::{ApiError, ApiResult};

/// Shared state handed to every handler.
///
/// The bed board (registry plus admission queue), the OPD desk and the stock inventory each
/// sit behind their own lock; a handler holds the lock for its whole operation.
#[derive(Clone)]
pub struct AppState {
    board: Arc<Mutex<BedBoard>>,
    opd: Arc<Mutex<OpdDesk>>,
    inventory: Arc<Mutex<Inventory>>,
    patients: PatientService,
}

impl AppState {
    pub fn new(board: BedBoard, patients: PatientService) -> Self {
        Self {
            board: Arc::new(Mutex::new(board)),
            opd: Arc::new(Mutex::new(OpdDesk::new())),
            inventory: Arc::new(Mutex::new(Inventory::new())),
            patients,
        }
    }

    /// Seeds the bed board from the configured ward plan and opens the configured
    /// admission-record store.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(
            BedBoard::from_plan(cfg.ward_plan()),
            PatientService::new(cfg.open_patient_store()),
        )
    }

    pub(crate) fn board(&self) -> ApiResult<MutexGuard<'_, BedBoard>> {
        self.board.lock().map_err(|_| {
            tracing::error!("bed board lock poisoned");
            ApiError::internal("Internal server error")
        })
    }

    pub(crate) fn opd(&self) -> ApiResult<MutexGuard<'_, OpdDesk>> {
        self.opd.lock().map_err(|_| {
            tracing::error!("OPD desk lock poisoned");
            ApiError::internal("Internal server error")
        })
    }

    pub(crate) fn inventory(&self) -> ApiResult<MutexGuard<'_, Inventory>> {
        self.inventory.lock().map_err(|_| {
            tracing::error!("inventory lock poisoned");
            ApiError::internal("Internal server error")
        })
    }

    pub(crate) fn patients(&self) -> &PatientService {
        &self.patients
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        patients::list_patients,
        patients::create_patient,
        beds::list_beds,
        beds::add_bed,
        beds::bed_summary,
        beds::get_bed,
        beds::allocate_bed,
        beds::book_bed,
        beds::transfer_bed,
        beds::deallocate_bed,
        beds::discharge_bed,
        beds::add_ward,
        queue::list_queue,
        queue::enqueue,
        queue::remove_from_queue,
        queue::remove_queue_at,
        queue::reorder_queue,
        opd::list_opd,
        opd::register_outpatient,
        opd::call_next_outpatient,
        opd::remove_outpatient,
        opd::reorder_opd,
        inventory::list_items,
        inventory::add_item,
        inventory::get_item,
        inventory::update_item,
        inventory::delete_item,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::CreatePatientReq,
        api_shared::PatientRes,
        api_shared::BedRes,
        api_shared::AddBedReq,
        api_shared::AllocateBedReq,
        api_shared::TransferBedReq,
        api_shared::TransferRes,
        api_shared::ReleaseRes,
        api_shared::WardSummaryRes,
        api_shared::AddWardReq,
        api_shared::Direction,
        api_shared::PriorityDto,
        api_shared::WarningRes,
        api_shared::QueueRes,
        api_shared::EnqueueReq,
        api_shared::ReorderReq,
        api_shared::OpdRegisterReq,
        api_shared::OpdPatientRes,
        api_shared::OpdCountsRes,
        api_shared::OpdQueueRes,
        api_shared::OpdReorderReq,
        api_shared::InventoryItemReq,
        api_shared::InventoryItemRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router over `state`.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route("/beds", get(beds::list_beds).post(beds::add_bed))
        .route("/beds/summary", get(beds::bed_summary))
        .route("/beds/:id", get(beds::get_bed))
        .route("/beds/:id/allocate", post(beds::allocate_bed))
        .route("/beds/:id/book", post(beds::book_bed))
        .route("/beds/:id/transfer", post(beds::transfer_bed))
        .route("/beds/:id/deallocate", post(beds::deallocate_bed))
        .route("/beds/:id/discharge", post(beds::discharge_bed))
        .route("/wards", post(beds::add_ward))
        .route("/queue", get(queue::list_queue).post(queue::enqueue))
        .route("/queue/reorder", post(queue::reorder_queue))
        .route("/queue/at/:index", delete(queue::remove_queue_at))
        .route("/queue/patients/:patient_id", delete(queue::remove_from_queue))
        .route("/opd", get(opd::list_opd).post(opd::register_outpatient))
        .route("/opd/next", post(opd::call_next_outpatient))
        .route("/opd/reorder", post(opd::reorder_opd))
        .route("/opd/patients/:id", delete(opd::remove_outpatient))
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::add_item),
        )
        .route(
            "/inventory/:id",
            get(inventory::get_item)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint, used by monitoring and load balancers.
#[axum::debug_handler]
async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
