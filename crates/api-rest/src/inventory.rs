//! Stock inventory endpoints.

use api_shared::{InventoryItemReq, InventoryItemRes, InventoryQuery};
use axum::{extract::State, http::StatusCode, response::Json};
use ward_core::StockStatus;

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{ApiError, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Matching items in the order they were added",
            body = [InventoryItemRes]),
        (status = 400, description = "Unknown stock status", body = api_shared::ErrorRes)
    )
)]
/// List stock items, optionally filtered by a search term and a stock status.
#[axum::debug_handler]
pub async fn list_items(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<InventoryQuery>,
) -> ApiResult<Json<Vec<InventoryItemRes>>> {
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<StockStatus>)
        .transpose()
        .map_err(ApiError::bad_request)?;
    let inventory = state.inventory()?;
    let items = inventory
        .search(query.search.as_deref(), status)
        .into_iter()
        .map(InventoryItemRes::from)
        .collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/inventory",
    request_body = InventoryItemReq,
    responses(
        (status = 201, description = "Item added", body = InventoryItemRes),
        (status = 400, description = "Blank name or malformed body", body = api_shared::ErrorRes)
    )
)]
/// Add a stock item. The server assigns its code and derives its status from the quantity.
#[axum::debug_handler]
pub async fn add_item(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<InventoryItemReq>,
) -> ApiResult<(StatusCode, Json<InventoryItemRes>)> {
    let item = state.inventory()?.add(req.into())?;
    Ok((StatusCode::CREATED, Json(InventoryItemRes::from(item))))
}

#[utoipa::path(
    get,
    path = "/inventory/{id}",
    params(("id" = String, Path, description = "Item code")),
    responses(
        (status = 200, description = "The item", body = InventoryItemRes),
        (status = 404, description = "Unknown item", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<InventoryItemRes>> {
    let inventory = state.inventory()?;
    let item = inventory.get(&id)?;
    Ok(Json(InventoryItemRes::from(item)))
}

#[utoipa::path(
    put,
    path = "/inventory/{id}",
    params(("id" = String, Path, description = "Item code")),
    request_body = InventoryItemReq,
    responses(
        (status = 200, description = "Item replaced", body = InventoryItemRes),
        (status = 400, description = "Blank name or malformed body", body = api_shared::ErrorRes),
        (status = 404, description = "Unknown item", body = api_shared::ErrorRes)
    )
)]
/// Replace the name, description and quantity of an item. Its code never changes.
#[axum::debug_handler]
pub async fn update_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(req): ApiJson<InventoryItemReq>,
) -> ApiResult<Json<InventoryItemRes>> {
    let item = state.inventory()?.update(&id, req.into())?;
    Ok(Json(InventoryItemRes::from(item)))
}

#[utoipa::path(
    delete,
    path = "/inventory/{id}",
    params(("id" = String, Path, description = "Item code")),
    responses(
        (status = 200, description = "Item removed", body = InventoryItemRes),
        (status = 404, description = "Unknown item", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<InventoryItemRes>> {
    let item = state.inventory()?.remove(&id)?;
    Ok(Json(InventoryItemRes::from(item)))
}
