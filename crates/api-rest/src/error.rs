//! Error responses.
//!
//! Every failure leaves the service as `{"error": "..."}` with a status code. Domain
//! conditions from the bed board carry their own message; anything unexpected is logged and
//! replaced by a generic message.

use api_shared::ErrorRes;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ward_core::{AllocationError, InventoryError};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        let status = match err {
            AllocationError::BedNotFound(_) => StatusCode::NOT_FOUND,
            AllocationError::AlreadyOccupied(_)
            | AllocationError::NotOccupied(_)
            | AllocationError::SourceNotOccupied(_)
            | AllocationError::SameWard { .. }
            | AllocationError::NoBedAvailable(_)
            | AllocationError::NoWaitingPatient
            | AllocationError::DuplicateWard(_)
            | AllocationError::CapacityExhausted => StatusCode::CONFLICT,
        };
        Self::new(status, err.to_string())
    }
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        let status = match err {
            InventoryError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            InventoryError::EmptyName => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        Self::new(status, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorRes {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{BedId, WardType};

    #[test]
    fn unknown_bed_maps_to_not_found() {
        let bed = BedId::new(7).unwrap();
        let err = ApiError::from(AllocationError::BedNotFound(bed));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "bed 7 does not exist");
    }

    #[test]
    fn domain_conflicts_map_to_conflict() {
        let bed = BedId::new(1).unwrap();
        for err in [
            AllocationError::AlreadyOccupied(bed),
            AllocationError::NotOccupied(bed),
            AllocationError::SourceNotOccupied(bed),
            AllocationError::SameWard {
                bed,
                ward: WardType::Icu,
            },
            AllocationError::NoBedAvailable(WardType::General),
            AllocationError::NoWaitingPatient,
            AllocationError::DuplicateWard(WardType::Pediatric),
            AllocationError::CapacityExhausted,
        ] {
            assert_eq!(ApiError::from(err).status, StatusCode::CONFLICT);
        }
    }

    #[test]
    fn inventory_errors_map_to_not_found_and_bad_request() {
        let missing = ApiError::from(InventoryError::ItemNotFound("A1".into()));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.message, "inventory item A1 does not exist");
        assert_eq!(
            ApiError::from(InventoryError::EmptyName).status,
            StatusCode::BAD_REQUEST
        );
    }
}
