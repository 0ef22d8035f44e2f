//! JSON request and response bodies.
//!
//! Field names are camelCase on the wire. Each response type converts from its core
//! counterpart so handlers never build bodies field by field.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use ward_core::{
    Bed, InventoryItem, OpdCounts, OpdPatient, PatientRecord, Priority, ReorderDirection,
    ReorderWarning, Transfer, WardCount, WardType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

// ============================================================================
// Admission records
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientReq {
    pub name: Option<String>,
    /// Whole number, or a numeric string.
    #[serde(default, deserialize_with = "crate::lenient::optional_count")]
    #[schema(value_type = Option<u32>)]
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub diagnosis: Option<String>,
    pub current_hospital: Option<String>,
    /// Phone number, as text or as a number.
    #[serde(default, deserialize_with = "crate::lenient::optional_text")]
    #[schema(value_type = Option<String>)]
    pub contact: Option<String>,
    /// ISO 8601 date (`YYYY-MM-DD`) or RFC 3339 timestamp. Required.
    #[schema(example = "2024-03-01")]
    pub admission_date: Option<String>,
}

impl From<CreatePatientReq> for ward_core::NewAdmission {
    fn from(req: CreatePatientReq) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            address: req.address,
            diagnosis: req.diagnosis,
            current_hospital: req.current_hospital,
            contact: req.contact,
            admission_date: req.admission_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientRes {
    pub id: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub diagnosis: Option<String>,
    pub current_hospital: Option<String>,
    pub contact: Option<String>,
    pub admission_date: String,
    pub created_at: String,
}

impl From<PatientRecord> for PatientRes {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            age: record.age,
            gender: record.gender,
            address: record.address,
            diagnosis: record.diagnosis,
            current_hospital: record.current_hospital,
            contact: record.contact,
            admission_date: record.admission_date.to_rfc3339(),
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Beds and wards
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BedRes {
    pub id: u32,
    pub ward: String,
    pub occupied: bool,
    pub patient_id: Option<String>,
}

impl From<&Bed> for BedRes {
    fn from(bed: &Bed) -> Self {
        Self {
            id: bed.id().get(),
            ward: bed.ward().to_string(),
            occupied: bed.is_occupied(),
            patient_id: bed.occupant().map(|p| p.to_string()),
        }
    }
}

impl From<Bed> for BedRes {
    fn from(bed: Bed) -> Self {
        Self::from(&bed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BedQuery {
    /// Only list beds of this ward.
    pub ward: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddBedReq {
    #[schema(example = "ICU")]
    pub ward: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocateBedReq {
    pub patient_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferBedReq {
    /// Destination ward.
    #[schema(example = "General")]
    pub ward: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TransferRes {
    pub from: BedRes,
    pub to: BedRes,
}

impl From<Transfer> for TransferRes {
    fn from(transfer: Transfer) -> Self {
        Self {
            from: BedRes::from(&transfer.from),
            to: BedRes::from(&transfer.to),
        }
    }
}

/// Returned by deallocate and discharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRes {
    pub bed: BedRes,
    pub patient_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WardSummaryRes {
    pub ward: String,
    pub available: usize,
    pub occupied: usize,
    pub total: usize,
}

impl From<(WardType, WardCount)> for WardSummaryRes {
    fn from((ward, count): (WardType, WardCount)) -> Self {
        Self {
            ward: ward.to_string(),
            available: count.available,
            occupied: count.occupied,
            total: count.total(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddWardReq {
    #[schema(example = "Maternity")]
    pub name: String,
    pub beds: u32,
}

// ============================================================================
// Queues
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for ReorderDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => ReorderDirection::Up,
            Direction::Down => ReorderDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum PriorityDto {
    #[default]
    Normal,
    Emergency,
}

impl From<PriorityDto> for Priority {
    fn from(priority: PriorityDto) -> Self {
        match priority {
            PriorityDto::Normal => Priority::Normal,
            PriorityDto::Emergency => Priority::Emergency,
        }
    }
}

impl From<Priority> for PriorityDto {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Normal => PriorityDto::Normal,
            Priority::Emergency => PriorityDto::Emergency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarningRes {
    pub message: String,
    pub dismiss_after_secs: u64,
}

impl From<ReorderWarning> for WarningRes {
    fn from(warning: ReorderWarning) -> Self {
        Self {
            message: warning.to_string(),
            dismiss_after_secs: warning.dismiss_after.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueueRes {
    /// Waiting patients, next to be served first.
    pub patients: Vec<String>,
    pub warning: Option<WarningRes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnqueueReq {
    pub patient_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReorderReq {
    pub index: usize,
    pub direction: Direction,
}

// ============================================================================
// OPD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpdRegisterReq {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub priority: PriorityDto,
    #[serde(default)]
    pub symptoms: String,
}

impl From<OpdRegisterReq> for ward_core::NewOutpatient {
    fn from(req: OpdRegisterReq) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            contact_number: req.contact_number,
            priority: req.priority.into(),
            symptoms: req.symptoms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpdPatientRes {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact_number: String,
    pub priority: PriorityDto,
    pub symptoms: String,
}

impl From<&OpdPatient> for OpdPatientRes {
    fn from(patient: &OpdPatient) -> Self {
        Self {
            id: patient.id.to_string(),
            name: patient.name.clone(),
            age: patient.age,
            gender: patient.gender.clone(),
            contact_number: patient.contact_number.clone(),
            priority: patient.priority.into(),
            symptoms: patient.symptoms.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpdCountsRes {
    pub normal: usize,
    pub emergency: usize,
    pub total: usize,
}

impl From<OpdCounts> for OpdCountsRes {
    fn from(counts: OpdCounts) -> Self {
        Self {
            normal: counts.normal,
            emergency: counts.emergency,
            total: counts.total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpdQueueRes {
    pub emergency: Vec<OpdPatientRes>,
    pub normal: Vec<OpdPatientRes>,
    pub counts: OpdCountsRes,
    pub warning: Option<WarningRes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpdReorderReq {
    pub priority: PriorityDto,
    pub index: usize,
    pub direction: Direction,
}

// ============================================================================
// Inventory
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemReq {
    #[schema(example = "Surgical Masks")]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
}

impl From<InventoryItemReq> for ward_core::NewItem {
    fn from(req: InventoryItemReq) -> Self {
        Self {
            name: req.name,
            description: req.description,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItemRes {
    pub id: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    /// `In Stock`, `Low Stock` or `Out of Stock`, derived from the quantity.
    #[schema(example = "In Stock")]
    pub status: String,
}

impl From<&InventoryItem> for InventoryItemRes {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.to_string(),
            description: item.description.clone(),
            quantity: item.quantity,
            status: item.status().to_string(),
        }
    }
}

impl From<InventoryItem> for InventoryItemRes {
    fn from(item: InventoryItem) -> Self {
        Self::from(&item)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// Only items with this stock status, e.g. `Low Stock` or `low_stock`.
    pub status: Option<String>,
}
