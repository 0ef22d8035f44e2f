//! # Ward Core
//!
//! Core business logic for the ward allocation service:
//! - [`registry`]: beds, wards and occupancy transitions (allocate, deallocate, discharge,
//!   transfer)
//! - [`queue`]: FIFO admission queue and the two-lane OPD triage queue
//! - [`board`]: the bed-booking protocol tying the two together
//! - [`opd`]: outpatient registration desk
//! - [`plan`]: ward plans used to seed a registry
//! - [`admissions`]: admission records behind a storage trait
//! - [`inventory`]: ward stock with quantity-derived status
//!
//! **No API concerns**: HTTP servers and request/response shapes belong in `api-rest` and
//! `api-shared`. All state here is owned by the caller; there are no globals.

pub mod admissions;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod opd;
pub mod plan;
pub mod queue;
pub mod registry;

pub use admissions::{
    InMemoryPatientStore, JsonFilePatientStore, NewAdmission, PatientRecord, PatientService,
    PatientStore,
};
pub use board::BedBoard;
pub use config::{CoreConfig, PatientStoreKind};
pub use constants::DEFAULT_PATIENT_DATA_DIR;
pub use error::{
    AllocationError, AllocationResult, ConfigError, ConfigResult, InventoryError, InventoryResult,
    PatientError, PatientResult,
};
pub use inventory::{Inventory, InventoryItem, NewItem, StockStatus};
pub use opd::{NewOutpatient, OpdCounts, OpdDesk, OpdPatient};
pub use plan::{WardPlan, WardSeed};
pub use queue::{
    AdmissionQueue, Priority, QueueEntry, ReorderDirection, ReorderWarning, TriageQueue,
};
pub use registry::{Bed, BedId, Transfer, WardCount, WardRegistry};

pub use ward_types::{NonEmptyText, PatientId, TextError, WardType};
pub use ward_uuid::RecordUuid;
