use crate::registry::BedId;
use ward_types::WardType;

/// Conditions reported by the ward registry, the queues and the booking protocol.
///
/// All of these are local and recoverable: the state is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("bed {0} does not exist")]
    BedNotFound(BedId),
    #[error("bed {0} is already occupied")]
    AlreadyOccupied(BedId),
    #[error("bed {0} is not occupied")]
    NotOccupied(BedId),
    #[error("bed {0} has no patient to transfer")]
    SourceNotOccupied(BedId),
    #[error("bed {bed} is already in the {ward} ward")]
    SameWard { bed: BedId, ward: WardType },
    #[error("no unoccupied bed available in the {0} ward")]
    NoBedAvailable(WardType),
    #[error("no patient is waiting")]
    NoWaitingPatient,
    #[error("ward {0} is already registered")]
    DuplicateWard(WardType),
    #[error("no bed ids left; the registry is full")]
    CapacityExhausted,
}

pub type AllocationResult<T> = std::result::Result<T, AllocationError>;

/// Errors from admission-record validation and storage.
#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Admission date is required")]
    MissingAdmissionDate,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write admission file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read admission file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize admission: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize admission: {0}")]
    Deserialization(serde_json::Error),
    #[error("admission store lock poisoned")]
    StorePoisoned,
    #[error("uuid error: {0}")]
    Uuid(#[from] ward_uuid::UuidError),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;

/// Errors from the ward stock inventory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory item {0} does not exist")]
    ItemNotFound(String),
    #[error("item name cannot be empty")]
    EmptyName,
}

pub type InventoryResult<T> = std::result::Result<T, InventoryError>;

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ward plan: {0}")]
    InvalidWardPlan(String),
    #[error("unknown patient store '{0}' (expected 'file' or 'memory')")]
    UnknownPatientStore(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
