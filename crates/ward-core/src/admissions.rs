//! Patient admission records.
//!
//! Admission records belong to the surrounding application rather than the bed board: a
//! record is created from the admission form and listed on the dashboard. Storage is behind
//! [`PatientStore`] so the service does not care whether records live on disk or in memory.
//!
//! ## Storage Layout
//!
//! [`JsonFilePatientStore`] writes one JSON file per record in a sharded structure:
//!
//! ```text
//! admissions/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         admission.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record UUID.

use crate::constants::ADMISSION_JSON_FILENAME;
use crate::error::{PatientError, PatientResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use ward_uuid::RecordUuid;

/// Fields submitted on the admission form. Only the admission date is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAdmission {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub diagnosis: Option<String>,
    pub current_hospital: Option<String>,
    pub contact: Option<String>,
    pub admission_date: Option<String>,
}

/// A stored admission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub id: RecordUuid,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub diagnosis: Option<String>,
    pub current_hospital: Option<String>,
    pub contact: Option<String>,
    pub admission_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Parses the admission date of a form submission.
///
/// Accepts a calendar date (`2024-03-01`, taken as midnight UTC) or an RFC 3339 timestamp.
///
/// # Errors
///
/// - [`PatientError::MissingAdmissionDate`] if the value is absent or blank.
/// - [`PatientError::InvalidInput`] if it is neither form.
pub fn parse_admission_date(raw: Option<&str>) -> PatientResult<DateTime<Utc>> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(PatientError::MissingAdmissionDate)?;

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| {
            PatientError::InvalidInput(format!(
                "admissionDate must be an ISO 8601 date (YYYY-MM-DD) or timestamp, got '{}'",
                raw
            ))
        })
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Storage collaborator for admission records.
pub trait PatientStore: Send + Sync {
    fn insert(&self, record: &PatientRecord) -> PatientResult<()>;

    fn list(&self) -> PatientResult<Vec<PatientRecord>>;
}

/// Process-local store, for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    records: Mutex<Vec<PatientRecord>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientStore for InMemoryPatientStore {
    fn insert(&self, record: &PatientRecord) -> PatientResult<()> {
        self.records
            .lock()
            .map_err(|_| PatientError::StorePoisoned)?
            .push(record.clone());
        Ok(())
    }

    fn list(&self) -> PatientResult<Vec<PatientRecord>> {
        Ok(self
            .records
            .lock()
            .map_err(|_| PatientError::StorePoisoned)?
            .clone())
    }
}

/// Stores each record as `admission.json` under a sharded directory.
#[derive(Debug, Clone)]
pub struct JsonFilePatientStore {
    root: PathBuf,
}

impl JsonFilePatientStore {
    /// `root` is the admissions directory; it is created on first insert.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_record(path: &Path) -> PatientResult<PatientRecord> {
        let contents = fs::read_to_string(path).map_err(PatientError::FileRead)?;
        serde_json::from_str(&contents).map_err(PatientError::Deserialization)
    }
}

impl PatientStore for JsonFilePatientStore {
    fn insert(&self, record: &PatientRecord) -> PatientResult<()> {
        fs::create_dir_all(&self.root).map_err(PatientError::StorageDirCreation)?;

        let json = serde_json::to_string_pretty(record).map_err(PatientError::Serialization)?;
        let record_dir = record.id.sharded_dir(&self.root);
        fs::create_dir_all(&record_dir).map_err(PatientError::RecordDirCreation)?;

        if let Err(e) = fs::write(record_dir.join(ADMISSION_JSON_FILENAME), json) {
            if let Err(cleanup) = fs::remove_dir_all(&record_dir) {
                tracing::warn!(
                    "failed to clean up record directory {}: {}",
                    record_dir.display(),
                    cleanup
                );
            }
            return Err(PatientError::FileWrite(e));
        }
        Ok(())
    }

    /// Walks `<root>/<s1>/<s2>/<uuid>/admission.json`. A missing root means no records;
    /// unreadable records are logged and skipped.
    fn list(&self) -> PatientResult<Vec<PatientRecord>> {
        let mut records = Vec::new();

        let s1_iter = match fs::read_dir(&self.root) {
            Ok(it) => it,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(PatientError::FileRead(e)),
        };

        for s1 in s1_iter.flatten() {
            let s2_iter = match fs::read_dir(s1.path()) {
                Ok(it) => it,
                Err(_) => continue,
            };
            for s2 in s2_iter.flatten() {
                let id_iter = match fs::read_dir(s2.path()) {
                    Ok(it) => it,
                    Err(_) => continue,
                };
                for id_ent in id_iter.flatten() {
                    let path = id_ent.path().join(ADMISSION_JSON_FILENAME);
                    if !path.is_file() {
                        continue;
                    }
                    match Self::read_record(&path) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            tracing::warn!("failed to read admission: {} - {}", path.display(), e)
                        }
                    }
                }
            }
        }

        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

/// Admission-record operations; no HTTP concerns.
#[derive(Clone)]
pub struct PatientService {
    store: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Validates and stores a new admission record with a server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::MissingAdmissionDate`] or [`PatientError::InvalidInput`] for a
    /// bad admission date, in which case nothing is stored, or any storage error.
    pub fn create(&self, admission: NewAdmission) -> PatientResult<PatientRecord> {
        let admission_date = parse_admission_date(admission.admission_date.as_deref())?;

        let record = PatientRecord {
            id: RecordUuid::new(),
            name: blank_to_none(admission.name),
            age: admission.age,
            gender: blank_to_none(admission.gender),
            address: blank_to_none(admission.address),
            diagnosis: blank_to_none(admission.diagnosis),
            current_hospital: blank_to_none(admission.current_hospital),
            contact: blank_to_none(admission.contact),
            admission_date,
            created_at: Utc::now(),
        };

        self.store.insert(&record)?;
        tracing::info!(record = %record.id, "admission record created");
        Ok(record)
    }

    /// All admission records, oldest first.
    pub fn list(&self) -> PatientResult<Vec<PatientRecord>> {
        self.store.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn admission(date: Option<&str>) -> NewAdmission {
        NewAdmission {
            name: Some("Jane Doe".into()),
            age: Some(34),
            gender: Some("F".into()),
            address: Some("  ".into()),
            diagnosis: Some("Appendicitis".into()),
            current_hospital: Some("City General".into()),
            contact: Some("5550199".into()),
            admission_date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_admission_date_accepts_date_and_timestamp() {
        let date = parse_admission_date(Some("2024-03-01")).unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");

        let ts = parse_admission_date(Some("2024-03-01T10:30:00+02:00")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_parse_admission_date_requires_value() {
        assert!(matches!(
            parse_admission_date(None),
            Err(PatientError::MissingAdmissionDate)
        ));
        assert!(matches!(
            parse_admission_date(Some("  ")),
            Err(PatientError::MissingAdmissionDate)
        ));
        assert!(matches!(
            parse_admission_date(Some("yesterday")),
            Err(PatientError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_without_admission_date_stores_nothing() {
        let service = PatientService::new(Arc::new(InMemoryPatientStore::new()));
        let err = service.create(admission(None)).unwrap_err();
        assert_eq!(err.to_string(), "Admission date is required");
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_assigns_id_and_normalises_blanks() {
        let service = PatientService::new(Arc::new(InMemoryPatientStore::new()));
        let record = service.create(admission(Some("2024-03-01"))).unwrap();

        assert!(RecordUuid::is_canonical(&record.id.to_string()));
        assert_eq!(record.address, None);
        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(service.list().unwrap(), vec![record]);
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFilePatientStore::new(temp_dir.path().join("admissions"));
        let service = PatientService::new(Arc::new(store.clone()));

        let first = service.create(admission(Some("2024-03-01"))).unwrap();
        let second = service.create(admission(Some("2024-03-02"))).unwrap();

        let path = first
            .id
            .sharded_dir(store.root())
            .join(ADMISSION_JSON_FILENAME);
        assert!(path.is_file(), "admission.json should exist");

        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&first));
        assert!(listed.contains(&second));
    }

    #[test]
    fn test_file_store_lists_nothing_for_missing_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFilePatientStore::new(temp_dir.path().join("does-not-exist"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_skips_invalid_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = JsonFilePatientStore::new(temp_dir.path().to_path_buf());
        let service = PatientService::new(Arc::new(store.clone()));
        service.create(admission(Some("2024-03-01"))).unwrap();

        let bogus = RecordUuid::new().sharded_dir(store.root());
        fs::create_dir_all(&bogus).unwrap();
        fs::write(bogus.join(ADMISSION_JSON_FILENAME), "{ not json").unwrap();

        assert_eq!(store.list().unwrap().len(), 1);
    }
}
