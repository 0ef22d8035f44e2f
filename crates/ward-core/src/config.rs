//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services. Nothing in the
//! core reads environment variables while handling a request.

use crate::admissions::{InMemoryPatientStore, JsonFilePatientStore, PatientStore};
use crate::constants::{ADMISSIONS_DIR_NAME, DEFAULT_WARD_PLAN};
use crate::error::{ConfigError, ConfigResult};
use crate::plan::WardPlan;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Where admission records are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PatientStoreKind {
    /// JSON files under the patient data directory.
    #[default]
    File,
    /// Process memory; records are lost on restart.
    Memory,
}

impl FromStr for PatientStoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownPatientStore(other.to_string())),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_dir: PathBuf,
    ward_plan: WardPlan,
    patient_store: PatientStoreKind,
}

impl CoreConfig {
    pub fn new(
        patient_data_dir: PathBuf,
        ward_plan: WardPlan,
        patient_store: PatientStoreKind,
    ) -> ConfigResult<Self> {
        if patient_store == PatientStoreKind::File && patient_data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidInput(
                "patient data directory cannot be empty".into(),
            ));
        }

        Ok(Self {
            patient_data_dir,
            ward_plan,
            patient_store,
        })
    }

    pub fn patient_data_dir(&self) -> &Path {
        &self.patient_data_dir
    }

    pub fn admissions_dir(&self) -> PathBuf {
        self.patient_data_dir.join(ADMISSIONS_DIR_NAME)
    }

    pub fn ward_plan(&self) -> &WardPlan {
        &self.ward_plan
    }

    pub fn patient_store(&self) -> PatientStoreKind {
        self.patient_store
    }

    /// Builds the configured admission-record store.
    pub fn open_patient_store(&self) -> Arc<dyn PatientStore> {
        match self.patient_store {
            PatientStoreKind::File => Arc::new(JsonFilePatientStore::new(self.admissions_dir())),
            PatientStoreKind::Memory => Arc::new(InMemoryPatientStore::new()),
        }
    }
}

/// Parse the ward plan from an optional string value.
///
/// If `value` is `None` or blank, returns the default plan.
pub fn ward_plan_from_env_value(value: Option<String>) -> ConfigResult<WardPlan> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    match value {
        Some(v) => WardPlan::parse(&v),
        None => WardPlan::parse(DEFAULT_WARD_PLAN),
    }
}

/// Parse the patient store kind from an optional string value, defaulting to `file`.
pub fn patient_store_from_env_value(value: Option<String>) -> ConfigResult<PatientStoreKind> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| v.parse())
        .transpose()
        .map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ward_plan_defaults_when_unset_or_blank() {
        assert_eq!(ward_plan_from_env_value(None).unwrap(), WardPlan::default());
        assert_eq!(
            ward_plan_from_env_value(Some("   ".into())).unwrap(),
            WardPlan::default()
        );
    }

    #[test]
    fn ward_plan_uses_configured_value() {
        let plan = ward_plan_from_env_value(Some("ICU=3".into())).unwrap();
        assert_eq!(plan.total_beds(), 3);
        assert!(ward_plan_from_env_value(Some("ICU=x".into())).is_err());
    }

    #[test]
    fn patient_store_kind_parses() {
        assert_eq!(patient_store_from_env_value(None).unwrap(), PatientStoreKind::File);
        assert_eq!(
            patient_store_from_env_value(Some("Memory".into())).unwrap(),
            PatientStoreKind::Memory
        );
        assert!(matches!(
            patient_store_from_env_value(Some("postgres".into())),
            Err(ConfigError::UnknownPatientStore(_))
        ));
    }

    #[test]
    fn core_config_rejects_empty_data_dir_for_file_store() {
        let file = CoreConfig::new(PathBuf::new(), WardPlan::default(), PatientStoreKind::File);
        assert!(file.is_err());
        let cfg = CoreConfig::new(PathBuf::new(), WardPlan::default(), PatientStoreKind::Memory)
            .unwrap();
        assert_eq!(cfg.patient_store(), PatientStoreKind::Memory);
    }

    #[test]
    fn admissions_dir_is_under_patient_data_dir() {
        let cfg = CoreConfig::new(
            PathBuf::from("/data"),
            WardPlan::default(),
            PatientStoreKind::File,
        )
        .unwrap();
        assert_eq!(cfg.admissions_dir(), PathBuf::from("/data/admissions"));
    }
}
