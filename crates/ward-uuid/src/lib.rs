//! Record identifiers and sharded-path utilities.
//!
//! Admission records are stored under sharded directories derived from a UUID. Storage
//! identifiers use one *canonical* form: **32 lowercase hexadecimal characters** (no hyphens),
//! e.g. `550e8400e29b41d4a716446655440000`, which is what `Uuid::new_v4().simple()` produces.
//!
//! For a canonical UUID `u` a record lives under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! The same generator also yields the short uppercase codes handed out to outpatients at the
//! OPD desk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use ::uuid::Uuid;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;

/// Length of the codes returned by [`RecordUuid::short_code`].
pub const SHORT_CODE_LEN: usize = 9;

/// Canonical UUID wrapper.
///
/// Once constructed, the contained UUID is known to be valid and is always displayed in
/// canonical form.
///
/// - [`RecordUuid::new`] generates a fresh identifier for a new record.
/// - [`RecordUuid::parse`] validates an externally supplied identifier; it does **not**
///   normalise hyphenated or uppercase input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct RecordUuid(Uuid);

impl Default for RecordUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordUuid {
    /// Generates a new random (v4) UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a UUID string that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not in canonical form.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(e.to_string()))
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is exactly 32 characters of `0-9a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns `parent_dir/<s1>/<s2>/<uuid>/` where `s1`/`s2` are the first four hex characters.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }

    /// Generates a short uppercase code of [`SHORT_CODE_LEN`] hex characters.
    ///
    /// Codes are meant to be read out at a reception desk. They are not globally unique;
    /// callers that need uniqueness must check for collisions.
    pub fn short_code() -> String {
        let mut code = Uuid::new_v4().simple().to_string();
        code.truncate(SHORT_CODE_LEN);
        code.make_ascii_uppercase();
        code
    }
}

impl fmt::Display for RecordUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordUuid::parse(s)
    }
}

impl TryFrom<String> for RecordUuid {
    type Error = UuidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RecordUuid::parse(&value)
    }
}

impl From<RecordUuid> for String {
    fn from(value: RecordUuid) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_canonical_uuid() {
        let id = RecordUuid::new().to_string();
        assert_eq!(id.len(), 32);
        assert!(RecordUuid::is_canonical(&id));
    }

    #[test]
    fn test_parse_valid_canonical_uuid() {
        let canonical = "550e8400e29b41d4a716446655440000";
        let parsed = RecordUuid::parse(canonical).unwrap();
        assert_eq!(parsed.to_string(), canonical);
    }

    #[test]
    fn test_parse_rejects_hyphenated_uuid() {
        match RecordUuid::parse("550e8400-e29b-41d4-a716-446655440000") {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("32 lowercase hex characters"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_is_canonical_invalid() {
        assert!(!RecordUuid::is_canonical("550E8400E29B41D4A716446655440000"));
        assert!(!RecordUuid::is_canonical("550e8400e29b41d4a71644665544000"));
        assert!(!RecordUuid::is_canonical("550e8400e29b41d4a716446655440zzz"));
        assert!(!RecordUuid::is_canonical(""));
    }

    #[test]
    fn test_sharded_dir_structure() {
        let id = RecordUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        let dir = id.sharded_dir(Path::new("/patient_data/admissions"));
        assert_eq!(
            dir,
            PathBuf::from("/patient_data/admissions/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn test_short_code_is_uppercase_hex() {
        let code = RecordUuid::short_code();
        assert_eq!(code.len(), SHORT_CODE_LEN);
        assert!(code.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')));
    }

    #[test]
    fn test_serde_round_trips_canonical_form() {
        let id = RecordUuid::parse("550e8400e29b41d4a716446655440000").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400e29b41d4a716446655440000\"");
        assert!(serde_json::from_str::<RecordUuid>("\"not-a-uuid\"").is_err());
    }
}
