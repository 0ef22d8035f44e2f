//! Constants used throughout the ward core crate.

/// Default directory for patient data storage when no explicit directory is configured.
pub const DEFAULT_PATIENT_DATA_DIR: &str = "patient_data";

/// Directory name for admission records storage.
pub const ADMISSIONS_DIR_NAME: &str = "admissions";

/// Filename for a single admission record.
pub const ADMISSION_JSON_FILENAME: &str = "admission.json";

/// Ward plan used when none is configured: 40 beds in each built-in ward.
pub const DEFAULT_WARD_PLAN: &str = "ICU=40,General=40,Pediatric=40";

/// Upper bound on the number of beds a single ward plan entry may declare.
pub const MAX_BEDS_PER_WARD: u32 = 10_000;

/// How long a UI should keep a reorder warning on screen.
pub const REORDER_WARNING_DISMISS_SECS: u64 = 5;

/// Items with at most this many units left are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 50;
