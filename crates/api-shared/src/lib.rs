//! # API Shared
//!
//! Shared definitions for the ward service APIs.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`models` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the root `ward-run` binary.

pub mod health;
mod lenient;
pub mod models;

pub use health::HealthService;
pub use models::*;
