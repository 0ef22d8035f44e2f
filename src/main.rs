use std::path::PathBuf;

use api_rest::{AppState, create_app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ward_core::{
    CoreConfig, PatientStoreKind,
    config::{patient_store_from_env_value, ward_plan_from_env_value},
};

/// Main entry point for the ward service
///
/// Resolves configuration once, seeds the bed board from the ward plan and serves the REST API.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_DIR`: Directory for admission records (default: "patient_data")
/// - `WARD_PLAN`: Wards and bed counts, e.g. "ICU=40,General=40,Pediatric=40" (the default)
/// - `PATIENT_STORE`: "file" (default) or "memory"
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is invalid,
/// - the patient data directory cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ward_run=info".parse()?)
                .add_directive("ward_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let patient_data_dir = std::env::var("PATIENT_DATA_DIR")
        .unwrap_or_else(|_| ward_core::DEFAULT_PATIENT_DATA_DIR.into());
    let ward_plan = ward_plan_from_env_value(std::env::var("WARD_PLAN").ok())?;
    let patient_store = patient_store_from_env_value(std::env::var("PATIENT_STORE").ok())?;

    let cfg = CoreConfig::new(PathBuf::from(patient_data_dir), ward_plan, patient_store)?;
    if cfg.patient_store() == PatientStoreKind::File {
        std::fs::create_dir_all(cfg.admissions_dir())?;
    }

    tracing::info!(
        beds = cfg.ward_plan().total_beds(),
        wards = cfg.ward_plan().wards().len(),
        store = ?cfg.patient_store(),
        "ward plan loaded"
    );
    tracing::info!("++ Starting ward REST API on {}", rest_addr);

    let app = create_app(AppState::from_config(&cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
