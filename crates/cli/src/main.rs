use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ward_core::{
    config::ward_plan_from_env_value, CoreConfig, NewAdmission, PatientService, PatientStoreKind,
};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward allocation service CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all admission records
    List,
    /// Create an admission record
    Admit {
        /// Admission date (YYYY-MM-DD or RFC 3339 timestamp)
        admission_date: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        diagnosis: Option<String>,
        /// Hospital the patient is transferred from
        #[arg(long)]
        current_hospital: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// Show the configured wards and their bed ids
    Wards,
}

/// Resolves configuration from `PATIENT_DATA_DIR` and `WARD_PLAN`. The CLI always works on the
/// file store.
fn config_from_env() -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let patient_data_dir = std::env::var("PATIENT_DATA_DIR")
        .unwrap_or_else(|_| ward_core::DEFAULT_PATIENT_DATA_DIR.into());
    let ward_plan = ward_plan_from_env_value(std::env::var("WARD_PLAN").ok())?;
    Ok(CoreConfig::new(
        PathBuf::from(patient_data_dir),
        ward_plan,
        PatientStoreKind::File,
    )?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(command) => run(command, &config_from_env()?),
        None => {
            println!("Use 'ward --help' for commands");
            Ok(())
        }
    }
}

/// Runs one command. Any failure is returned so the process exits non-zero.
fn run(command: Commands, cfg: &CoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List => {
            let service = PatientService::new(cfg.open_patient_store());
            let records = service.list()?;
            if records.is_empty() {
                println!("No admission records found.");
            } else {
                for record in records {
                    println!(
                        "ID: {}, Name: {}, Admitted: {}, Created: {}",
                        record.id,
                        record.name.as_deref().unwrap_or("-"),
                        record.admission_date.format("%Y-%m-%d"),
                        record.created_at
                    );
                }
            }
        }
        Commands::Admit {
            admission_date,
            name,
            age,
            gender,
            address,
            diagnosis,
            current_hospital,
            contact,
        } => {
            let service = PatientService::new(cfg.open_patient_store());
            let admission = NewAdmission {
                name,
                age,
                gender,
                address,
                diagnosis,
                current_hospital,
                contact,
                admission_date: Some(admission_date),
            };
            let record = service
                .create(admission)
                .map_err(|e| format!("Error creating admission record: {}", e))?;
            println!("Created admission record with ID: {}", record.id);
        }
        Commands::Wards => {
            for (ward, first, last) in cfg.ward_plan().bed_ranges() {
                println!("{}: beds {}-{}", ward, first, last);
            }
            println!("Total beds: {}", cfg.ward_plan().total_beds());
        }
    }

    Ok(())
}
