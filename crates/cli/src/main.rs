//! Dabeeha CLI - Store seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the seed catalog into the JSON store
//! dbh-cli seed
//!
//! # Reseed even if a catalog document already exists
//! dbh-cli seed --force
//!
//! # Rank the slaughter meeting points from a GPS fix
//! dbh-cli meeting-points --lat 29.96 --lng 31.25
//!
//! # Rank them from a district centroid instead
//! dbh-cli meeting-points --district Maadi
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the seed product catalog into the store
//! - `meeting-points` - Rank slaughter points by distance

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dbh-cli")]
#[command(author, version, about = "Dabeeha CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the seed product catalog into the JSON store
    Seed {
        /// Store directory (defaults to DABEEHA_DATA_DIR or ./data)
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Overwrite an existing catalog document
        #[arg(short, long)]
        force: bool,
    },
    /// Rank the slaughter meeting points by distance
    MeetingPoints {
        /// Latitude of the customer's location
        #[arg(long)]
        lat: Option<f64>,

        /// Longitude of the customer's location
        #[arg(long)]
        lng: Option<f64>,

        /// District name to rank from instead of a GPS fix
        #[arg(short, long)]
        district: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { data_dir, force } => commands::seed::run(data_dir.as_deref(), force).await?,
        Commands::MeetingPoints { lat, lng, district } => {
            commands::meeting_points::run(lat, lng, district.as_deref());
        }
    }
    Ok(())
}
