use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::TaxCalculator;
use tax_core::db::{DbConfig, RepositoryRegistry};
use tax_data::BatchReport;
use tax_db_sqlite::SqliteRepositoryFactory;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Calculate tax for every row of a CSV file and print the results as JSON.
///
/// The CSV file must have the columns `totalIncome`, `wht` and `donation`;
/// `kReceipt` and `eShopping` are optional. Deduction limits are read once
/// from the configuration store before the first row is calculated.
#[derive(Parser, Debug)]
#[command(name = "tax-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing one taxpayer per row
    #[arg(short, long)]
    file: PathBuf,

    /// Configuration store backend
    #[arg(long, default_value = "sqlite")]
    backend: String,

    /// Configuration store connection string (file path or `:memory:`)
    #[arg(long, default_value = "tax_config.db")]
    db: String,

    /// Pretty-print the JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let registry = RepositoryRegistry::new().with_backend(SqliteRepositoryFactory);
    let db_config = DbConfig::new(args.backend, args.db);
    let limits = registry
        .open_limits(&db_config)
        .await
        .with_context(|| format!("Failed to open {} store: {}", db_config.backend, db_config.connection_string))?;

    info!(file = %args.file.display(), "calculating batch");
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let report = BatchReport::collect(BufReader::new(file), TaxCalculator::standard(), limits)
        .with_context(|| format!("Failed to calculate batch: {}", args.file.display()))?;
    info!(rows = report.taxes.len(), "batch complete");

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
