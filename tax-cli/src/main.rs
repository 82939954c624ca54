use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_cli::{app, logging, utils::parse_decimal};
use tax_core::ConfigKey;
use tax_core::db::DbConfig;
use tracing::debug;

/// Progressive income tax calculator.
///
/// Deduction limits are read from the configuration store on every run;
/// results are printed to stdout as JSON.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Configuration store backend.
    #[arg(long, default_value = "sqlite", global = true)]
    backend: String,

    /// Configuration store connection string.
    /// For SQLite this is a file path (e.g. `tax_config.db`) or `:memory:`.
    #[arg(long, default_value = "tax_config.db", global = true)]
    db: String,

    /// Log filter, e.g. `debug` or `tax_core=debug,info`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate tax for one JSON request.
    Calculate {
        /// Request body inline, e.g. '{"totalIncome": 500000}'.
        #[arg(long, conflicts_with = "file")]
        json: Option<String>,

        /// Read the request body from a file (`-` for stdin, the default).
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Calculate tax for every row of a CSV file.
    Batch {
        /// CSV with columns totalIncome, wht, donation[, kReceipt, eShopping].
        file: PathBuf,
    },

    /// Inspect or change deduction limits.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print every stored setting.
    Show,

    /// Set a deduction limit.
    Set {
        limit: Limit,

        #[arg(value_parser = parse_decimal)]
        amount: Decimal,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Limit {
    /// Personal deduction (10,000 to 100,000).
    Personal,
    /// Maximum k-receipt deduction (1 to 100,000).
    KReceipt,
}

impl From<Limit> for ConfigKey {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Personal => ConfigKey::PersonalDeduction,
            Limit::KReceipt => ConfigKey::MaxKReceiptDeduction,
        }
    }
}

fn read_body(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request: {}", path.display())),
        _ => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read request from stdin")?;
            Ok(body)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref())?;
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let db_config = DbConfig::new(cli.backend, cli.db);

    debug!("connecting to {} backend", db_config.backend);
    let registry = app::build_registry();
    let repo = registry.create(&db_config).await?;

    match cli.command {
        Command::Calculate { json, file } => {
            let body = match json {
                Some(body) => body,
                None => read_body(file)?,
            };
            print_json(&app::calculate(repo.as_ref(), &body).await?)
        }
        Command::Batch { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open: {}", file.display()))?;
            print_json(&app::calculate_batch(repo.as_ref(), BufReader::new(reader)).await?)
        }
        Command::Config(ConfigCommand::Show) => print_json(&app::show_config(repo.as_ref()).await?),
        Command::Config(ConfigCommand::Set { limit, amount }) => {
            print_json(&app::set_limit(repo.as_ref(), limit.into(), amount).await?)
        }
    }
}
