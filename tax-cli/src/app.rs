//! Operations behind the `tax-calc` subcommands.
//!
//! Every operation resolves deduction limits from the config store once and
//! hands them to the engine; nothing here holds state between calls.

use std::io::Read;

use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use tax_core::db::{
    RepositoryRegistry, TaxConfigRepository, load_deduction_limits, update_deduction_limit,
};
use tax_core::{ConfigKey, TaxCalculator};
use tax_data::BatchReport;
use tax_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info, warn};

use crate::output::{ConfigEntry, LimitUpdate, TaxResponse};
use crate::request::{INVALID_REQUEST, parse_request};

/// Registry with every backend compiled into this binary.
pub fn build_registry() -> RepositoryRegistry {
    RepositoryRegistry::new().with_backend(SqliteRepositoryFactory)
}

/// Calculates tax for one JSON request body.
///
/// A rejected request surfaces as [`INVALID_REQUEST`]; the specific reason is
/// logged at `warn`.
pub async fn calculate(
    repo: &dyn TaxConfigRepository,
    body: &str,
) -> Result<TaxResponse> {
    let input = parse_request(body).map_err(|reason| {
        warn!(%reason, "rejected calculation request");
        anyhow!(INVALID_REQUEST)
    })?;

    let limits = load_deduction_limits(repo).await;
    debug!(?limits, "resolved deduction limits");

    let result = TaxCalculator::standard()
        .calculate(&input, &limits)
        .map_err(|reason| {
            warn!(%reason, "rejected calculation request");
            anyhow!(INVALID_REQUEST)
        })?;
    info!(tax = %result.total_tax_due, refund = %result.refund, "calculated");

    Ok(TaxResponse::from(&result))
}

/// Calculates tax for every row of a CSV source.
pub async fn calculate_batch<R: Read>(
    repo: &dyn TaxConfigRepository,
    reader: R,
) -> Result<BatchReport> {
    let limits = load_deduction_limits(repo).await;

    let report = BatchReport::collect(reader, TaxCalculator::standard(), limits)
        .context("Failed to calculate batch")?;
    info!(rows = report.taxes.len(), "batch complete");

    Ok(report)
}

/// Lists every stored configuration entry.
pub async fn show_config(repo: &dyn TaxConfigRepository) -> Result<Vec<ConfigEntry>> {
    let configs = repo
        .list_tax_configs()
        .await
        .context("Failed to read tax configuration")?;

    Ok(configs.into_iter().map(ConfigEntry::from).collect())
}

/// Validates and stores a new deduction limit.
pub async fn set_limit(
    repo: &dyn TaxConfigRepository,
    key: ConfigKey,
    value: Decimal,
) -> Result<LimitUpdate> {
    let updated = update_deduction_limit(repo, key, value)
        .await
        .with_context(|| format!("Failed to update {key}"))?;

    Ok(LimitUpdate::from(&updated))
}
