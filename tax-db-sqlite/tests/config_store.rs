//! Deduction-limit administration against a real SQLite store.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::db::{
    DbConfig, DeductionLimitError, RepositoryRegistry, TaxConfigRepository,
    load_deduction_limits, update_deduction_limit,
};
use tax_core::{ConfigKey, DeductionLimits, TaxCalculator, TaxInput};
use tax_db_sqlite::SqliteRepositoryFactory;

async fn open_store() -> Box<dyn TaxConfigRepository> {
    let registry = RepositoryRegistry::new().with_backend(SqliteRepositoryFactory);

    match registry.create(&DbConfig::default()).await {
        Ok(repo) => repo,
        Err(e) => panic!("failed to open sqlite store: {e}"),
    }
}

#[tokio::test]
async fn fresh_store_yields_default_limits() {
    let repo = open_store().await;

    let limits = load_deduction_limits(repo.as_ref()).await;

    assert_eq!(limits, DeductionLimits::default());
}

#[tokio::test]
async fn updated_limit_is_used_by_next_calculation() {
    let repo = open_store().await;

    update_deduction_limit(repo.as_ref(), ConfigKey::PersonalDeduction, dec!(100000))
        .await
        .unwrap();
    let limits = load_deduction_limits(repo.as_ref()).await;
    let result = TaxCalculator::standard()
        .calculate(&TaxInput::new(dec!(500000)), &limits)
        .unwrap();

    // 500,000 - 100,000 = 400,000 taxable
    assert_eq!(result.total_tax_due, dec!(25000));
}

#[tokio::test]
async fn rejected_update_leaves_store_unchanged() {
    let repo = open_store().await;

    let result =
        update_deduction_limit(repo.as_ref(), ConfigKey::MaxKReceiptDeduction, dec!(0)).await;

    assert!(matches!(result, Err(DeductionLimitError::OutOfRange { .. })));
    let stored = repo
        .get_tax_config(ConfigKey::MaxKReceiptDeduction)
        .await
        .unwrap();
    assert_eq!(stored.value, dec!(50000));
}
