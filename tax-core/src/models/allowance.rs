use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Allowance categories recognised by the engine.
///
/// Only [`Donation`](Self::Donation) and [`KReceipt`](Self::KReceipt) reduce
/// taxable income; [`EShopping`](Self::EShopping) is accepted but has no
/// deduction effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowanceCategory {
    #[serde(rename = "donation")]
    Donation,
    #[serde(rename = "k-receipt")]
    KReceipt,
    #[serde(rename = "e-shopping")]
    EShopping,
}

impl AllowanceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
            Self::EShopping => "e-shopping",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "donation" => Some(Self::Donation),
            "k-receipt" => Some(Self::KReceipt),
            "e-shopping" => Some(Self::EShopping),
            _ => None,
        }
    }
}

impl std::fmt::Display for AllowanceCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    pub category: AllowanceCategory,
    pub amount: Decimal,
}

impl Allowance {
    pub fn new(
        category: AllowanceCategory,
        amount: Decimal,
    ) -> Self {
        Self { category, amount }
    }

    pub fn donation(amount: Decimal) -> Self {
        Self::new(AllowanceCategory::Donation, amount)
    }

    pub fn k_receipt(amount: Decimal) -> Self {
        Self::new(AllowanceCategory::KReceipt, amount)
    }

    pub fn e_shopping(amount: Decimal) -> Self {
        Self::new(AllowanceCategory::EShopping, amount)
    }
}
