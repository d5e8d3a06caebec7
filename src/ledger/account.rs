use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one creditor's fixed total. Set once at initialization and
/// immutable afterwards; the running balance is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebtAccount {
    pub name: String,
    pub total_owed: Decimal,
}

impl DebtAccount {
    pub fn new(name: impl Into<String>, total_owed: Decimal) -> Self {
        Self {
            name: name.into(),
            total_owed,
        }
    }
}
