use serde::{Deserialize, Serialize};

use super::{account::DebtAccount, payment::Payment};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// External representation of the full ledger state.
///
/// This is the shape the presentation layer persists between sessions;
/// the ledger itself never touches disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub initialized: bool,
    #[serde(default)]
    pub accounts: Vec<DebtAccount>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default = "LedgerSnapshot::schema_version_default")]
    pub schema_version: u8,
}

impl LedgerSnapshot {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn current_schema_version() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
