use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable record of a single transfer from a payer to a creditor.
///
/// Payments are append-only: ids are assigned sequentially from 1 and stay
/// dense because there is no delete, only a full reset. `created_at` exists
/// for tie-breaking and audit; `date` is the user-entered payment date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: u32,
    pub payer: String,
    pub recipient: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
