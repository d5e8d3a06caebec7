use thiserror::Error;

/// Validation failures raised by ledger operations.
///
/// Every variant means the caller supplied bad input; none leaves the ledger
/// partially mutated, and none is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Not a valid calendar date")]
    InvalidDate,
    #[error("Unknown payer or recipient: {0}")]
    InvalidParty(String),
    #[error("Ledger has not been initialized")]
    NotInitialized,
    #[error("Ledger is already initialized")]
    AlreadyInitialized,
    /// Raised only when restoring a snapshot whose internal structure is
    /// broken (ids not dense, for example); never by a live operation.
    #[error("Snapshot is corrupt: {0}")]
    CorruptSnapshot(String),
}
