pub mod account;
pub mod clock;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod payment;
pub mod snapshot;

pub use account::DebtAccount;
pub use clock::{Clock, SystemClock};
pub use ledger::{DebtLedger, ResetState};
pub use payment::Payment;
pub use snapshot::LedgerSnapshot;
