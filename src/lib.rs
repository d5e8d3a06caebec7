#![doc(test(attr(deny(warnings))))]

//! Debt Tracker offers a small append-only ledger for tracking informal debt
//! repayment between two creditors and a fixed roster of payers, plus the
//! interactive CLI that drives it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("debt_tracker=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Debt Tracker tracing initialized.");
    });
}
