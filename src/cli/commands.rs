//! Command dispatch for the interactive shell.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    cli::output,
    config::{ConfigError, ConfigManager, TrackerConfig},
    ledger::{DebtLedger, ResetState},
    utils::persistence::{load_snapshot_from_file, save_snapshot_to_file},
};

/// Fatal shell failures; command-level mistakes are reported inline instead.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Mutable shell state: the ledger plus everything dispatch needs.
pub struct ShellContext {
    pub ledger: DebtLedger,
    currency: String,
}

impl ShellContext {
    /// Loads the deployment config (falling back to defaults) and starts an
    /// uninitialized ledger. `DEBT_TRACKER_CONFIG` overrides the config
    /// location so tests and scripts stay isolated from the user's file.
    pub fn new() -> Result<Self, CliError> {
        let path = std::env::var_os("DEBT_TRACKER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(ConfigManager::default_path);
        let config = ConfigManager::new(path).load()?;
        Ok(Self::with_config(config)?)
    }

    pub fn with_config(config: TrackerConfig) -> Result<Self, ConfigError> {
        let currency = config.currency.clone();
        Ok(Self {
            ledger: DebtLedger::new(config)?,
            currency,
        })
    }

    pub fn prompt(&self) -> String {
        if self.ledger.reset_state() == ResetState::PendingConfirm {
            "debt (confirm reset?)> ".to_string()
        } else {
            "debt> ".to_string()
        }
    }

    /// Routes one parsed command line. Validation failures are printed and
    /// the loop continues; only `exit` ends it.
    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> LoopControl {
        match command {
            "help" => self.cmd_help(),
            "init" => self.cmd_init(args),
            "status" => self.cmd_status(),
            "pay" => self.cmd_pay(args),
            "history" => self.cmd_history(),
            "reset" => self.cmd_reset(),
            "confirm" => self.cmd_confirm(),
            "cancel" => self.cmd_cancel(),
            "save" => self.cmd_save(args),
            "load" => self.cmd_load(args),
            "exit" | "quit" => return LoopControl::Exit,
            other => {
                output::warning(format!("Unknown command: {other}. Try `help`."));
            }
        }
        LoopControl::Continue
    }

    fn cmd_help(&self) {
        output::section("Commands");
        let creditors = self.ledger.account_names().join("|");
        println!("  init <first-total> <second-total>   set the two creditor totals once");
        println!("  status                              balances, contributions, summary");
        println!("  pay <payer> <{creditors}> <amount> <dd/mm/yyyy>");
        println!("  history                             payments, newest date first");
        println!("  reset                               arm a full reset (two-step)");
        println!("  confirm                             perform a pending reset");
        println!("  cancel                              disarm a pending reset");
        println!("  save <path>                         write the session snapshot");
        println!("  load <path>                         restore a session snapshot");
        println!("  exit                                leave the shell");
        println!(
            "  payers: {}  creditors: {}",
            self.ledger.payer_roster().join(", "),
            self.ledger.account_names().join(", ")
        );
    }

    fn cmd_init(&mut self, args: &[&str]) {
        let [first, second] = args else {
            output::warning("Usage: init <first-total> <second-total>");
            return;
        };
        let (Ok(first), Ok(second)) = (parse_amount(first), parse_amount(second)) else {
            output::warning("Totals must be numeric.");
            return;
        };
        match self.ledger.initialize(first, second) {
            Ok(()) => {
                tracing::info!(%first, %second, "tracker initialized");
                output::success("Tracker initialized.");
                let names = self.ledger.account_names().to_vec();
                for name in names {
                    self.print_account_line(&name);
                }
            }
            Err(err) => output::error(err),
        }
    }

    fn cmd_status(&self) {
        if !self.ledger.is_initialized() {
            output::info("Not initialized yet. Run `init <first-total> <second-total>`.");
            return;
        }
        output::section("Balance Overview");
        for account in self.ledger.accounts() {
            self.print_account_line(&account.name);
        }

        output::section("Individual Contributions");
        for payer in self.ledger.payer_roster() {
            println!(
                "  {:<12} {}",
                payer,
                self.format_amount(self.ledger.paid_by_person(payer))
            );
        }

        output::section("Summary");
        println!(
            "  Total paid:      {}",
            self.format_amount(self.ledger.total_paid())
        );
        println!(
            "  Total remaining: {}",
            self.format_amount(self.ledger.total_remaining())
        );
        println!("  Payments:        {}", self.ledger.payment_count());
    }

    fn cmd_pay(&mut self, args: &[&str]) {
        let [payer, recipient, amount, date] = args else {
            output::warning("Usage: pay <payer> <recipient> <amount> <dd/mm/yyyy>");
            return;
        };
        let Ok(amount) = parse_amount(amount) else {
            output::warning("Amount must be numeric.");
            return;
        };
        let Ok((day, month, year)) = parse_date(date) else {
            output::warning("Date must look like dd/mm/yyyy.");
            return;
        };
        match self
            .ledger
            .record_payment(payer, recipient, amount, day, month, year)
        {
            Ok(payment) => {
                tracing::info!(id = payment.id, %payer, %recipient, %amount, "payment recorded");
                output::success(format!(
                    "Payment #{} of {} from {} to {} recorded.",
                    payment.id,
                    self.format_amount(payment.amount),
                    payment.payer,
                    payment.recipient
                ));
            }
            Err(err) => output::error(err),
        }
    }

    fn cmd_history(&self) {
        let history = self.ledger.history();
        if history.is_empty() {
            output::info("No payments recorded yet.");
            return;
        }
        output::section("Payment History");
        for payment in history {
            println!(
                "  {}  {:<12} -> {:<8} {:>12}  (#{})",
                payment.date.format("%d/%m/%Y"),
                payment.payer,
                payment.recipient,
                self.format_amount(payment.amount),
                payment.id
            );
        }
    }

    fn cmd_reset(&mut self) {
        self.ledger.arm_reset();
        output::warning("Reset armed. Run `confirm` to wipe all data, or `cancel` to keep it.");
    }

    fn cmd_confirm(&mut self) {
        if self.ledger.reset_state() != ResetState::PendingConfirm {
            output::warning("No reset is pending. Run `reset` first.");
            return;
        }
        self.ledger.confirm_reset();
        tracing::info!("tracker reset");
        output::success("All data cleared. The tracker is uninitialized again.");
    }

    fn cmd_cancel(&mut self) {
        if self.ledger.reset_state() != ResetState::PendingConfirm {
            output::info("Nothing to cancel.");
            return;
        }
        self.ledger.cancel_reset();
        output::success("Reset cancelled. Nothing was changed.");
    }

    fn cmd_save(&mut self, args: &[&str]) {
        let [path] = args else {
            output::warning("Usage: save <path>");
            return;
        };
        match save_snapshot_to_file(&self.ledger.snapshot(), Path::new(path)) {
            Ok(()) => {
                tracing::info!(%path, "snapshot saved");
                output::success(format!("Snapshot saved to {path}."));
            }
            Err(err) => output::error(err),
        }
    }

    fn cmd_load(&mut self, args: &[&str]) {
        let [path] = args else {
            output::warning("Usage: load <path>");
            return;
        };
        let snapshot = match load_snapshot_from_file(Path::new(path)) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                output::error(err);
                return;
            }
        };
        match self.ledger.restore(snapshot) {
            Ok(()) => {
                tracing::info!(%path, "snapshot loaded");
                output::success(format!(
                    "Snapshot loaded from {path} ({} payments).",
                    self.ledger.payment_count()
                ));
            }
            Err(err) => output::error(format!("Snapshot rejected: {err}")),
        }
    }

    fn print_account_line(&self, name: &str) {
        let Some(account) = self.ledger.accounts().iter().find(|a| a.name == name) else {
            return;
        };
        let remaining = self.ledger.remaining(name).unwrap_or_default();
        let paid = account.total_owed - remaining;
        println!(
            "  {:<8} owed {:>12}  paid {:>12}  remaining {:>12}",
            account.name,
            self.format_amount(account.total_owed),
            self.format_amount(paid),
            self.format_amount(remaining)
        );
    }

    fn format_amount(&self, amount: Decimal) -> String {
        format!("{:.2} {}", amount.round_dp(2), self.currency)
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ()> {
    Decimal::from_str(raw.trim()).map_err(|_| ())
}

/// Splits a `dd/mm/yyyy` string into numeric parts. Calendar validity is the
/// ledger's job; this only rejects malformed input.
fn parse_date(raw: &str) -> Result<(u32, u32, i32), ()> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(());
    };
    Ok((
        day.parse().map_err(|_| ())?,
        month.parse().map_err(|_| ())?,
        year.parse().map_err(|_| ())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_slash_separated_numbers() {
        assert_eq!(parse_date("10/01/2024"), Ok((10, 1, 2024)));
        assert_eq!(parse_date(" 5/2/2021 "), Ok((5, 2, 2021)));
    }

    #[test]
    fn parse_date_rejects_malformed_input() {
        assert!(parse_date("2024-01-10").is_err());
        assert!(parse_date("10/01").is_err());
        assert!(parse_date("a/b/c").is_err());
    }

    #[test]
    fn dispatch_runs_a_full_session() {
        let mut ctx = ShellContext::with_config(TrackerConfig::default()).expect("context");
        ctx.dispatch("init", &["1000", "500"]);
        ctx.dispatch("pay", &["Ali", "Fatima", "200", "10/01/2024"]);
        assert_eq!(ctx.ledger.payment_count(), 1);

        // Unknown command and bad args leave the ledger untouched.
        ctx.dispatch("frobnicate", &[]);
        ctx.dispatch("pay", &["Ali"]);
        assert_eq!(ctx.ledger.payment_count(), 1);

        assert_eq!(ctx.dispatch("exit", &[]), LoopControl::Exit);
    }

    #[test]
    fn context_construction_fails_on_an_invalid_config() {
        let broken = TrackerConfig {
            creditors: vec!["Fatima".into()],
            ..TrackerConfig::default()
        };
        assert!(ShellContext::with_config(broken).is_err());
    }

    #[test]
    fn reset_flow_needs_confirmation() {
        let mut ctx = ShellContext::with_config(TrackerConfig::default()).expect("context");
        ctx.dispatch("init", &["1000", "500"]);
        ctx.dispatch("reset", &[]);
        assert!(ctx.ledger.is_initialized());
        ctx.dispatch("confirm", &[]);
        assert!(!ctx.ledger.is_initialized());
    }
}
