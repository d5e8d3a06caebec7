use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    config::{ConfigError, TrackerConfig},
    errors::LedgerError,
};

use super::{
    account::DebtAccount,
    clock::{Clock, SystemClock},
    payment::Payment,
    snapshot::LedgerSnapshot,
};

/// Reset confirmation protocol. A destructive reset needs two distinct
/// actions: arming leaves state intact, only a confirm while armed clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetState {
    #[default]
    Idle,
    PendingConfirm,
}

/// Owns the full tracker state: the two creditor accounts, the append-only
/// payment sequence, and the reset protocol.
///
/// Lifecycle: constructed uninitialized, initialized exactly once, mutated
/// only through [`DebtLedger::record_payment`], and cleared only by the
/// two-step reset. Every mutating operation is all-or-nothing.
pub struct DebtLedger {
    config: TrackerConfig,
    accounts: Vec<DebtAccount>,
    payments: Vec<Payment>,
    initialized: bool,
    reset: ResetState,
    clock: Arc<dyn Clock>,
}

impl DebtLedger {
    /// Creates an uninitialized ledger using the system clock. Rejects a
    /// config that fails [`TrackerConfig::validate`]: every configured
    /// creditor must be backable by an account at initialization.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an uninitialized ledger with an injected clock.
    pub fn with_clock(config: TrackerConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            accounts: Vec::new(),
            payments: Vec::new(),
            initialized: false,
            reset: ResetState::Idle,
            clock,
        })
    }

    /// Replaces the ledger state from a persisted snapshot, revalidating
    /// every reference against the configured roster. All-or-nothing: a
    /// rejected snapshot leaves the current state untouched.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> Result<(), LedgerError> {
        if !snapshot.initialized {
            self.accounts.clear();
            self.payments.clear();
            self.initialized = false;
            self.reset = ResetState::Idle;
            return Ok(());
        }
        for account in &snapshot.accounts {
            if !self.config.creditors.contains(&account.name) {
                return Err(LedgerError::InvalidParty(account.name.clone()));
            }
        }
        // Accounts restore in config order, one per configured creditor.
        let mut accounts = Vec::with_capacity(self.config.creditors.len());
        for name in &self.config.creditors {
            let account = snapshot
                .accounts
                .iter()
                .find(|a| a.name == *name)
                .ok_or_else(|| LedgerError::InvalidParty(name.clone()))?;
            if account.total_owed <= Decimal::ZERO {
                return Err(LedgerError::InvalidAmount);
            }
            accounts.push(account.clone());
        }
        for (idx, payment) in snapshot.payments.iter().enumerate() {
            // Ids are dense by construction; a later record_payment assigns
            // len + 1, so anything else would collide.
            if payment.id as usize != idx + 1 {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "payment ids must run 1..={}, found {} at position {}",
                    snapshot.payments.len(),
                    payment.id,
                    idx + 1
                )));
            }
            if !self.config.payers.contains(&payment.payer) {
                return Err(LedgerError::InvalidParty(payment.payer.clone()));
            }
            if !self.config.creditors.contains(&payment.recipient) {
                return Err(LedgerError::InvalidParty(payment.recipient.clone()));
            }
            if payment.amount <= Decimal::ZERO {
                return Err(LedgerError::InvalidAmount);
            }
            let year = payment.date.year();
            if year < self.config.min_year || year > self.config.max_year {
                return Err(LedgerError::InvalidDate);
            }
        }
        self.accounts = accounts;
        self.payments = snapshot.payments;
        self.initialized = true;
        self.reset = ResetState::Idle;
        Ok(())
    }

    /// Sets both creditor totals exactly once.
    ///
    /// Totals are assigned to the configured creditors in roster order.
    /// Rejects non-positive totals and re-initialization; never silently
    /// overwrites an initialized ledger.
    pub fn initialize(
        &mut self,
        first_total: Decimal,
        second_total: Decimal,
    ) -> Result<(), LedgerError> {
        if self.initialized {
            return Err(LedgerError::AlreadyInitialized);
        }
        if first_total <= Decimal::ZERO || second_total <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        self.accounts = self
            .config
            .creditors
            .iter()
            .zip([first_total, second_total])
            .map(|(name, total)| DebtAccount::new(name.clone(), total))
            .collect();
        // Should already be empty; cleared defensively.
        self.payments.clear();
        self.initialized = true;
        Ok(())
    }

    /// Validates and appends a new payment, returning the created record.
    ///
    /// The date arrives as raw day/month/year because calendar validation is
    /// part of the contract: 31 February must be rejected here, not upstream.
    pub fn record_payment(
        &mut self,
        payer: &str,
        recipient: &str,
        amount: Decimal,
        day: u32,
        month: u32,
        year: i32,
    ) -> Result<Payment, LedgerError> {
        if !self.initialized {
            return Err(LedgerError::NotInitialized);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        if !self.config.payers.iter().any(|p| p == payer) {
            return Err(LedgerError::InvalidParty(payer.to_string()));
        }
        if !self.config.creditors.iter().any(|c| c == recipient) {
            return Err(LedgerError::InvalidParty(recipient.to_string()));
        }
        if year < self.config.min_year || year > self.config.max_year {
            return Err(LedgerError::InvalidDate);
        }
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(LedgerError::InvalidDate)?;

        let payment = Payment {
            id: self.payments.len() as u32 + 1,
            payer: payer.to_string(),
            recipient: recipient.to_string(),
            amount,
            date,
            created_at: self.clock.now(),
        };
        self.payments.push(payment.clone());
        Ok(payment)
    }

    /// Arms the reset protocol without mutating any ledger data.
    pub fn arm_reset(&mut self) {
        self.reset = ResetState::PendingConfirm;
    }

    /// Performs the reset, but only when armed. A confirm while idle is a
    /// no-op: the confirming action does not exist until the first one.
    pub fn confirm_reset(&mut self) {
        if self.reset == ResetState::PendingConfirm {
            self.accounts.clear();
            self.payments.clear();
            self.initialized = false;
            self.reset = ResetState::Idle;
        }
    }

    /// Disarms a pending reset, leaving all data intact. A later reset
    /// requires two fresh actions.
    pub fn cancel_reset(&mut self) {
        self.reset = ResetState::Idle;
    }

    pub fn reset_state(&self) -> ResetState {
        self.reset
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The creditor accounts. Empty until initialization.
    pub fn accounts(&self) -> &[DebtAccount] {
        &self.accounts
    }

    /// Valid recipient names, present even before initialization.
    pub fn account_names(&self) -> &[String] {
        &self.config.creditors
    }

    pub fn payer_roster(&self) -> &[String] {
        &self.config.payers
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Total owed minus payments credited to the account. Goes negative on
    /// overpayment; overpaying is permitted, not blocked.
    pub fn remaining(&self, account_name: &str) -> Option<Decimal> {
        let account = self.accounts.iter().find(|a| a.name == account_name)?;
        let paid: Decimal = self
            .payments
            .iter()
            .filter(|p| p.recipient == account_name)
            .map(|p| p.amount)
            .sum();
        Some(account.total_owed - paid)
    }

    /// Sum of a payer's contributions across both recipients.
    pub fn paid_by_person(&self, payer_name: &str) -> Decimal {
        self.payments
            .iter()
            .filter(|p| p.payer == payer_name)
            .map(|p| p.amount)
            .sum()
    }

    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn total_remaining(&self) -> Decimal {
        self.accounts
            .iter()
            .filter_map(|a| self.remaining(&a.name))
            .sum()
    }

    /// All payments, calendar-descending, ties broken by id descending so
    /// the most recently recorded entry of a day sorts first.
    pub fn history(&self) -> Vec<Payment> {
        let mut payments = self.payments.clone();
        payments.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        payments
    }

    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }

    /// Captures the external representation of the full state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            initialized: self.initialized,
            accounts: self.accounts.clone(),
            payments: self.payments.clone(),
            schema_version: LedgerSnapshot::current_schema_version(),
        }
    }
}
