use debt_tracker::{
    config::TrackerConfig,
    errors::LedgerError,
    ledger::{DebtLedger, ResetState},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn tracker() -> DebtLedger {
    let mut ledger = DebtLedger::new(TrackerConfig::default()).expect("valid config");
    ledger.initialize(dec!(1000), dec!(500)).expect("initialize");
    ledger
}

#[test]
fn full_repayment_lifecycle() {
    let mut ledger = tracker();

    ledger
        .record_payment("Ali", "Fatima", dec!(200), 10, 1, 2024)
        .expect("first payment");
    assert_eq!(ledger.remaining("Fatima"), Some(dec!(800)));
    assert_eq!(ledger.paid_by_person("Ali"), dec!(200));
    assert_eq!(ledger.total_paid(), dec!(200));

    ledger
        .record_payment("Ali", "Nora", dec!(600), 5, 1, 2024)
        .expect("overpayment");
    assert_eq!(ledger.remaining("Nora"), Some(dec!(-100)));
    assert_eq!(ledger.total_remaining(), dec!(700));

    let history = ledger.history();
    assert_eq!(history[0].date, chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(history[1].date, chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
}

#[test]
fn failed_operations_leave_state_untouched() {
    let mut ledger = tracker();
    ledger
        .record_payment("Moaad", "Nora", dec!(75), 1, 3, 2024)
        .expect("payment");
    let before_remaining = ledger.remaining("Nora");
    let before_count = ledger.payment_count();

    assert!(ledger
        .record_payment("Moaad", "Nora", dec!(0), 1, 3, 2024)
        .is_err());
    assert!(ledger
        .record_payment("Moaad", "Nora", dec!(10), 31, 2, 2024)
        .is_err());
    assert!(ledger
        .record_payment("Nobody", "Nora", dec!(10), 1, 3, 2024)
        .is_err());
    assert_eq!(ledger.initialize(dec!(1), dec!(1)), Err(LedgerError::AlreadyInitialized));

    assert_eq!(ledger.payment_count(), before_count);
    assert_eq!(ledger.remaining("Nora"), before_remaining);
}

#[test]
fn total_paid_equals_consumed_debt_at_all_times() {
    let mut ledger = tracker();
    let entries = [
        ("Abdullah", "Fatima", dec!(150), (2, 1, 2024)),
        ("Aisha", "Nora", dec!(90.75), (15, 1, 2024)),
        ("Ali", "Fatima", dec!(333.33), (28, 2, 2024)),
    ];
    for (payer, recipient, amount, (d, m, y)) in entries {
        ledger
            .record_payment(payer, recipient, amount, d, m, y)
            .expect("payment");
        let consumed: Decimal = ledger
            .accounts()
            .iter()
            .map(|a| a.total_owed - ledger.remaining(&a.name).unwrap())
            .sum();
        assert_eq!(ledger.total_paid(), consumed);
    }
}

#[test]
fn ids_stay_dense_until_reset_then_restart() {
    let mut ledger = tracker();
    for _ in 0..3 {
        ledger
            .record_payment("Ali", "Fatima", dec!(5), 1, 1, 2024)
            .expect("payment");
    }
    let ids: Vec<u32> = {
        let mut ids: Vec<u32> = ledger.history().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    };
    assert_eq!(ids, vec![1, 2, 3]);

    ledger.arm_reset();
    ledger.confirm_reset();
    assert_eq!(ledger.payment_count(), 0);
    assert_eq!(ledger.reset_state(), ResetState::Idle);

    ledger.initialize(dec!(100), dec!(100)).expect("re-init");
    let payment = ledger
        .record_payment("Ali", "Nora", dec!(5), 1, 1, 2024)
        .expect("payment");
    assert_eq!(payment.id, 1);
}

#[test]
fn oversized_creditor_list_never_reaches_the_ledger() {
    // initialize backs exactly two creditors with accounts; a third would be
    // a recordable recipient whose payments escape every balance, so the
    // config is rejected before a ledger exists at all.
    let config = TrackerConfig {
        creditors: vec!["Fatima".into(), "Nora".into(), "Sara".into()],
        ..TrackerConfig::default()
    };
    assert!(DebtLedger::new(config).is_err());
}

#[test]
fn custom_roster_is_honored() {
    let config = TrackerConfig {
        creditors: vec!["Lena".into(), "Mara".into()],
        payers: vec!["Otto".into()],
        ..TrackerConfig::default()
    };
    let mut ledger = DebtLedger::new(config).expect("valid config");
    ledger.initialize(dec!(50), dec!(60)).expect("initialize");

    assert!(ledger
        .record_payment("Otto", "Lena", dec!(10), 1, 1, 2024)
        .is_ok());
    // The default roster's names mean nothing under this deployment.
    assert_eq!(
        ledger.record_payment("Ali", "Lena", dec!(10), 1, 1, 2024),
        Err(LedgerError::InvalidParty("Ali".into()))
    );
    assert_eq!(
        ledger.record_payment("Otto", "Fatima", dec!(10), 1, 1, 2024),
        Err(LedgerError::InvalidParty("Fatima".into()))
    );
}
