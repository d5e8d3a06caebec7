use assert_cmd::Command;
use predicates::str::contains;
use tempfile::{tempdir, NamedTempFile};

// Points the binary at a config file inside a throwaway dir so a real
// user config on the host can never leak into these tests.
fn script(input: impl Into<String>) -> assert_cmd::assert::Assert {
    let dir = tempdir().unwrap();
    Command::cargo_bin("debt_tracker_cli")
        .unwrap()
        .env("DEBT_TRACKER_CLI_SCRIPT", "1")
        .env("DEBT_TRACKER_CONFIG", dir.path().join("config.json"))
        .write_stdin(input.into())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let tmp = NamedTempFile::new().unwrap();
    let input = format!(
        "init 1000 500\npay Ali Fatima 200 10/01/2024\nstatus\nsave {}\nexit\n",
        tmp.path().display()
    );

    script(input)
        .success()
        .stdout(contains("Tracker initialized"))
        .stdout(contains("Payment #1"))
        .stdout(contains("Total paid"))
        .stdout(contains("Snapshot saved"));

    let json = std::fs::read_to_string(tmp.path()).unwrap();
    assert!(json.contains("\"Fatima\""));
    assert!(json.contains("\"payments\""));
}

#[test]
fn script_mode_surfaces_validation_errors_and_continues() {
    script("pay Ali Fatima 200 10/01/2024\ninit 0 500\ninit 1000 500\npay Ali Fatima 50 31/02/2024\nexit\n")
        .success()
        .stdout(contains("Ledger has not been initialized"))
        .stdout(contains("Amount must be greater than zero"))
        .stdout(contains("Tracker initialized"))
        .stdout(contains("Not a valid calendar date"));
}

#[test]
fn reset_needs_a_separate_confirmation() {
    script("init 1000 500\nreset\nstatus\nconfirm\nstatus\nexit\n")
        .success()
        .stdout(contains("Reset armed"))
        .stdout(contains("Total paid"))
        .stdout(contains("All data cleared"))
        .stdout(contains("Not initialized yet"));
}

#[test]
fn cancel_keeps_everything_intact() {
    script("init 1000 500\nreset\ncancel\nconfirm\nstatus\nexit\n")
        .success()
        .stdout(contains("Reset cancelled"))
        .stdout(contains("No reset is pending"))
        .stdout(contains("Total paid"));
}

#[test]
fn config_override_swaps_the_roster() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let config = debt_tracker::config::TrackerConfig {
        creditors: vec!["Lena".into(), "Mara".into()],
        payers: vec!["Otto".into()],
        ..Default::default()
    };
    std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    Command::cargo_bin("debt_tracker_cli")
        .unwrap()
        .env("DEBT_TRACKER_CLI_SCRIPT", "1")
        .env("DEBT_TRACKER_CONFIG", &config_path)
        .write_stdin("init 10 20\npay Otto Lena 5 01/01/2024\npay Ali Lena 5 01/01/2024\nexit\n")
        .assert()
        .success()
        .stdout(contains("Payment #1"))
        .stdout(contains("Unknown payer or recipient: Ali"));
}

#[test]
fn history_lists_newest_date_first() {
    let output = script(
        "init 1000 500\npay Ali Fatima 200 10/01/2024\npay Ali Nora 600 05/01/2024\nhistory\nexit\n",
    )
    .success()
    .get_output()
    .stdout
    .clone();

    let text = String::from_utf8(output).unwrap();
    let jan10 = text.find("10/01/2024").expect("Jan 10 entry");
    let jan05 = text.find("05/01/2024").expect("Jan 5 entry");
    assert!(jan10 < jan05, "history must be calendar-descending");
}
