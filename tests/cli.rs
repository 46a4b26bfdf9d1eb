use assert_cmd::Command;
use predicates::prelude::*;

fn itemiq() -> Command {
    Command::cargo_bin("itemiq").unwrap()
}

#[test]
fn normalize_runs_builtin_samples() {
    itemiq()
        .arg("normalize")
        .assert()
        .success()
        .stdout(predicate::str::contains("GT's Kombucha, Ginger (16 oz)"))
        .stdout(predicate::str::contains("Whole Foods Market"))
        .stdout(predicate::str::contains("Square POS v2.1"));
}

#[test]
fn normalize_accepts_custom_lines() {
    itemiq()
        .arg("normalize")
        .arg("KROGER 456 SYNERGY GUAVA 12OZ")
        .assert()
        .success()
        .stdout(predicate::str::contains("GT's Kombucha, Guava (12 oz)"))
        .stdout(predicate::str::contains("Kroger POS"));
}

#[test]
fn process_enriches_sample_without_store() {
    itemiq()
        .args(["process", "--no-delay", "WHOLEFDS #10217 AUSTIN TX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Whole Foods Market"))
        .stdout(predicate::str::contains("$37.45"))
        .stdout(predicate::str::contains("Itemized Breakdown"));
}

#[test]
fn process_without_input_lists_samples() {
    itemiq()
        .arg("process")
        .assert()
        .success()
        .stdout(predicate::str::contains("--sample"))
        .stdout(predicate::str::contains("MCDONALD'S F32847 DENVER CO"));
}

#[test]
fn process_rejects_bad_sample_index() {
    itemiq()
        .args(["process", "--sample", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sample 99 does not exist"));
}

#[test]
fn survey_renders_static_dashboard() {
    itemiq()
        .arg("survey")
        .assert()
        .success()
        .stdout(predicate::str::contains("86%"))
        .stdout(predicate::str::contains("Interest Level Distribution"))
        .stdout(predicate::str::contains("Fraud detection"));
}

#[test]
fn statements_without_init_fails_politely() {
    let home = tempfile::tempdir().unwrap();
    itemiq()
        .env("HOME", home.path())
        .arg("statements")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No store found"));
}

#[test]
fn init_seed_statements_flow() {
    let home = tempfile::tempdir().unwrap();
    let data_dir = home.path().join("data");

    itemiq()
        .env("HOME", home.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized itemiq"));

    itemiq()
        .env("HOME", home.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo data loaded!"));

    // Second seed run is a no-op.
    itemiq()
        .env("HOME", home.path())
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("already loaded"));

    itemiq()
        .env("HOME", home.path())
        .args(["statements", "--limit", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Balance"))
        .stdout(predicate::str::contains("Activity"));

    itemiq()
        .env("HOME", home.path())
        .args(["insights", "merchants"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spend by Merchant"));

    itemiq()
        .env("HOME", home.path())
        .args(["waitlist", "join", "demo@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You're on the list!"));

    itemiq()
        .env("HOME", home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:"))
        .stdout(predicate::str::contains("Waitlist:"));
}
