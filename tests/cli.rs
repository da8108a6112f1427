#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Nothing listens on the discard port, so fetches fail fast.
const OFFLINE_API: &str = "http://127.0.0.1:9/api";

fn evfilter_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("evfilter"));
    cmd.env("EVFILTER_DATA", data.path())
        .env("EVFILTER_API_BASE_URL", OFFLINE_API)
        .env("EVFILTER_REQUEST_TIMEOUT_SECS", "2")
        .env_remove("EVFILTER_STORE_NAME")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn set_show_and_clear_filters() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["filters", "set", "manufacturer", "Tesla"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set manufacturer to Tesla"));

    let saved = fs::read_to_string(data.path().join("filter-storage.json")).unwrap();
    assert!(saved.contains("\"manufacturer\":\"Tesla\""));

    evfilter_cmd(&data)
        .args(["filters", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manufacturer").and(predicate::str::contains("Tesla")));

    evfilter_cmd(&data)
        .args(["filters", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 filter."));

    evfilter_cmd(&data)
        .args(["filters"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No filters active."));
}

#[test]
fn data_flag_overrides_environment() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    evfilter_cmd(&env_dir)
        .args(["--data", flag_dir.path().to_str().unwrap()])
        .args(["filters", "set", "category", "SUV"])
        .assert()
        .success();

    assert!(flag_dir.path().join("filter-storage.json").exists());
    assert!(!env_dir.path().join("filter-storage.json").exists());
}

#[test]
fn lenient_numbers_do_not_count_as_filters() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["filters", "set", "min-price", "cheap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("min-price is not set"));
}

#[test]
fn inverted_price_range_is_ignored() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["filters", "price", "60,000", "20,000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignored price range 60,000 - 20,000"));

    evfilter_cmd(&data)
        .args(["filters", "price", "20000", "60000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price range set to 20,000 - 60,000"));
}

#[test]
fn toggle_color_by_id_works_offline() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["filters", "toggle-color", "exterior", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exterior color #3"));

    evfilter_cmd(&data)
        .args(["filters", "toggle-color", "ext", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed exterior color #3"));
}

#[test]
fn unknown_filter_key_fails() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["filters", "set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid input: Unknown filter key: colour"));
}

#[test]
fn browse_reports_unreachable_catalog() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["browse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog unavailable").and(predicate::str::contains("retry")));
}

#[test]
fn book_dry_run_prints_request() {
    let data = TempDir::new().unwrap();
    let date = (chrono::Local::now().date_naive() + chrono::Days::new(7))
        .format("%Y-%m-%d")
        .to_string();

    evfilter_cmd(&data)
        .args([
            "book",
            "--model",
            "Model Y",
            "--year",
            "2023",
            "--service",
            "repair",
            "--date",
            &date,
            "--name",
            "Sam Rivera",
            "--email",
            "sam@example.com",
            "--phone",
            "555 010 2030",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"service_type\": \"repair\"")
                .and(predicate::str::contains("\"phone\": \"5550102030\"")),
        );
}

#[test]
fn book_stops_at_first_invalid_step() {
    let data = TempDir::new().unwrap();

    evfilter_cmd(&data)
        .args(["book", "--year", "2023", "--dry-run"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("car_model")
                .and(predicate::str::contains("Vehicle details are incomplete")),
        );
}
