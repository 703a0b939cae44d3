use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("data");
    tally(&home)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tally"));
    home
}

fn add(home: &TempDir, name: &str, cost: &str, kind: &str) {
    tally(home)
        .args(["add", name, "--cost", cost, "--type", kind])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense"));
}

#[test]
fn test_commands_fail_before_init() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tally init"));
}

#[test]
fn test_add_then_list() {
    let home = initialized();
    add(&home, "Coffee", "3.50", "personal");
    add(&home, "Hotel", "1250", "business");

    tally(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Coffee"))
        .stdout(predicate::str::contains("$1,250.00"))
        .stdout(predicate::str::contains("2 expenses, total $1,253.50"));
}

#[test]
fn test_list_filters_by_type_and_minimum() {
    let home = initialized();
    add(&home, "Gym", "40", "personal");
    add(&home, "Pens", "30", "business");
    add(&home, "Flight", "75", "business");

    tally(&home)
        .args(["list", "--type", "business", "--min", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flight"))
        .stdout(predicate::str::contains("Pens").not())
        .stdout(predicate::str::contains("Gym").not())
        .stdout(predicate::str::contains("1 expense, total $75.00"));
}

#[test]
fn test_add_rejects_invalid_expense() {
    let home = initialized();
    tally(&home)
        .args(["add", "", "--cost", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expense"));
    tally(&home)
        .args(["add", "Tea", "--cost", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expense"));
    tally(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn test_add_rejects_unknown_icon() {
    let home = initialized();
    tally(&home)
        .args(["add", "Rocket", "--cost", "5", "--icon", "rocket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown icon"));
}

#[test]
fn test_edit_and_show() {
    let home = initialized();
    add(&home, "Taxi", "20", "business");

    tally(&home)
        .args(["edit", "1", "--name", "Cab", "--cost", "22.5", "--icon", "car"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated expense #1: Cab"));

    tally(&home)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cab"))
        .stdout(predicate::str::contains("$22.50"))
        .stdout(predicate::str::contains("car.fill"))
        .stdout(predicate::str::contains("Business"));
}

#[test]
fn test_edit_missing_expense() {
    let home = initialized();
    tally(&home)
        .args(["edit", "9", "--cost", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No expense with ID 9"));
}

#[test]
fn test_delete() {
    let home = initialized();
    add(&home, "Snacks", "4", "other");
    tally(&home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense #1: Snacks"));
    tally(&home)
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No expense with ID 1"));
}

#[test]
fn test_icons_by_group() {
    let home = tempfile::tempdir().unwrap();
    tally(&home)
        .args(["icons", "--group", "food"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fork.knife"))
        .stdout(predicate::str::contains("car.fill").not());
}

#[test]
fn test_status_counts_expenses() {
    let home = initialized();
    add(&home, "Lunch", "12", "personal");
    tally(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses:   1"))
        .stdout(predicate::str::contains("$12.00"));
}

#[test]
fn test_unknown_default_filter_in_settings_shows_all() {
    let home = initialized();
    add(&home, "Gym", "40", "personal");
    add(&home, "Pens", "30", "business");

    let path = home.path().join(".config").join("tally").join("settings.json");
    let mut settings: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    settings["default_filter"] = serde_json::Value::from("Travel");
    std::fs::write(&path, settings.to_string()).unwrap();

    tally(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("type: All"))
        .stdout(predicate::str::contains("2 expenses"));
    tally(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filter:     All"));
}
