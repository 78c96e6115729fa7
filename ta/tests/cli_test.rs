//! End-to-end tests for the `ta` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ta(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("ta").expect("ta binary is built");
    cmd.arg("--store").arg(store).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_ticket_lifecycle() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("storage.json");

    ta(&store)
        .args(["ticket", "create", "--title", "Printer jam", "--status", "in_progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket created"));

    ta(&store)
        .args(["ticket", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Printer jam").and(predicate::str::contains("in progress")));

    let output = ta(&store).args(["--format", "json", "ticket", "list"]).output().unwrap();
    let tickets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = tickets[0]["id"].as_str().unwrap().to_string();

    ta(&store)
        .args(["ticket", "update", &id, "--status", "closed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket updated"));

    ta(&store)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved tickets: 1"));

    ta(&store)
        .args(["ticket", "delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket deleted"));

    ta(&store)
        .args(["ticket", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets yet"));
}

#[test]
fn test_empty_title_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("storage.json");

    ta(&store)
        .args(["ticket", "create", "--title", "   "])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Title is required"));

    assert!(!store.exists());
}

#[test]
fn test_login_then_protected_page() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("storage.json");

    ta(&store)
        .args(["open", "/dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/auth/login"));

    ta(&store)
        .args(["login", "--email", "user@example.com", "--password", "pa55word!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful"));

    ta(&store)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user@example.com"));

    ta(&store)
        .args(["open", "/dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated").and(predicate::str::contains("Total tickets")));

    ta(&store).args(["logout"]).assert().success();

    ta(&store)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_weak_password_is_rejected() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("storage.json");

    ta(&store)
        .args(["signup", "--email", "user@example.com", "--password", "short"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("at least 8 characters"));
}
