use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `habits` invocation isolated in `home`, with colors off and no
/// identity leaking in from the environment.
fn habits(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("habits").unwrap();
    cmd.env("HABITS_HOME", home.path())
        .env("HABITS_DB", home.path().join("test.db"))
        .env("NO_COLOR", "1")
        .env_remove("HABITS_USER")
        .env_remove("HABITS_LOG");
    cmd
}

fn json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

fn register(home: &TempDir, username: &str) {
    habits(home)
        .args(["user", "register", username, "--email"])
        .arg(format!("{username}@example.com"))
        .assert()
        .success();
}

fn add_habit(home: &TempDir, title: &str) -> i64 {
    let output = habits(home)
        .args(["habit", "add", title, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    json(&output.stdout)["id"].as_i64().unwrap()
}

#[test]
fn test_full_flow_reports_stats() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Read");

    habits(&home)
        .args(["done", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Read"));

    let output = habits(&home)
        .args(["stats", &id.to_string(), "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats = json(&output.stdout);
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["longest_streak"], 1);
    assert_eq!(stats["total_completions"], 1);
    assert_eq!(stats["completion_rate_last_30_days"], 3);
}

#[test]
fn test_backfilled_days_count_toward_streak() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Run").to_string();

    for date in ["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-05"] {
        habits(&home)
            .args(["done", &id, "--date", date])
            .assert()
            .success();
    }

    let output = habits(&home)
        .args(["stats", &id, "--as-of", "2024-03-03", "-o", "json"])
        .output()
        .unwrap();
    let stats = json(&output.stdout);
    assert_eq!(stats["current_streak"], 3);
    assert_eq!(stats["longest_streak"], 3);
    assert_eq!(stats["total_completions"], 4);
    assert_eq!(stats["completion_rate_last_30_days"], 10);
}

#[test]
fn test_duplicate_completion_fails() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Read").to_string();

    habits(&home).args(["done", &id]).assert().success();
    habits(&home)
        .args(["done", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already completed"));
}

#[test]
fn test_undo_without_completion_fails() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Read").to_string();

    habits(&home)
        .args(["undo", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No completion found"));
}

#[test]
fn test_other_users_habit_is_not_found() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Read").to_string();
    register(&home, "grace");

    habits(&home)
        .args(["stats", &id, "--user", "grace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Habit not found"));

    habits(&home)
        .env("HABITS_USER", "grace")
        .args(["done", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Habit not found"));
}

#[test]
fn test_commands_need_a_user() {
    let home = TempDir::new().unwrap();

    habits(&home)
        .args(["habit", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active user"));
}

#[test]
fn test_duplicate_username_conflicts() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");

    habits(&home)
        .args(["user", "register", "ada", "--email", "other@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username already registered"));
}

#[test]
fn test_numeric_username_is_rejected() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");

    habits(&home)
        .args(["user", "register", "1", "--email", "one@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be a number"));

    habits(&home)
        .args(["user", "show", "1", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"ada\""));
}

#[test]
fn test_heatmap_rejects_oversized_weeks() {
    let home = TempDir::new().unwrap();
    register(&home, "ada");
    let id = add_habit(&home, "Read").to_string();

    habits(&home)
        .args(["heatmap", &id, "--weeks", "9223372036854775807"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--weeks must be between 1 and 520"));
}

#[test]
fn test_completions_script() {
    let home = TempDir::new().unwrap();

    habits(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("habits"));
}
