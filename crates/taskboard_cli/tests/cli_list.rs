use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskboard-{nanos}-{file_name}"))
}

fn seed_store(path: &PathBuf) {
    let content = serde_json::json!({
        "schema_version": 1,
        "tasks": [
            {
                "id": "task-1",
                "title": "write report",
                "description": "quarterly numbers",
                "status": "todo",
                "priority": "high",
                "dueDate": "2026-01-05T00:00:00Z",
                "createdAt": "2026-01-01T00:00:00Z",
                "userId": "1"
            },
            {
                "id": "task-2",
                "title": "review patch",
                "description": "",
                "status": "inprogress",
                "priority": "low",
                "dueDate": "",
                "createdAt": "2026-01-02T00:00:00Z",
                "userId": "1"
            }
        ]
    });
    std::fs::write(path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

#[test]
fn list_shows_all_tasks_with_canonical_status() {
    let exe = env!("CARGO_BIN_EXE_taskboard");
    let store_path = temp_path("cli-list.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKBOARD_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("write report"));
    assert!(stdout.contains("review patch"));
    // Compact backend spelling never leaks out of the store.
    assert!(stdout.contains("in-progress"));
    assert!(!stdout.contains("| inprogress |"));
}

#[test]
fn list_filters_by_status() {
    let exe = env!("CARGO_BIN_EXE_taskboard");
    let store_path = temp_path("cli-list-status.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--status", "todo"])
        .env("TASKBOARD_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("write report"));
    assert!(!stdout.contains("review patch"));
}

#[test]
fn list_search_matches_description() {
    let exe = env!("CARGO_BIN_EXE_taskboard");
    let store_path = temp_path("cli-list-search.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--search", "QUARTERLY"])
        .env("TASKBOARD_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("write report"));
    assert!(!stdout.contains("review patch"));
}

#[test]
fn list_json_outputs_camel_case_records() {
    let exe = env!("CARGO_BIN_EXE_taskboard");
    let store_path = temp_path("cli-list-json.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "--json"])
        .env("TASKBOARD_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let tasks: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(tasks.as_array().unwrap().len(), 2);
    assert_eq!(tasks[1]["status"], "in-progress");
    assert_eq!(tasks[0]["createdAt"], "2026-01-01T00:00:00Z");
}

#[test]
fn list_with_corrupt_store_reports_fetch_failure() {
    let exe = env!("CARGO_BIN_EXE_taskboard");
    let store_path = temp_path("cli-list-corrupt.json");
    std::fs::write(&store_path, "{ not json ").unwrap();

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKBOARD_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: fetch_failed"));
}
