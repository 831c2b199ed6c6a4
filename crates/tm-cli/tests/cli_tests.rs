//! Integration tests for the `tm` binary
//!
//! Each test builds a throwaway project with a file-backed DuckDB database
//! so state survives between invocations.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled tm binary
fn tm_bin() -> String {
    env!("CARGO_BIN_EXE_tm").to_string()
}

/// Run `tm` in `project` and return (stdout, stderr, exit code).
fn run_tm(project: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(tm_bin())
        .arg("--project-dir")
        .arg(project)
        .args(args)
        .env_remove("TIDEMARK_DATABASE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute tm with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tidemark.yml"),
        "database:\n  type: duckdb\n  path: app.duckdb\n",
    )
    .unwrap();
    let migrations = dir.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(
        migrations.join("00001_create_users.sql"),
        "-- +tidemark Up\nCREATE TABLE users (id INTEGER);\n\n-- +tidemark Down\nDROP TABLE users;\n",
    )
    .unwrap();
    fs::write(
        migrations.join("00002_create_posts.sql"),
        "-- +tidemark Up\nCREATE TABLE posts (id INTEGER);\n\n-- +tidemark Down\nDROP TABLE posts;\n",
    )
    .unwrap();
    dir
}

#[test]
fn test_up_then_version() {
    let dir = project();

    let (stdout, stderr, code) = run_tm(dir.path(), &["up"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("OK    00001_create_users.sql"));
    assert!(stdout.contains("OK    00002_create_posts.sql"));
    assert!(dir.path().join("app.duckdb").exists());

    let (stdout, _, code) = run_tm(dir.path(), &["version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("tidemark: file version 2"));
    assert!(stdout.contains("tidemark: version 2"));
}

#[test]
fn test_down_to_and_status_json() {
    let dir = project();
    run_tm(dir.path(), &["up", "--no-output"]);

    let (_, stderr, code) = run_tm(dir.path(), &["down-to", "1"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let (stdout, _, code) = run_tm(dir.path(), &["status", "--output", "json"]);
    assert_eq!(code, 0);
    let statuses: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let statuses = statuses.as_array().unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(!statuses[0]["applied_at"].is_null());
    assert!(statuses[1]["applied_at"].is_null());
}

#[test]
fn test_status_text_header() {
    let dir = project();

    let (stdout, _, code) = run_tm(dir.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Applied At"));
    assert!(stdout.contains("pending"));
}

#[test]
fn test_verify_failure_exit_code() {
    let dir = project();
    fs::write(
        dir.path().join("migrations/00003_broken.sql"),
        "CREATE TABLE broken (id INTEGER);\n",
    )
    .unwrap();

    let (stdout, _, code) = run_tm(dir.path(), &["verify"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("00003_broken.sql"));
}

#[test]
fn test_up_by_one_exhausted_is_an_error() {
    let dir = project();
    run_tm(dir.path(), &["up", "--no-output"]);

    let (_, stderr, code) = run_tm(dir.path(), &["up-by-one"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no next version"), "stderr: {stderr}");
}

#[test]
fn test_unsupported_backend() {
    let dir = project();
    fs::write(
        dir.path().join("tidemark.yml"),
        "database:\n  type: sqlite\n",
    )
    .unwrap();

    let (_, stderr, code) = run_tm(dir.path(), &["up"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("D005"), "stderr: {stderr}");
}
