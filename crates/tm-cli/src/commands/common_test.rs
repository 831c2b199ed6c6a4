use super::*;
use std::fs;
use tempfile::TempDir;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        dir: None,
        table: None,
        database: None,
    }
}

#[test]
fn test_session_defaults_without_config_file() {
    let dir = TempDir::new().unwrap();
    let session = Session::load(&global(dir.path())).unwrap();

    assert_eq!(session.config.migrations_dir, "migrations");
    assert_eq!(session.provider.table_name(), "tidemark_db_version");
    assert_eq!(session.provider.dir(), dir.path().join("migrations"));
}

#[test]
fn test_session_reads_project_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tidemark.yml"),
        "migrations_dir: db\ntable_name: history\nallow_missing: true\n",
    )
    .unwrap();

    let session = Session::load(&global(dir.path())).unwrap();

    assert_eq!(session.provider.table_name(), "history");
    assert_eq!(session.provider.dir(), dir.path().join("db"));
    let options = session.options(&MigrateArgs::default());
    assert!(format!("{options:?}").contains("allow_missing: true"));
}

#[test]
fn test_flags_override_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tidemark.yml"), "table_name: history\n").unwrap();
    let mut args = global(dir.path());
    args.table = Some("other".to_string());
    args.dir = Some("sql".to_string());

    let session = Session::load(&args).unwrap();

    assert_eq!(session.provider.table_name(), "other");
    assert_eq!(session.provider.dir(), dir.path().join("sql"));
}

#[test]
fn test_invalid_table_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.table = Some("bad name; drop".to_string());

    assert!(Session::load(&args).is_err());
}

#[test]
fn test_open_in_memory_duckdb() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.database = Some(":memory:".to_string());

    let session = Session::load(&args).unwrap();
    let db = session.open_database().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[test]
fn test_open_unsupported_backend_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tidemark.yml"), "database:\n  type: postgres\n").unwrap();

    let session = Session::load(&global(dir.path())).unwrap();
    let err = session.open_database().err().unwrap();
    assert!(err.to_string().contains("D005"), "got {err}");
}
