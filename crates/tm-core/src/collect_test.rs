use super::*;
use crate::registry::BoxError;
use std::fs;
use tempfile::TempDir;
use tm_db::Transaction;

fn noop(_tx: &dyn Transaction) -> Result<(), BoxError> {
    Ok(())
}

fn migration_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in files {
        fs::write(dir.path().join(name), "-- +tidemark Up\nSELECT 1;\n").unwrap();
    }
    dir
}

#[test]
fn test_collect_sorted_with_kinds() {
    let dir = migration_dir(&[
        "00003_seed.tpl.sql",
        "00001_create_users.sql",
        "00002_rename_root.rs",
    ]);
    let ms = collect_migrations(dir.path(), &Registry::new(), 0, i64::MAX).unwrap();

    assert_eq!(ms.versions(), vec![1, 2, 3]);
    let kinds: Vec<MigrationKind> = ms.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MigrationKind::Sql,
            MigrationKind::Code,
            MigrationKind::TemplateSql
        ]
    );
    assert!(ms.current(2).unwrap().is_unregistered());
}

#[test]
fn test_collect_range_is_inclusive() {
    let dir = migration_dir(&["1_a.sql", "2_b.sql", "3_c.sql", "4_d.sql"]);
    let ms = collect_migrations(dir.path(), &Registry::new(), 2, 3).unwrap();
    assert_eq!(ms.versions(), vec![2, 3]);
}

#[test]
fn test_collect_skips_dotfiles_and_dirs() {
    let dir = migration_dir(&["1_a.sql", ".DS_Store"]);
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("archive/2_old.sql"), "").unwrap();

    let ms = collect_migrations(dir.path(), &Registry::new(), 0, i64::MAX).unwrap();
    assert_eq!(ms.versions(), vec![1]);
}

#[test]
fn test_collect_unknown_extension_is_error() {
    let dir = migration_dir(&["1_a.sql", "README.md"]);
    let err = collect_migrations(dir.path(), &Registry::new(), 0, i64::MAX).unwrap_err();
    assert!(matches!(err, CoreError::UnknownExtension { .. }), "{err}");
}

#[test]
fn test_collect_malformed_version_is_error() {
    let dir = migration_dir(&["first_a.sql"]);
    let err = collect_migrations(dir.path(), &Registry::new(), 0, i64::MAX).unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }), "{err}");
}

#[test]
fn test_collect_duplicate_version_is_error() {
    let dir = migration_dir(&["1_a.sql", "001_b.sql"]);
    let err = collect_migrations(dir.path(), &Registry::new(), 0, i64::MAX).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateVersion { version: 1, .. }), "{err}");
}

#[test]
fn test_collect_missing_dir_is_error() {
    let dir = TempDir::new().unwrap();
    let err =
        collect_migrations(&dir.path().join("nope"), &Registry::new(), 0, i64::MAX).unwrap_err();
    assert!(matches!(err, CoreError::MigrationDirNotFound { .. }));
}

#[test]
fn test_collect_attaches_registry_to_file() {
    let dir = migration_dir(&["1_a.sql", "00002_rename_root.rs"]);
    let mut registry = Registry::new();
    registry.add("00002_rename_root.rs", noop, noop).unwrap();

    let ms = collect_migrations(dir.path(), &registry, 0, i64::MAX).unwrap();
    assert_eq!(ms.len(), 2);
    let code = ms.current(2).unwrap();
    assert!(!code.is_unregistered());
    assert_eq!(code.path(), dir.path().join("00002_rename_root.rs"));
}

#[test]
fn test_collect_registry_only_entries() {
    let dir = migration_dir(&["1_a.sql"]);
    let mut registry = Registry::new();
    registry.add("5_backfill.rs", noop, noop).unwrap();
    registry.add("9_out_of_range.rs", noop, noop).unwrap();

    let ms = collect_migrations(dir.path(), &registry, 0, 8).unwrap();
    assert_eq!(ms.versions(), vec![1, 5]);
    assert_eq!(ms.current(5).unwrap().script(), "5_backfill.rs");
}

#[test]
fn test_collect_sql_and_registry_collide() {
    let dir = migration_dir(&["3_a.sql"]);
    let mut registry = Registry::new();
    registry.add("3_b.rs", noop, noop).unwrap();

    let err = collect_migrations(dir.path(), &registry, 0, i64::MAX).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateVersion { version: 3, .. }));
}
