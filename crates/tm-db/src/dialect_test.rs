use super::*;

#[test]
fn test_dialect_for_selects_variant() {
    assert_eq!(dialect_for(DbType::DuckDb).name(), "duckdb");
    assert_eq!(dialect_for(DbType::Postgres).name(), "postgres");
    assert_eq!(dialect_for(DbType::Sqlite).name(), "sqlite");
}

#[test]
fn test_duckdb_create_uses_sequence() {
    let sql = DuckDbDialect.create_version_table_sql("tidemark_db_version");
    assert!(sql.contains("CREATE SEQUENCE IF NOT EXISTS tidemark_db_version_id_seq"));
    assert!(sql.contains("nextval('tidemark_db_version_id_seq')"));
    assert!(sql.contains("CREATE TABLE IF NOT EXISTS tidemark_db_version"));
}

#[test]
fn test_insert_and_delete_sql() {
    let d = DuckDbDialect;
    assert_eq!(
        d.insert_version_sql("ledger", 42, true),
        "INSERT INTO ledger (version_id, is_applied) VALUES (42, true)"
    );
    assert_eq!(
        d.delete_version_sql("ledger", 42),
        "DELETE FROM ledger WHERE version_id = 42"
    );
}

#[test]
fn test_sqlite_booleans_are_integers() {
    assert_eq!(
        SqliteDialect.insert_version_sql("ledger", 7, true),
        "INSERT INTO ledger (version_id, is_applied) VALUES (7, 1)"
    );
    assert_eq!(
        SqliteDialect.insert_version_sql("ledger", 7, false),
        "INSERT INTO ledger (version_id, is_applied) VALUES (7, 0)"
    );
}

#[test]
fn test_list_sql_orders_newest_first() {
    for dialect in [DbType::DuckDb, DbType::Postgres, DbType::Sqlite].map(dialect_for) {
        let sql = dialect.list_versions_sql("ledger");
        assert!(sql.starts_with("SELECT version_id, is_applied"), "{sql}");
        assert!(sql.ends_with("ORDER BY id DESC"), "{sql}");
    }
}
