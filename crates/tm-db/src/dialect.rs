//! Ledger dialect contract
//!
//! A [`Dialect`] knows how to spell the four ledger operations for one
//! database vendor. The migration engine never builds vendor SQL itself; it
//! asks the dialect selected at construction time.

use crate::traits::DbType;

/// Ledger SQL for one database vendor.
pub trait Dialect: Send + Sync {
    /// Dialect name for logging
    fn name(&self) -> &'static str;

    /// Statements creating the ledger table (may be more than one statement)
    fn create_version_table_sql(&self, table: &str) -> String;

    /// Statement appending a ledger row for `version`
    fn insert_version_sql(&self, table: &str, version: i64, applied: bool) -> String;

    /// Statement removing every ledger row for `version`
    fn delete_version_sql(&self, table: &str, version: i64) -> String;

    /// Query listing ledger rows newest first.
    ///
    /// Selects `version_id`, `is_applied`, and the row timestamp as epoch
    /// milliseconds.
    fn list_versions_sql(&self, table: &str) -> String;
}

/// Select the ledger dialect for a database type
pub fn dialect_for(db_type: DbType) -> Box<dyn Dialect> {
    match db_type {
        DbType::DuckDb => Box::new(DuckDbDialect),
        DbType::Postgres => Box::new(PostgresDialect),
        DbType::Sqlite => Box::new(SqliteDialect),
    }
}

/// DuckDB ledger dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbDialect;

impl Dialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn create_version_table_sql(&self, table: &str) -> String {
        // DuckDB has no SERIAL; ids come from a sequence named after the table.
        format!(
            "CREATE SEQUENCE IF NOT EXISTS {table}_id_seq START 1;
             CREATE TABLE IF NOT EXISTS {table} (
                 id         BIGINT PRIMARY KEY DEFAULT nextval('{table}_id_seq'),
                 version_id BIGINT NOT NULL,
                 is_applied BOOLEAN NOT NULL,
                 tstamp     TIMESTAMP DEFAULT now()
             );"
        )
    }

    fn insert_version_sql(&self, table: &str, version: i64, applied: bool) -> String {
        format!("INSERT INTO {table} (version_id, is_applied) VALUES ({version}, {applied})")
    }

    fn delete_version_sql(&self, table: &str, version: i64) -> String {
        format!("DELETE FROM {table} WHERE version_id = {version}")
    }

    fn list_versions_sql(&self, table: &str) -> String {
        format!("SELECT version_id, is_applied, epoch_ms(tstamp) FROM {table} ORDER BY id DESC")
    }
}

/// PostgreSQL ledger dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn create_version_table_sql(&self, table: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                 id serial NOT NULL,
                 version_id bigint NOT NULL,
                 is_applied boolean NOT NULL,
                 tstamp timestamp NULL DEFAULT now(),
                 PRIMARY KEY(id)
             );"
        )
    }

    fn insert_version_sql(&self, table: &str, version: i64, applied: bool) -> String {
        format!("INSERT INTO {table} (version_id, is_applied) VALUES ({version}, {applied})")
    }

    fn delete_version_sql(&self, table: &str, version: i64) -> String {
        format!("DELETE FROM {table} WHERE version_id = {version}")
    }

    fn list_versions_sql(&self, table: &str) -> String {
        format!(
            "SELECT version_id, is_applied, (EXTRACT(EPOCH FROM tstamp) * 1000)::BIGINT \
             FROM {table} ORDER BY id DESC"
        )
    }
}

/// SQLite ledger dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn create_version_table_sql(&self, table: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 version_id INTEGER NOT NULL,
                 is_applied INTEGER NOT NULL,
                 tstamp TIMESTAMP DEFAULT (datetime('now'))
             );"
        )
    }

    fn insert_version_sql(&self, table: &str, version: i64, applied: bool) -> String {
        // SQLite stores booleans as integers
        format!(
            "INSERT INTO {table} (version_id, is_applied) VALUES ({version}, {})",
            i32::from(applied)
        )
    }

    fn delete_version_sql(&self, table: &str, version: i64) -> String {
        format!("DELETE FROM {table} WHERE version_id = {version}")
    }

    fn list_versions_sql(&self, table: &str) -> String {
        format!(
            "SELECT version_id, is_applied, CAST(strftime('%s', tstamp) AS INTEGER) * 1000 \
             FROM {table} ORDER BY id DESC"
        )
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
