//! Database trait definitions

use crate::error::DbResult;
use crate::record::MigrationRecord;
use serde::{Deserialize, Serialize};

/// Anything that can run SQL: a connection or an open transaction.
pub trait Executor {
    /// Execute a single SQL statement, returns affected rows
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute one or more SQL statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a query and return its row count.
    ///
    /// The engine never calls this; it is an inspection aid for callers
    /// and tests checking the effect of a migration.
    fn query_count(&self, sql: &str) -> DbResult<usize>;
}

/// An open transaction.
///
/// Dropping a transaction without calling [`commit`](Transaction::commit)
/// rolls it back.
pub trait Transaction: Executor {
    /// Commit all statements executed through this transaction
    fn commit(self: Box<Self>) -> DbResult<()>;

    /// Discard all statements executed through this transaction
    fn rollback(self: Box<Self>) -> DbResult<()>;
}

/// Database abstraction trait for Tidemark
///
/// Implementations must be Send + Sync so an operation can run on a
/// producer thread while the caller drains its events.
pub trait Database: Executor + Send + Sync {
    /// Begin a transaction. Statements run through the returned handle are
    /// atomic; the connection is not usable elsewhere until it is finished.
    fn begin(&self) -> DbResult<Box<dyn Transaction + '_>>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Run a ledger listing query.
    ///
    /// The query must select `version_id`, `is_applied`, and the row
    /// timestamp as epoch milliseconds (nullable), in that order.
    fn query_ledger(&self, sql: &str) -> DbResult<Vec<MigrationRecord>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// DuckDB (default)
    #[default]
    DuckDb,
    /// PostgreSQL
    Postgres,
    /// SQLite
    Sqlite,
}

impl std::fmt::Display for DbType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbType::DuckDb => write!(f, "duckdb"),
            DbType::Postgres => write!(f, "postgres"),
            DbType::Sqlite => write!(f, "sqlite"),
        }
    }
}
