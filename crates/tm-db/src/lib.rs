//! tm-db - Database abstraction layer for Tidemark
//!
//! This crate provides the `Database`, `Executor`, and `Transaction` traits,
//! the ledger `Dialect` contract with DuckDB, PostgreSQL, and SQLite
//! variants, and a DuckDB backend implementation.

pub mod dialect;
pub mod duckdb;
pub mod error;
pub mod record;
pub mod traits;

pub use dialect::{dialect_for, Dialect, DuckDbDialect, PostgresDialect, SqliteDialect};
pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use record::MigrationRecord;
pub use traits::{Database, DbType, Executor, Transaction};
