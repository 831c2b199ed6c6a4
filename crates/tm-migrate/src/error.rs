//! Error types for tm-migrate

use thiserror::Error;
use tm_core::{BoxError, CoreError, Direction};
use tm_db::DbError;
use tm_jinja::JinjaError;
use tm_sql::SqlError;

/// One out-of-order migration found during reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMigration {
    /// Version absent from the ledger
    pub version: i64,
    /// Source path of the migration
    pub source: String,
}

/// Every missing migration found in one run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MissingMigrations {
    /// Missing migrations in ascending version order
    pub migrations: Vec<MissingMigration>,
}

impl MissingMigrations {
    /// Versions of the missing migrations
    pub fn versions(&self) -> Vec<i64> {
        self.migrations.iter().map(|m| m.version).collect()
    }
}

impl std::fmt::Display for MissingMigrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "found {} missing migrations:", self.migrations.len())?;
        for m in &self.migrations {
            write!(f, "\n\tversion {}: {}", m.version, m.source)?;
        }
        Ok(())
    }
}

/// Migration engine errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Collection, sequencing, or config error (T001)
    #[error("[T001] {0}")]
    Core(#[from] CoreError),

    /// Ledger or connection error outside a single migration (T002)
    #[error("[T002] {0}")]
    Db(#[from] DbError),

    /// Template migration failed to render (T003)
    #[error("[T003] {script}: failed to render template migration: {source}")]
    Template { script: String, source: JinjaError },

    /// SQL migration failed to parse (T004)
    #[error("[T004] {script}: failed to parse SQL migration ({direction}): {source}")]
    Parse {
        script: String,
        direction: Direction,
        source: SqlError,
    },

    /// A migration statement failed (T005)
    #[error("[T005] {script}: failed to execute SQL statement {statement:?}: {source}")]
    Statement {
        script: String,
        statement: String,
        source: DbError,
    },

    /// The ledger row for a migration could not be written (T006)
    #[error("[T006] {script}: failed to record version {version}: {source}")]
    Ledger {
        script: String,
        version: i64,
        source: DbError,
    },

    /// A code migration function returned an error (T007)
    #[error("[T007] {script}: code migration failed ({direction}): {source}")]
    Function {
        script: String,
        direction: Direction,
        source: BoxError,
    },

    /// A code migration file has no registered functions (T008)
    #[error("[T008] {script}: code migration is not registered; add it to the Registry passed to the Provider")]
    Unregistered { script: String },

    /// Transaction begin, commit, or rollback failed (T009)
    #[error("[T009] {script}: transaction failed: {source}")]
    Transaction { script: String, source: DbError },

    /// Ledger version after applying a missing migration is not that migration (T010)
    #[error("[T010] missing migration {expected} does not match current db version {current}")]
    VersionMismatch { expected: i64, current: i64 },

    /// Out-of-order migrations found and not allowed (T011)
    #[error("[T011] {0}")]
    MissingMigrations(MissingMigrations),

    /// Nothing left to apply in single-step mode (T012)
    #[error("[T012] no next version found after {current}")]
    NoNextVersion { current: i64 },

    /// Timestamp-numbered migrations found in sequential-only mode (T013)
    #[error("[T013] found timestamp-numbered migrations in sequential-only mode: {versions:?}")]
    TimestampedMigrations { versions: Vec<i64> },
}

impl MigrateError {
    /// Whether this is the exhaustion signal from a single-step run
    pub fn is_no_next_version(&self) -> bool {
        matches!(
            self,
            MigrateError::NoNextVersion { .. }
                | MigrateError::Core(CoreError::NoNextVersion { .. })
        )
    }
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
