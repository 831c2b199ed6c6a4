//! Version ledger operations
//!
//! The ledger is append-only in spirit: the newest row for a version decides
//! whether it is applied. Rows are read newest first.

use crate::error::MigrateResult;
use std::collections::{BTreeMap, BTreeSet};
use tm_db::{Database, Dialect, Executor, MigrationRecord};

/// Ledger SQL bound to one table
pub(crate) struct Ledger<'a> {
    dialect: &'a dyn Dialect,
    table: &'a str,
}

impl<'a> Ledger<'a> {
    pub(crate) fn new(dialect: &'a dyn Dialect, table: &'a str) -> Self {
        Self { dialect, table }
    }

    /// Create the ledger table with its version-0 row if it does not exist
    pub(crate) fn ensure_ledger_table(&self, db: &dyn Database) -> MigrateResult<()> {
        if db.relation_exists(self.table)? {
            return Ok(());
        }

        log::debug!(
            "Creating ledger table {} ({} dialect)",
            self.table,
            self.dialect.name()
        );
        let tx = db.begin()?;
        tx.execute_batch(&self.dialect.create_version_table_sql(self.table))?;
        tx.execute(&self.dialect.insert_version_sql(self.table, 0, true))?;
        tx.commit()?;
        Ok(())
    }

    /// All ledger rows, newest first
    pub(crate) fn query_all_ledger_rows(
        &self,
        db: &dyn Database,
    ) -> MigrateResult<Vec<MigrationRecord>> {
        Ok(db.query_ledger(&self.dialect.list_versions_sql(self.table))?)
    }

    pub(crate) fn insert_applied_row<E: Executor + ?Sized>(
        &self,
        exec: &E,
        version: i64,
    ) -> tm_db::DbResult<()> {
        exec.execute(&self.dialect.insert_version_sql(self.table, version, true))?;
        Ok(())
    }

    pub(crate) fn delete_applied_row<E: Executor + ?Sized>(
        &self,
        exec: &E,
        version: i64,
    ) -> tm_db::DbResult<()> {
        exec.execute(&self.dialect.delete_version_sql(self.table, version))?;
        Ok(())
    }
}

/// Newest row per version
pub(crate) fn latest_states(rows: &[MigrationRecord]) -> BTreeMap<i64, &MigrationRecord> {
    let mut states = BTreeMap::new();
    for row in rows {
        states.entry(row.version_id).or_insert(row);
    }
    states
}

/// Versions whose newest row is applied, excluding the version-0 baseline
pub(crate) fn applied_versions(rows: &[MigrationRecord]) -> BTreeSet<i64> {
    latest_states(rows)
        .into_iter()
        .filter(|(v, row)| *v != 0 && row.is_applied)
        .map(|(v, _)| v)
        .collect()
}

/// Current version: the most recently applied version still applied.
///
/// Rows are newest first. A version whose newest row is a rollback is
/// skipped along with all its older rows. Returns 0 when nothing is applied.
pub(crate) fn current_version(rows: &[MigrationRecord]) -> i64 {
    let mut seen = BTreeSet::new();
    for row in rows {
        if !seen.insert(row.version_id) {
            continue;
        }
        if row.is_applied {
            return row.version_id;
        }
    }
    0
}
