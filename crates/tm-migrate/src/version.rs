//! File and ledger version reporting

use crate::error::MigrateResult;
use crate::options::Options;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use tm_db::Database;

/// Reported when a version is unknown
pub const UNKNOWN_VERSION: i64 = -1;

impl Provider {
    /// Highest migration file version and current ledger version.
    ///
    /// Either is [`UNKNOWN_VERSION`] when there are no files, or when
    /// versioning is off for the ledger side.
    pub fn versions(&self, db: &dyn Database, options: &Options) -> MigrateResult<(i64, i64)> {
        let migrations = self.collect(MIN_VERSION, MAX_VERSION)?;
        let file_version = migrations.max_version().unwrap_or(UNKNOWN_VERSION);
        if options.no_versioning {
            return Ok((file_version, UNKNOWN_VERSION));
        }
        Ok((file_version, self.db_version(db)?))
    }

    /// Print the file and ledger versions
    pub fn version(&self, db: &dyn Database, options: Options) -> MigrateResult<(i64, i64)> {
        let (file_version, db_version) = self.versions(db, &options)?;
        if file_version != UNKNOWN_VERSION {
            self.print(&options, &format!("tidemark: file version {file_version}"));
        }
        if db_version != UNKNOWN_VERSION {
            self.print(&options, &format!("tidemark: version {db_version}"));
        }
        Ok((file_version, db_version))
    }
}
