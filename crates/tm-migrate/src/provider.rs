//! Migration engine instance
//!
//! A [`Provider`] holds everything an operation needs besides the database
//! handle: the migration directory, ledger table and dialect, code
//! migration registry, template package name, and output sink. Construct
//! one per ledger and pass it around explicitly.
//!
//! Only one operation should drive a given ledger at a time. Nothing here
//! locks the ledger across processes.

use crate::error::MigrateResult;
use crate::ledger::{current_version, Ledger};
use crate::logger::{LogLogger, Logger};
use crate::options::Options;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tm_core::{collect_migrations, Config, Migrations, Registry};
use tm_db::{dialect_for, Database, DbType, Dialect};

/// Lowest version collected
pub const MIN_VERSION: i64 = 0;

/// Highest version collected
pub const MAX_VERSION: i64 = i64::MAX;

/// Default ledger table name
pub const DEFAULT_TABLE_NAME: &str = "tidemark_db_version";

/// Default value of `PackageName` in templated migrations
pub const DEFAULT_PACKAGE_NAME: &str = "migrations";

/// Configured migration engine
pub struct Provider {
    dir: PathBuf,
    table_name: String,
    dialect: Box<dyn Dialect>,
    package_name: String,
    registry: Registry,
    logger: Arc<dyn Logger>,
    verbose: bool,
}

impl Provider {
    /// Create a provider for `dir` with DuckDB ledger SQL and default names
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            dialect: dialect_for(DbType::DuckDb),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            registry: Registry::new(),
            logger: Arc::new(LogLogger),
            verbose: false,
        }
    }

    /// Build a provider from tidemark.yml settings rooted at `root`
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(config.migrations_dir_absolute(root))
            .with_table_name(&config.table_name)
            .with_db_type(config.database.db_type)
            .with_package_name(&config.package_name)
            .with_verbose(config.verbose)
    }

    /// Set the ledger table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Use the ledger dialect for a database type
    pub fn with_db_type(self, db_type: DbType) -> Self {
        self.with_dialect(dialect_for(db_type))
    }

    /// Use a custom ledger dialect
    pub fn with_dialect(mut self, dialect: Box<dyn Dialect>) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set `PackageName` for templated migrations
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    /// Use a code migration registry
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Route progress lines to `logger`
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Echo transaction boundaries and statements as they run
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Migration directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ledger table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Ledger dialect
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Template package name
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Code migration registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Collect migrations with `min <= version <= max`
    pub fn collect(&self, min: i64, max: i64) -> MigrateResult<Migrations> {
        Ok(collect_migrations(&self.dir, &self.registry, min, max)?)
    }

    /// Current ledger version, creating the ledger table if needed
    pub fn db_version(&self, db: &dyn Database) -> MigrateResult<i64> {
        let ledger = self.ledger();
        ledger.ensure_ledger_table(db)?;
        let rows = ledger.query_all_ledger_rows(db)?;
        Ok(current_version(&rows))
    }

    pub(crate) fn ledger(&self) -> Ledger<'_> {
        Ledger::new(self.dialect.as_ref(), &self.table_name)
    }

    /// Print a progress line unless the call is silenced
    pub(crate) fn print(&self, options: &Options, line: &str) {
        if !options.no_output {
            self.logger.print(line);
        }
    }

    /// Print a line only in verbose mode
    pub(crate) fn verbose_info(&self, options: &Options, line: &str) {
        if self.verbose {
            self.print(options, line);
        }
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("dir", &self.dir)
            .field("table_name", &self.table_name)
            .field("dialect", &self.dialect.name())
            .field("package_name", &self.package_name)
            .field("registry", &self.registry)
            .field("verbose", &self.verbose)
            .finish()
    }
}
