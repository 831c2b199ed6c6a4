//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tm_core::{Config, DbType};
use tm_db::{Database, DbError, DuckDbBackend};
use tm_migrate::{Logger, Options, Provider};

use crate::cli::{GlobalArgs, MigrateArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ExitCode is control flow, not a user-facing error
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Prints progress lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StdoutLogger;

impl Logger for StdoutLogger {
    fn print(&self, line: &str) {
        println!("{line}");
    }
}

/// Everything a command needs: resolved config, engine, and project root
pub(crate) struct Session {
    pub(crate) config: Config,
    pub(crate) provider: Provider,
    root: PathBuf,
}

impl Session {
    /// Load config and build the provider, applying global flag overrides
    pub(crate) fn load(global: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&global.project_dir);
        let mut config = load_config(global, &root)?;

        if let Some(dir) = &global.dir {
            config.migrations_dir = dir.clone();
        }
        if let Some(table) = &global.table {
            config.table_name = table.clone();
        }
        if let Some(database) = &global.database {
            config.database.path = database.clone();
        }
        config.verbose |= global.verbose;
        config.validate().context("Invalid configuration")?;

        log::debug!(
            "Migrations in {}, ledger table {}",
            config.migrations_dir_absolute(&root).display(),
            config.table_name
        );

        let provider = Provider::from_config(&config, &root).with_logger(Arc::new(StdoutLogger));
        Ok(Self {
            config,
            provider,
            root,
        })
    }

    /// Open the configured database
    pub(crate) fn open_database(&self) -> Result<Box<dyn Database>> {
        let db_config = &self.config.database;
        match db_config.db_type {
            DbType::DuckDb => {
                let db = if db_config.path == ":memory:" {
                    DuckDbBackend::in_memory()?
                } else {
                    DuckDbBackend::from_path(&resolve(&self.root, &db_config.path))?
                };
                Ok(Box::new(db))
            }
            other => Err(DbError::NotImplemented {
                backend: other.to_string(),
                feature: "database connection".to_string(),
            }
            .into()),
        }
    }

    /// Per-call options from config toggles and command flags
    pub(crate) fn options(&self, args: &MigrateArgs) -> Options {
        Options::new()
            .allow_missing(args.allow_missing || self.config.allow_missing)
            .no_versioning(args.no_versioning || self.config.no_versioning)
            .sequential_only(args.sequential_only || self.config.sequential_only)
            .no_output(args.no_output)
    }
}

/// Explicit `--config`, else `tidemark.yml` in the project, else defaults
fn load_config(global: &GlobalArgs, root: &Path) -> Result<Config> {
    if let Some(path) = &global.config {
        return Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}"));
    }
    let has_file = tm_core::config::CONFIG_FILE_NAMES
        .iter()
        .any(|name| root.join(name).is_file());
    if has_file {
        return Config::load_from_dir(root).context("Failed to load project config");
    }
    log::debug!("No config file in {}, using defaults", root.display());
    Ok(Config::default())
}

fn resolve(root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
