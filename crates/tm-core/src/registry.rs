//! Registration table for code migrations
//!
//! Code migrations are closures handed to the engine before any operation
//! runs. Each one is keyed by the version parsed from its source name, the
//! same way script migrations are keyed by their file name.

use crate::error::{CoreError, CoreResult};
use crate::version::numeric_component;
use std::collections::BTreeMap;
use std::sync::Arc;
use tm_db::Transaction;

/// Boxed error returned by code migration functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One direction of a code migration, run inside the unit's transaction
pub type MigrationFn = Arc<dyn Fn(&dyn Transaction) -> Result<(), BoxError> + Send + Sync>;

/// Registered up/down pair for one version
#[derive(Clone)]
pub struct CodeMigration {
    /// Source name the version was parsed from (e.g. `00002_rename_root.rs`)
    pub source: String,

    /// Up function; `None` applies as an empty migration
    pub up: Option<MigrationFn>,

    /// Down function; `None` reverts as an empty migration
    pub down: Option<MigrationFn>,
}

impl std::fmt::Debug for CodeMigration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeMigration")
            .field("source", &self.source)
            .field("up", &self.up.is_some())
            .field("down", &self.down.is_some())
            .finish()
    }
}

/// Version-keyed table of code migrations
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<i64, CodeMigration>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an up/down pair under the version parsed from `source`
    pub fn add<U, D>(&mut self, source: &str, up: U, down: D) -> CoreResult<()>
    where
        U: Fn(&dyn Transaction) -> Result<(), BoxError> + Send + Sync + 'static,
        D: Fn(&dyn Transaction) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let up: MigrationFn = Arc::new(up);
        let down: MigrationFn = Arc::new(down);
        self.add_fns(source, Some(up), Some(down))
    }

    /// Register optional functions; a missing direction runs as empty
    pub fn add_fns(
        &mut self,
        source: &str,
        up: Option<MigrationFn>,
        down: Option<MigrationFn>,
    ) -> CoreResult<()> {
        let version = numeric_component(source)?;
        if let Some(existing) = self.entries.get(&version) {
            return Err(CoreError::DuplicateRegistration {
                version,
                first: existing.source.clone(),
                second: source.to_string(),
            });
        }

        log::debug!("Registered code migration {} ({})", version, source);
        self.entries.insert(
            version,
            CodeMigration {
                source: source.to_string(),
                up,
                down,
            },
        );
        Ok(())
    }

    /// Look up the registration for a version
    pub fn get(&self, version: i64) -> Option<&CodeMigration> {
        self.entries.get(&version)
    }

    /// Iterate registrations in ascending version order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &CodeMigration)> {
        self.entries.iter().map(|(v, c)| (*v, c))
    }

    /// Number of registered versions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_tx: &dyn Transaction) -> Result<(), BoxError> {
        Ok(())
    }

    #[test]
    fn test_add_parses_version() {
        let mut registry = Registry::new();
        registry.add("00002_rename_root.rs", noop, noop).unwrap();

        let entry = registry.get(2).unwrap();
        assert_eq!(entry.source, "00002_rename_root.rs");
        assert!(entry.up.is_some());
        assert!(entry.down.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_fns_without_down() {
        let mut registry = Registry::new();
        let up: MigrationFn = Arc::new(noop);
        registry.add_fns("7_backfill.rs", Some(up), None).unwrap();

        let entry = registry.get(7).unwrap();
        assert!(entry.up.is_some());
        assert!(entry.down.is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = Registry::new();
        registry.add("3_first.rs", noop, noop).unwrap();
        let err = registry.add("0003_second.rs", noop, noop).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateRegistration { version: 3, .. }));
    }

    #[test]
    fn test_bad_source_name() {
        let mut registry = Registry::new();
        assert!(registry.add("rename_root.rs", noop, noop).is_err());
        assert!(registry.add("4_rename_root.go", noop, noop).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iter_ascending() {
        let mut registry = Registry::new();
        registry.add("9_c.rs", noop, noop).unwrap();
        registry.add("1_a.rs", noop, noop).unwrap();
        registry.add("5_b.rs", noop, noop).unwrap();

        let versions: Vec<i64> = registry.iter().map(|(v, _)| v).collect();
        assert_eq!(versions, vec![1, 5, 9]);
    }
}
