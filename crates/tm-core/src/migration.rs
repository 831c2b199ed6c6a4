//! A single migration unit

use crate::registry::CodeMigration;
use crate::version::base_name;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Direction a migration is run in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply the change
    Up,
    /// Revert the change
    Down,
}

impl Direction {
    /// Whether this is the down direction
    pub fn is_down(self) -> bool {
        matches!(self, Direction::Down)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// How a migration's actions are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationKind {
    /// Plain `.sql` script
    Sql,
    /// `.tpl.sql` script rendered before parsing
    TemplateSql,
    /// Registered up/down functions (`.rs` marker or registry entry)
    Code,
}

impl MigrationKind {
    /// Kind implied by a file name, if it is a migration file at all
    pub fn from_file_name(name: &str) -> Option<Self> {
        use crate::version::{CODE_EXTENSION, SQL_EXTENSION, TEMPLATE_SQL_EXTENSION};

        if name.ends_with(TEMPLATE_SQL_EXTENSION) {
            Some(MigrationKind::TemplateSql)
        } else if name.ends_with(SQL_EXTENSION) {
            Some(MigrationKind::Sql)
        } else if name.ends_with(CODE_EXTENSION) {
            Some(MigrationKind::Code)
        } else {
            None
        }
    }
}

/// One versioned, reversible change
///
/// Units are rebuilt from the migration directory at the start of every
/// operation and never persisted.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Version parsed from the file name prefix
    pub version: i64,

    /// Path of the file, or the registered source name for code migrations
    pub source: PathBuf,

    /// Kind of actions this unit carries
    pub kind: MigrationKind,

    /// Registered functions for code migrations; `None` when unregistered
    pub code: Option<CodeMigration>,
}

impl Migration {
    /// Create a script-backed unit
    pub fn new(version: i64, source: impl Into<PathBuf>, kind: MigrationKind) -> Self {
        Self {
            version,
            source: source.into(),
            kind,
            code: None,
        }
    }

    /// Create a unit from a code registration
    pub fn from_code(version: i64, source: impl Into<PathBuf>, code: Option<CodeMigration>) -> Self {
        Self {
            version,
            source: source.into(),
            kind: MigrationKind::Code,
            code,
        }
    }

    /// Base file name of the source, used in log lines and events
    pub fn script(&self) -> String {
        let source = self.source.to_string_lossy();
        base_name(&source).to_string()
    }

    /// Full source path
    pub fn path(&self) -> &Path {
        &self.source
    }

    /// Whether a code migration has no registered implementation
    pub fn is_unregistered(&self) -> bool {
        self.kind == MigrationKind::Code && self.code.is_none()
    }
}

impl std::fmt::Display for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source.display())
    }
}
