//! Dry-run validation of the migration directory

use crate::error::MigrateError;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use serde::Serialize;
use tm_core::{Direction, Migration, MigrationKind};

/// What a verify issue is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyIssueKind {
    /// The directory could not be collected
    Collection,
    /// A script could not be read
    Read,
    /// A `.tpl.sql` script failed to render
    Template,
    /// A SQL script failed to parse
    Parse,
    /// A `.rs` migration has no registered functions
    Unregistered,
}

/// One problem found by [`Provider::verify`]
#[derive(Debug, Clone, Serialize)]
pub struct VerifyIssue {
    /// Script name, or the directory for collection issues
    pub script: String,
    /// Issue category
    pub kind: VerifyIssueKind,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for VerifyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.script, self.message)
    }
}

/// Result of verifying a migration directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyReport {
    /// Migrations collected
    pub total: usize,
    /// Timestamp-numbered versions; reported but not an error
    pub timestamped: Vec<i64>,
    /// Problems found
    pub issues: Vec<VerifyIssue>,
}

impl VerifyReport {
    /// True when no issues were found
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any version looks timestamp-derived
    pub fn has_timestamped(&self) -> bool {
        !self.timestamped.is_empty()
    }

    fn push(&mut self, script: impl Into<String>, kind: VerifyIssueKind, err: &dyn std::fmt::Display) {
        self.issues.push(VerifyIssue {
            script: script.into(),
            kind,
            message: err.to_string(),
        });
    }
}

impl Provider {
    /// Check the migration directory without touching any database.
    ///
    /// Every template is rendered, every SQL script is parsed in both
    /// directions, and every code migration must be registered.
    pub fn verify(&self) -> VerifyReport {
        let mut report = VerifyReport::default();

        let migrations = match self.collect(MIN_VERSION, MAX_VERSION) {
            Ok(migrations) => migrations,
            Err(e) => {
                report.push(
                    self.dir().display().to_string(),
                    VerifyIssueKind::Collection,
                    &e,
                );
                return report;
            }
        };

        report.total = migrations.len();
        report.timestamped = migrations.timestamped().versions();

        for m in &migrations {
            self.verify_migration(m, &mut report);
        }

        log::debug!(
            "Verified {} migrations: {} issues",
            report.total,
            report.issues.len()
        );
        report
    }

    fn verify_migration(&self, migration: &Migration, report: &mut VerifyReport) {
        let script = migration.script();

        if migration.kind == MigrationKind::Code {
            if migration.is_unregistered() {
                report.push(
                    script.clone(),
                    VerifyIssueKind::Unregistered,
                    &MigrateError::Unregistered { script },
                );
            }
            return;
        }

        let text = match self.read_script(migration) {
            Ok(text) => text,
            Err(e @ MigrateError::Template { .. }) => {
                report.push(script, VerifyIssueKind::Template, &e);
                return;
            }
            Err(e) => {
                report.push(script, VerifyIssueKind::Read, &e);
                return;
            }
        };

        for direction in [Direction::Up, Direction::Down] {
            if let Err(source) = tm_sql::parse_sql_migration(&text, direction) {
                let err = MigrateError::Parse {
                    script: script.clone(),
                    direction,
                    source,
                };
                report.push(script.clone(), VerifyIssueKind::Parse, &err);
                // both directions share one parse; report once
                break;
            }
        }
    }
}
