//! One observed step of a run

use crate::error::MigrateResult;
use crate::event::{VersionApplyEvent, VersionCountEvent};
use crate::options::Options;
use crate::provider::Provider;
use chrono::Utc;
use tm_core::{Direction, Migration, Migrations};
use tm_db::Database;

/// Version edge crossed by one step
#[derive(Debug, Clone)]
pub(crate) struct Transition {
    from: i64,
    from_source: String,
    to: i64,
    to_source: String,
}

/// Source path of `version` in `migrations`, empty for version 0 or unknown
fn source_of(migrations: &Migrations, version: i64) -> String {
    migrations
        .current(version)
        .map(|m| m.source.display().to_string())
        .unwrap_or_default()
}

impl Transition {
    /// From `current` forward to `target`
    pub(crate) fn up(migrations: &Migrations, current: i64, target: &Migration) -> Self {
        Self {
            from: current,
            from_source: source_of(migrations, current),
            to: target.version,
            to_source: target.source.display().to_string(),
        }
    }

    /// From `target` back to the unit before it, or 0
    pub(crate) fn down(migrations: &Migrations, target: &Migration) -> Self {
        let (to, to_source) = match migrations.previous(target.version) {
            Ok(prev) => (prev.version, prev.source.display().to_string()),
            Err(_) => (0, String::new()),
        };
        Self {
            from: target.version,
            from_source: target.source.display().to_string(),
            to,
            to_source,
        }
    }

    fn event(&self, applied: bool, down: bool, versioned: bool) -> VersionApplyEvent {
        VersionApplyEvent {
            from: self.from,
            from_source: self.from_source.clone(),
            to: self.to,
            to_source: self.to_source.clone(),
            applied_at: Utc::now(),
            applied,
            down,
            versioned,
        }
    }
}

impl Provider {
    /// Run one migration between its before and after apply events
    pub(crate) fn run_step(
        &self,
        db: &dyn Database,
        migration: &Migration,
        direction: Direction,
        versioned: bool,
        transition: &Transition,
        options: &Options,
    ) -> MigrateResult<()> {
        let down = direction.is_down();
        options.send(transition.event(false, down, versioned));
        self.run_migration(db, migration, direction, versioned, options)?;
        options.send(transition.event(true, down, versioned));
        Ok(())
    }

    /// Announce how many steps a run is about to take; silent when zero
    pub(crate) fn announce(
        &self,
        options: &Options,
        migrations: &Migrations,
        version: i64,
        total_versions_left: usize,
    ) {
        if total_versions_left == 0 {
            return;
        }
        options.send(VersionCountEvent {
            version,
            source: source_of(migrations, version),
            total_versions_left,
        });
    }
}
