//! Forward migration: Up, UpTo, UpByOne

use crate::error::{MigrateError, MigrateResult, MissingMigration, MissingMigrations};
use crate::ledger::applied_versions;
use crate::options::Options;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use crate::step::Transition;
use std::collections::BTreeSet;
use tm_core::{CoreError, Direction, Migration, Migrations};
use tm_db::Database;

impl Provider {
    /// Apply every pending migration
    pub fn up(&self, db: &dyn Database, options: Options) -> MigrateResult<()> {
        self.up_to(db, MAX_VERSION, options)
    }

    /// Apply the next pending migration.
    ///
    /// Returns [`MigrateError::NoNextVersion`] when nothing is left.
    pub fn up_by_one(&self, db: &dyn Database, options: Options) -> MigrateResult<()> {
        self.up_to(db, MAX_VERSION, options.up_by_one())
    }

    /// Apply pending migrations up to and including `version`
    pub fn up_to(&self, db: &dyn Database, version: i64, options: Options) -> MigrateResult<()> {
        let migrations = self.collect(MIN_VERSION, version)?;

        if options.sequential_only {
            let timestamped = migrations.timestamped();
            if !timestamped.is_empty() {
                return Err(MigrateError::TimestampedMigrations {
                    versions: timestamped.versions(),
                });
            }
        }

        if options.no_versioning {
            let Some(first) = migrations.first() else {
                return Ok(());
            };
            // single-step without a ledger re-applies the first migration
            let target = if options.apply_up_by_one {
                first.version
            } else {
                version
            };
            return self.up_to_no_versioning(db, &migrations, target, &options);
        }

        let ledger = self.ledger();
        ledger.ensure_ledger_table(db)?;
        let rows = ledger.query_all_ledger_rows(db)?;
        let known = applied_versions(&rows);

        let missing = find_missing_migrations(&known, &migrations);
        if !missing.is_empty() && !options.allow_missing {
            return Err(MigrateError::MissingMigrations(MissingMigrations {
                migrations: missing
                    .iter()
                    .map(|m| MissingMigration {
                        version: m.version,
                        source: m.source.display().to_string(),
                    })
                    .collect(),
            }));
        }

        if options.allow_missing {
            return self.up_with_missing(db, &missing, &migrations, known, &options);
        }

        // with nothing missing, every collected version below the max is applied
        let mut current = known.last().copied().unwrap_or(0);
        let pending = migrations.iter().filter(|m| m.version > current).count();
        let pending = if options.apply_up_by_one {
            pending.min(1)
        } else {
            pending
        };
        self.announce(&options, &migrations, current, pending);

        loop {
            let next = match migrations.next(current) {
                Ok(next) => next,
                Err(CoreError::NoNextVersion { .. }) => break,
                Err(e) => return Err(e.into()),
            };
            let transition = Transition::up(&migrations, current, next);
            self.run_step(db, next, Direction::Up, true, &transition, &options)?;
            if options.apply_up_by_one {
                return Ok(());
            }
            current = self.db_version(db)?;
        }

        self.finish_up(current, &options)
    }

    /// Apply missing migrations first, checking the ledger after each, then
    /// everything not yet applied.
    fn up_with_missing(
        &self,
        db: &dyn Database,
        missing: &[&Migration],
        migrations: &Migrations,
        mut applied: BTreeSet<i64>,
        options: &Options,
    ) -> MigrateResult<()> {
        let mut current = self.db_version(db)?;
        let pending = migrations
            .iter()
            .filter(|m| !applied.contains(&m.version))
            .count();
        let pending = if options.apply_up_by_one {
            pending.min(1)
        } else {
            pending
        };
        self.announce(options, migrations, current, pending);

        for &m in missing {
            let transition = Transition::up(migrations, current, m);
            self.run_step(db, m, Direction::Up, true, &transition, options)?;
            if options.apply_up_by_one {
                return Ok(());
            }
            current = self.db_version(db)?;
            if current != m.version {
                return Err(MigrateError::VersionMismatch {
                    expected: m.version,
                    current,
                });
            }
            applied.insert(m.version);
        }

        for m in migrations {
            if applied.contains(&m.version) {
                continue;
            }
            let transition = Transition::up(migrations, current, m);
            self.run_step(db, m, Direction::Up, true, &transition, options)?;
            if options.apply_up_by_one {
                return Ok(());
            }
            applied.insert(m.version);
            current = m.version;
        }

        let current = self.db_version(db)?;
        self.finish_up(current, options)
    }

    fn finish_up(&self, current: i64, options: &Options) -> MigrateResult<()> {
        self.print(
            options,
            &format!("tidemark: no migrations to run. current version: {current}"),
        );
        if options.apply_up_by_one {
            return Err(MigrateError::NoNextVersion { current });
        }
        Ok(())
    }

    /// Apply every migration up to `version` without touching the ledger
    fn up_to_no_versioning(
        &self,
        db: &dyn Database,
        migrations: &Migrations,
        version: i64,
        options: &Options,
    ) -> MigrateResult<()> {
        let run: Vec<&Migration> = migrations
            .iter()
            .take_while(|m| m.version <= version)
            .collect();
        self.announce(options, migrations, 0, run.len());

        let mut final_version = 0;
        for m in run {
            let transition = Transition::up(migrations, final_version, m);
            self.run_step(db, m, Direction::Up, false, &transition, options)?;
            final_version = m.version;
        }

        self.print(
            options,
            &format!("tidemark: up to current file version: {final_version}"),
        );
        Ok(())
    }
}

/// Collected migrations absent from the ledger but older than its newest
/// applied version, ascending
fn find_missing_migrations<'m>(
    known: &BTreeSet<i64>,
    migrations: &'m Migrations,
) -> Vec<&'m Migration> {
    let Some(&max) = known.last() else {
        return Vec::new();
    };
    migrations
        .iter()
        .filter(|m| !known.contains(&m.version) && m.version < max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tm_core::MigrationKind;

    fn sequence(versions: &[i64]) -> Migrations {
        Migrations::new(
            versions
                .iter()
                .map(|&v| Migration::new(v, format!("{v}_m.sql"), MigrationKind::Sql))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_find_missing_migrations() {
        let known: BTreeSet<i64> = [10, 20, 30].into_iter().collect();
        let migrations = sequence(&[5, 10, 20, 25, 30, 40]);
        let missing: Vec<i64> = find_missing_migrations(&known, &migrations)
            .iter()
            .map(|m| m.version)
            .collect();
        assert_eq!(missing, vec![5, 25]);
    }

    #[test]
    fn test_find_missing_migrations_empty_ledger() {
        let migrations = sequence(&[1, 2]);
        assert!(find_missing_migrations(&BTreeSet::new(), &migrations).is_empty());
    }
}
