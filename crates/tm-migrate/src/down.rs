//! Backward migration: Down, DownTo

use crate::error::MigrateResult;
use crate::ledger::applied_versions;
use crate::options::Options;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use crate::step::Transition;
use tm_core::{Direction, Migration, Migrations};
use tm_db::Database;

impl Provider {
    /// Revert the migration at the current version.
    ///
    /// Fails when no migration matches the current version or none comes
    /// before it.
    pub fn down(&self, db: &dyn Database, options: Options) -> MigrateResult<()> {
        let migrations = self.collect(MIN_VERSION, MAX_VERSION)?;

        if options.no_versioning {
            let Some(last) = migrations.last() else {
                return Ok(());
            };
            let target = last.version - 1;
            return self.down_to_no_versioning(db, &migrations, target, &options);
        }

        let current_version = self.db_version(db)?;
        let current = migrations.current(current_version)?;
        let previous = migrations.previous(current_version)?;

        self.announce(&options, &migrations, current.version, 1);
        let transition = Transition::down(&migrations, current);
        log::debug!(
            "Reverting {} back to version {}",
            current.version,
            previous.version
        );
        self.run_step(db, current, Direction::Down, true, &transition, &options)
    }

    /// Revert migrations until the current version is at or below `version`
    pub fn down_to(&self, db: &dyn Database, version: i64, options: Options) -> MigrateResult<()> {
        let migrations = self.collect(MIN_VERSION, MAX_VERSION)?;

        if options.no_versioning {
            return self.down_to_no_versioning(db, &migrations, version, &options);
        }

        let ledger = self.ledger();
        ledger.ensure_ledger_table(db)?;
        let rows = ledger.query_all_ledger_rows(db)?;
        let applied = applied_versions(&rows);
        // only collected units can be reverted
        let pending = migrations
            .iter()
            .filter(|m| m.version > version && applied.contains(&m.version))
            .count();
        let mut announced = false;

        loop {
            let current_version = self.db_version(db)?;
            if current_version == 0 {
                self.print(
                    &options,
                    &format!("tidemark: no migrations to run. current version: {current_version}"),
                );
                return Ok(());
            }

            let current = match migrations.current(current_version) {
                Ok(current) => current,
                Err(e) => {
                    self.print(
                        &options,
                        &format!(
                            "tidemark: migration file not found for current version ({current_version}), error: {e}"
                        ),
                    );
                    return Err(e.into());
                }
            };

            if current.version <= version {
                self.print(
                    &options,
                    &format!("tidemark: no migrations to run. current version: {current_version}"),
                );
                return Ok(());
            }

            if !announced {
                self.announce(&options, &migrations, current.version, pending);
                announced = true;
            }
            let transition = Transition::down(&migrations, current);
            self.run_step(db, current, Direction::Down, true, &transition, &options)?;
        }
    }

    /// Revert every migration above `version`, newest first, without the
    /// ledger
    fn down_to_no_versioning(
        &self,
        db: &dyn Database,
        migrations: &Migrations,
        version: i64,
        options: &Options,
    ) -> MigrateResult<()> {
        let Some(last) = migrations.last() else {
            return Ok(());
        };

        let run: Vec<&Migration> = migrations
            .iter()
            .rev()
            .take_while(|m| m.version > version)
            .collect();
        let final_version = migrations
            .iter()
            .rev()
            .find(|m| m.version <= version)
            .map_or(0, |m| m.version);

        self.announce(options, migrations, last.version, run.len());
        for m in run {
            let transition = Transition::down(migrations, m);
            self.run_step(db, m, Direction::Down, false, &transition, options)?;
        }

        self.print(
            options,
            &format!("tidemark: down to current file version: {final_version}"),
        );
        Ok(())
    }
}
