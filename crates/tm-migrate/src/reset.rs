//! Reset: revert every applied migration

use crate::error::MigrateResult;
use crate::ledger::applied_versions;
use crate::options::Options;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use crate::step::Transition;
use tm_core::{Direction, Migration};
use tm_db::Database;

impl Provider {
    /// Revert every applied migration, highest version first.
    ///
    /// Without versioning this reverts every collected migration.
    pub fn reset(&self, db: &dyn Database, options: Options) -> MigrateResult<()> {
        if options.no_versioning {
            return self.down_to(db, MIN_VERSION, options);
        }

        let migrations = self.collect(MIN_VERSION, MAX_VERSION)?;
        let ledger = self.ledger();
        ledger.ensure_ledger_table(db)?;
        let applied = applied_versions(&ledger.query_all_ledger_rows(db)?);

        let run: Vec<&Migration> = migrations
            .iter()
            .rev()
            .filter(|m| applied.contains(&m.version))
            .collect();

        if let Some(first) = run.first() {
            self.announce(&options, &migrations, first.version, run.len());
        }
        for m in run {
            let transition = Transition::down(&migrations, m);
            self.run_step(db, m, Direction::Down, true, &transition, &options)?;
        }
        Ok(())
    }
}
