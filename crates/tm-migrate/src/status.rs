//! Status listing

use crate::error::MigrateResult;
use crate::event::StatusEvent;
use crate::ledger::latest_states;
use crate::options::Options;
use crate::provider::{Provider, MAX_VERSION, MIN_VERSION};
use tm_db::Database;

impl Provider {
    /// Report whether and when each migration was applied.
    ///
    /// Creates the ledger table on a pristine database. Without versioning
    /// the ledger is not read and every migration is reported unversioned.
    /// Rows are printed unless `no_output` is set and sent to the event sink.
    pub fn status(&self, db: &dyn Database, options: Options) -> MigrateResult<Vec<StatusEvent>> {
        let statuses = self.status_events(db, &options)?;

        self.print(&options, "    Applied At                  Migration");
        self.print(&options, "    =======================================");
        for status in &statuses {
            options.send(status.clone());
            self.print(
                &options,
                &format!("    {:<24} -- {}", status.applied_string(), status.script()),
            );
        }
        Ok(statuses)
    }

    fn status_events(&self, db: &dyn Database, options: &Options) -> MigrateResult<Vec<StatusEvent>> {
        let migrations = self.collect(MIN_VERSION, MAX_VERSION)?;

        if options.no_versioning {
            return Ok(migrations
                .iter()
                .map(|m| StatusEvent {
                    source: m.source.display().to_string(),
                    version: m.version,
                    versioned: false,
                    applied_at: None,
                })
                .collect());
        }

        let ledger = self.ledger();
        ledger.ensure_ledger_table(db)?;
        let rows = ledger.query_all_ledger_rows(db)?;
        let states = latest_states(&rows);

        Ok(migrations
            .iter()
            .map(|m| {
                let applied_at = states
                    .get(&m.version)
                    .filter(|row| row.is_applied)
                    .and_then(|row| row.tstamp);
                StatusEvent {
                    source: m.source.display().to_string(),
                    version: m.version,
                    versioned: true,
                    applied_at,
                }
            })
            .collect())
    }
}
