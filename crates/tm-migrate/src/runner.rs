//! Execution of a single migration
//!
//! SQL migrations run inside one transaction unless the script opts out with
//! `-- +tidemark NO TRANSACTION`; the ledger write joins that transaction.
//! Code migrations always run inside one transaction.

use crate::error::{MigrateError, MigrateResult};
use crate::options::Options;
use crate::provider::Provider;
use tm_core::{CoreError, Direction, Migration, MigrationKind};
use tm_db::{Database, DbError, Executor, Transaction};
use tm_jinja::JinjaEnvironment;
use tm_sql::{clear_statement, parse_sql_migration, ParsedMigration};

impl Provider {
    /// Apply or revert one migration.
    ///
    /// `versioned == false` skips the ledger write.
    pub(crate) fn run_migration(
        &self,
        db: &dyn Database,
        migration: &Migration,
        direction: Direction,
        versioned: bool,
        options: &Options,
    ) -> MigrateResult<()> {
        let script = migration.script();
        log::debug!(
            "Running {} {} (versioned: {})",
            direction,
            migration,
            versioned
        );

        let executed = match migration.kind {
            MigrationKind::Sql | MigrationKind::TemplateSql => {
                let parsed = self.load_sql(migration, direction)?;
                let executed = !parsed.statements.is_empty();
                self.run_sql(db, migration, &parsed, direction, versioned, options)?;
                executed
            }
            MigrationKind::Code => self.run_code(db, migration, direction, versioned)?,
        };

        if executed {
            self.print(options, &format!("OK    {script}"));
        } else {
            self.print(options, &format!("EMPTY {script}"));
        }
        Ok(())
    }

    /// Read, render if templated, and parse a SQL migration
    pub(crate) fn load_sql(
        &self,
        migration: &Migration,
        direction: Direction,
    ) -> MigrateResult<ParsedMigration> {
        let text = self.read_script(migration)?;
        parse_sql_migration(&text, direction).map_err(|source| MigrateError::Parse {
            script: migration.script(),
            direction,
            source,
        })
    }

    pub(crate) fn read_script(&self, migration: &Migration) -> MigrateResult<String> {
        let path = migration.path();
        if migration.kind == MigrationKind::TemplateSql {
            return JinjaEnvironment::new()
                .render_file(path, self.package_name())
                .map_err(|source| MigrateError::Template {
                    script: migration.script(),
                    source,
                });
        }
        std::fs::read_to_string(path).map_err(|e| {
            MigrateError::Core(CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })
        })
    }

    fn run_sql(
        &self,
        db: &dyn Database,
        migration: &Migration,
        parsed: &ParsedMigration,
        direction: Direction,
        versioned: bool,
        options: &Options,
    ) -> MigrateResult<()> {
        let script = migration.script();

        if !parsed.use_tx {
            for statement in &parsed.statements {
                self.verbose_info(
                    options,
                    &format!("Executing statement: {}", clear_statement(statement)),
                );
                db.execute_batch(statement)
                    .map_err(|source| statement_error(&script, statement, source))?;
            }
            if versioned {
                self.write_ledger(db, migration, direction)?;
            }
            return Ok(());
        }

        self.verbose_info(options, "Begin transaction");
        let tx = db.begin().map_err(|source| MigrateError::Transaction {
            script: script.clone(),
            source,
        })?;

        for statement in &parsed.statements {
            self.verbose_info(
                options,
                &format!("Executing statement: {}", clear_statement(statement)),
            );
            if let Err(source) = tx.execute_batch(statement) {
                self.verbose_info(options, "Rollback transaction");
                rollback(tx, &script);
                return Err(statement_error(&script, statement, source));
            }
        }

        if versioned {
            if let Err(err) = self.write_ledger(&*tx, migration, direction) {
                self.verbose_info(options, "Rollback transaction");
                rollback(tx, &script);
                return Err(err);
            }
        }

        self.verbose_info(options, "Commit transaction");
        tx.commit()
            .map_err(|source| MigrateError::Transaction { script, source })
    }

    /// Returns whether a function ran
    fn run_code(
        &self,
        db: &dyn Database,
        migration: &Migration,
        direction: Direction,
        versioned: bool,
    ) -> MigrateResult<bool> {
        let script = migration.script();
        let Some(code) = &migration.code else {
            return Err(MigrateError::Unregistered { script });
        };
        let func = match direction {
            Direction::Up => code.up.as_ref(),
            Direction::Down => code.down.as_ref(),
        };

        let tx = db.begin().map_err(|source| MigrateError::Transaction {
            script: script.clone(),
            source,
        })?;

        if let Some(func) = func {
            if let Err(source) = func(&*tx) {
                rollback(tx, &script);
                return Err(MigrateError::Function {
                    script,
                    direction,
                    source,
                });
            }
        }

        if versioned {
            if let Err(err) = self.write_ledger(&*tx, migration, direction) {
                rollback(tx, &script);
                return Err(err);
            }
        }

        tx.commit()
            .map_err(|source| MigrateError::Transaction { script, source })?;
        Ok(func.is_some())
    }

    fn write_ledger<E: Executor + ?Sized>(
        &self,
        exec: &E,
        migration: &Migration,
        direction: Direction,
    ) -> MigrateResult<()> {
        let ledger = self.ledger();
        let result = match direction {
            Direction::Up => ledger.insert_applied_row(exec, migration.version),
            Direction::Down => ledger.delete_applied_row(exec, migration.version),
        };
        result.map_err(|source| MigrateError::Ledger {
            script: migration.script(),
            version: migration.version,
            source,
        })
    }
}

fn statement_error(script: &str, statement: &str, source: DbError) -> MigrateError {
    MigrateError::Statement {
        script: script.to_string(),
        statement: clear_statement(statement),
        source,
    }
}

fn rollback(tx: Box<dyn Transaction + '_>, script: &str) {
    if let Err(e) = tx.rollback() {
        log::warn!("{}: rollback failed: {}", script, e);
    }
}
