//! Up/down command implementations

use anyhow::Result;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::Session;

/// Which way to move the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Up,
    UpByOne,
    UpTo(i64),
    Down,
    DownTo(i64),
    Reset,
}

/// Execute one migrate operation against the configured database
pub(crate) fn execute(operation: Operation, args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let db = session.open_database()?;
    let db = db.as_ref();
    let provider = &session.provider;
    let options = session.options(args);

    log::debug!("Running {:?} on {}", operation, db.db_type());
    match operation {
        Operation::Up => provider.up(db, options)?,
        Operation::UpByOne => provider.up_by_one(db, options)?,
        Operation::UpTo(version) => provider.up_to(db, version, options)?,
        Operation::Down => provider.down(db, options)?,
        Operation::DownTo(version) => provider.down_to(db, version, options)?,
        Operation::Reset => provider.reset(db, options)?,
    }
    Ok(())
}
