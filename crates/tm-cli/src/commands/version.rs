//! Version command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, MigrateArgs, VersionArgs};
use crate::commands::common::Session;

/// Execute the version command
pub(crate) fn execute(args: &VersionArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let db = session.open_database()?;
    let options = session.options(&MigrateArgs {
        no_versioning: args.no_versioning,
        ..MigrateArgs::default()
    });

    session.provider.version(db.as_ref(), options)?;
    Ok(())
}
