//! Status command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs, OutputFormat, StatusArgs};
use crate::commands::common::Session;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let db = session.open_database()?;
    let json = args.output == OutputFormat::Json;
    let options = session
        .options(&MigrateArgs {
            no_versioning: args.no_versioning,
            ..MigrateArgs::default()
        })
        .no_output(json);

    let statuses = session.provider.status(db.as_ref(), options)?;

    if json {
        let out =
            serde_json::to_string_pretty(&statuses).context("Failed to serialize status")?;
        println!("{out}");
    }
    Ok(())
}
