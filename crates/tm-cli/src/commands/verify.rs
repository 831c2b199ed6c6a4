//! Verify command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, OutputFormat, VerifyArgs};
use crate::commands::common::{ExitCode, Session};

/// Execute the verify command.
///
/// Exits 1 when any issue is found, or when timestamped versions are
/// present with `--sequential-only`.
pub(crate) fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let report = session.provider.verify();
    let sequential_only = args.sequential_only || session.config.sequential_only;

    if args.output == OutputFormat::Json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        for issue in &report.issues {
            println!("  ✗ {issue}");
        }
        for version in &report.timestamped {
            println!("  ! version {version} looks like a timestamp");
        }
        println!();
        println!(
            "Verified {} migration{}: {} issue{}",
            report.total,
            if report.total == 1 { "" } else { "s" },
            report.issues.len(),
            if report.issues.len() == 1 { "" } else { "s" },
        );
    }

    if !report.is_ok() || (sequential_only && report.has_timestamped()) {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
