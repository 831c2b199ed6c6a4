//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Tidemark - versioned database schema migrations
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output (statement echo and debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the migrations directory
    #[arg(short, long, global = true)]
    pub dir: Option<String>,

    /// Override the version ledger table name
    #[arg(short, long, global = true)]
    pub table: Option<String>,

    /// Override the database path (`:memory:` for an in-memory database)
    #[arg(long, global = true, env = "TIDEMARK_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every pending migration
    Up(MigrateArgs),

    /// Apply the next pending migration
    UpByOne(MigrateArgs),

    /// Apply pending migrations up to a version
    UpTo(TargetArgs),

    /// Revert the current migration
    Down(MigrateArgs),

    /// Revert migrations down to a version
    DownTo(TargetArgs),

    /// Revert every applied migration
    Reset(MigrateArgs),

    /// Show which migrations are applied
    Status(StatusArgs),

    /// Print the latest file version and the current database version
    Version(VersionArgs),

    /// Check migration files without touching the database
    Verify(VerifyArgs),
}

/// Toggles shared by commands that apply or revert migrations
#[derive(Args, Debug, Clone, Default)]
pub struct MigrateArgs {
    /// Apply out-of-order migrations instead of failing
    #[arg(long)]
    pub allow_missing: bool,

    /// Run migrations without reading or writing the version ledger
    #[arg(long)]
    pub no_versioning: bool,

    /// Refuse timestamp-numbered migrations
    #[arg(long)]
    pub sequential_only: bool,

    /// Suppress per-migration output
    #[arg(long)]
    pub no_output: bool,
}

/// Arguments for commands with a target version
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Target version
    pub version: i64,

    #[command(flatten)]
    pub migrate: MigrateArgs,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Report without reading the version ledger
    #[arg(long)]
    pub no_versioning: bool,
}

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Report only the file version
    #[arg(long)]
    pub no_versioning: bool,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Treat timestamp-numbered migrations as errors
    #[arg(long)]
    pub sequential_only: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
