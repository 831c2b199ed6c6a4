//! Tidemark CLI - versioned database schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::migrate::{self, Operation};
use commands::{status, verify, version};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::ExitCode::from(u8::try_from(code.0).unwrap_or(1)),
            None => {
                eprintln!("Error: {err:#}");
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let global = &cli.global;
    match &cli.command {
        Commands::Up(args) => migrate::execute(Operation::Up, args, global),
        Commands::UpByOne(args) => migrate::execute(Operation::UpByOne, args, global),
        Commands::UpTo(args) => {
            migrate::execute(Operation::UpTo(args.version), &args.migrate, global)
        }
        Commands::Down(args) => migrate::execute(Operation::Down, args, global),
        Commands::DownTo(args) => {
            migrate::execute(Operation::DownTo(args.version), &args.migrate, global)
        }
        Commands::Reset(args) => migrate::execute(Operation::Reset, args, global),
        Commands::Status(args) => status::execute(args, global),
        Commands::Version(args) => version::execute(args, global),
        Commands::Verify(args) => verify::execute(args, global),
    }
}
