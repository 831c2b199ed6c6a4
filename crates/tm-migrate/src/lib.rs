//! tm-migrate - Migration engine for Tidemark
//!
//! A [`Provider`] collects migrations from a directory, compares them with
//! the version ledger stored in the target database, and moves the schema
//! forward or backward. Operations take an explicit [`Options`] value and
//! optionally report progress as [`Event`]s on a channel.
//!
//! ```no_run
//! use tm_db::DuckDbBackend;
//! use tm_migrate::{Options, Provider};
//!
//! let db = DuckDbBackend::in_memory()?;
//! let provider = Provider::new("migrations");
//! provider.up(&db, Options::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod down;
pub mod error;
pub mod event;
mod ledger;
pub mod logger;
pub mod observe;
pub mod options;
pub mod provider;
pub mod reset;
mod runner;
pub mod status;
mod step;
pub mod up;
pub mod verify;
pub mod version;

pub use error::{MigrateError, MigrateResult, MissingMigration, MissingMigrations};
pub use event::{
    are_events_equal, Event, StatusEvent, VersionApplyEvent, VersionCountEvent, NO_VERSIONING,
    PENDING,
};
pub use logger::{LogLogger, Logger, MemoryLogger, LOG_TARGET};
pub use observe::observe;
pub use options::Options;
pub use provider::{Provider, DEFAULT_PACKAGE_NAME, DEFAULT_TABLE_NAME, MAX_VERSION, MIN_VERSION};
pub use verify::{VerifyIssue, VerifyIssueKind, VerifyReport};
pub use version::UNKNOWN_VERSION;
