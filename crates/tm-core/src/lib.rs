//! tm-core - Core library for Tidemark
//!
//! This crate provides the migration model shared by every Tidemark
//! component: file name parsing, the ordered migration sequence, the
//! code-migration registry, directory collection, and tidemark.yml
//! configuration.

pub mod collect;
pub mod config;
pub mod error;
pub mod migration;
pub mod migrations;
pub mod registry;
pub mod version;

pub use collect::collect_migrations;
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{Direction, Migration, MigrationKind};
pub use migrations::Migrations;
pub use registry::{BoxError, CodeMigration, MigrationFn, Registry};
pub use tm_db::DbType;
pub use version::{is_timestamp, numeric_component};
