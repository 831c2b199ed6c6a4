//! tm-sql - SQL migration parsing for Tidemark
//!
//! This crate splits annotated migration scripts into direction-scoped
//! statement lists and cleans statements for verbose echo.

pub mod clean;
pub mod error;
pub mod parser;

pub use clean::clear_statement;
pub use error::{SqlError, SqlResult};
pub use parser::{parse_sql_migration, ParsedMigration, ANNOTATION_PREFIX};
