//! tm-jinja - Jinja templating layer for Tidemark
//!
//! Templated migrations (`.tpl.sql`) are rendered with minijinja before
//! they are parsed as plain SQL. The render context exposes `Filename`
//! and `PackageName`.

pub mod context;
pub mod environment;
pub mod error;

pub use context::MigrationContext;
pub use environment::JinjaEnvironment;
pub use error::{JinjaError, JinjaResult};
