//! Jinja environment setup for Tidemark

use crate::context::MigrationContext;
use crate::error::{JinjaError, JinjaResult};
use minijinja::{Environment, UndefinedBehavior};
use std::path::Path;

/// Jinja templating environment for migration scripts
pub struct JinjaEnvironment<'a> {
    env: Environment<'a>,
}

impl<'a> JinjaEnvironment<'a> {
    /// Create a new environment.
    ///
    /// Undefined names are render errors and trailing newlines are kept.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Render a template string
    pub fn render(&self, template: &str, context: &MigrationContext) -> JinjaResult<String> {
        self.env
            .render_str(template, context)
            .map_err(JinjaError::from)
    }

    /// Read and render a migration file; `Filename` is the file's base name
    pub fn render_file(&self, path: &Path, package_name: &str) -> JinjaResult<String> {
        let template = std::fs::read_to_string(path).map_err(|e| JinjaError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!("Rendering template migration {}", path.display());
        self.render(&template, &MigrationContext::new(filename, package_name))
    }
}

impl Default for JinjaEnvironment<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
