//! Template context for migration rendering.

use serde::Serialize;

/// Values exposed to `.tpl.sql` migrations as `{{ Filename }}` and
/// `{{ PackageName }}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationContext {
    /// Base file name of the migration being rendered
    #[serde(rename = "Filename")]
    pub filename: String,
    /// Package name configured on the provider
    #[serde(rename = "PackageName")]
    pub package_name: String,
}

impl MigrationContext {
    /// Create a context for one migration file
    pub fn new(filename: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            package_name: package_name.into(),
        }
    }
}
