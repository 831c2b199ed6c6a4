//! Migration directory scanning

use crate::error::{CoreError, CoreResult};
use crate::migration::{Migration, MigrationKind};
use crate::migrations::Migrations;
use crate::registry::Registry;
use crate::version::numeric_component;
use std::collections::HashSet;
use std::path::Path;

/// Collect every migration in `dir` and `registry` with `min <= version <= max`.
///
/// Only the top level of `dir` is scanned. Dotfiles and subdirectories are
/// skipped; any other file must be a well-formed migration name. A `.rs`
/// file picks up the registry entry for its version, or is collected as an
/// unregistered code migration. Registry entries without a file are
/// collected under their registered source name.
pub fn collect_migrations(
    dir: &Path,
    registry: &Registry,
    min: i64,
    max: i64,
) -> CoreResult<Migrations> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut items = Vec::new();
    let mut code_files = HashSet::new();

    for path in sorted_entries(dir)? {
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(CoreError::InvalidFilename {
                name: path.display().to_string(),
                reason: "file name is not valid UTF-8".to_string(),
            });
        };
        if name.starts_with('.') {
            continue;
        }

        let version = numeric_component(name)?;
        let Some(kind) = MigrationKind::from_file_name(name) else {
            continue;
        };
        if kind == MigrationKind::Code {
            code_files.insert(version);
        }
        if version < min || version > max {
            continue;
        }

        let migration = match kind {
            MigrationKind::Code => {
                let code = registry.get(version).cloned();
                if code.is_none() {
                    log::warn!("Code migration {} has no registered functions", name);
                }
                Migration::from_code(version, path.clone(), code)
            }
            _ => Migration::new(version, path.clone(), kind),
        };
        items.push(migration);
    }

    for (version, code) in registry.iter() {
        if code_files.contains(&version) || version < min || version > max {
            continue;
        }
        items.push(Migration::from_code(
            version,
            code.source.as_str(),
            Some(code.clone()),
        ));
    }

    let migrations = Migrations::new(items)?;
    log::debug!(
        "Collected {} migrations from {} in [{}, {}]",
        migrations.len(),
        dir.display(),
        min,
        max
    );
    Ok(migrations)
}

fn sorted_entries(dir: &Path) -> CoreResult<Vec<std::path::PathBuf>> {
    let io_err = |e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
