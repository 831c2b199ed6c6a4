//! Migration file name parsing
//!
//! Migration files are named `<version>_<description>.<ext>` where the
//! version is a positive integer and the extension is one of `.sql`,
//! `.tpl.sql`, or `.rs`.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDateTime;
use std::path::Path;

/// Plain SQL migration extension
pub const SQL_EXTENSION: &str = ".sql";

/// Templated SQL migration extension
pub const TEMPLATE_SQL_EXTENSION: &str = ".tpl.sql";

/// Code migration marker extension
pub const CODE_EXTENSION: &str = ".rs";

/// Layout of timestamp-derived versions (`YYYYMMDDhhmmss`)
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Return the migration extension of a path, including a double extension.
///
/// `foo.tpl.sql` yields `.tpl.sql`, `foo.sql` yields `.sql`, and a name
/// without a dot yields `""`.
pub fn extension(path: &str) -> &str {
    let base = base_name(path);
    let Some(last) = base.rfind('.') else {
        return "";
    };
    match base[..last].rfind('.') {
        Some(prev) => &base[prev..],
        None => &base[last..],
    }
}

/// Return the final component of a path as a string slice
pub fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Whether a file name ends with a known migration extension.
///
/// Descriptions may contain dots (`00003_add.users.sql`), so the check is on
/// the suffix rather than on [`extension`].
pub fn has_known_extension(name: &str) -> bool {
    name.ends_with(SQL_EXTENSION) || name.ends_with(CODE_EXTENSION)
}

/// Parse the version prefix of a migration file name.
///
/// Any name that does not match `<digits>_<description>.<ext>` with a known
/// extension is an error, never silently skipped.
pub fn numeric_component(name: &str) -> CoreResult<i64> {
    let base = base_name(name);

    if !has_known_extension(base) {
        return Err(CoreError::UnknownExtension {
            name: base.to_string(),
            extension: extension(base).to_string(),
        });
    }

    let Some(idx) = base.find('_') else {
        return Err(CoreError::InvalidFilename {
            name: base.to_string(),
            reason: "no filename separator '_' found".to_string(),
        });
    };

    let digits = &base[..idx];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidVersion {
            name: base.to_string(),
            reason: format!("'{digits}' is not a number"),
        });
    }

    let version: i64 = digits.parse().map_err(|e| CoreError::InvalidVersion {
        name: base.to_string(),
        reason: format!("{e}"),
    })?;
    if version <= 0 {
        return Err(CoreError::InvalidVersion {
            name: base.to_string(),
            reason: "migration versions must be greater than zero".to_string(),
        });
    }
    Ok(version)
}

/// Whether a version looks derived from a `YYYYMMDDhhmmss` timestamp
/// rather than a small sequential counter.
pub fn is_timestamp(version: i64) -> bool {
    NaiveDateTime::parse_from_str(&version.to_string(), TIMESTAMP_FORMAT).is_ok()
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
