//! Ordered migration sequence

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::version::is_timestamp;

/// Migration units sorted ascending by unique version
#[derive(Debug, Clone, Default)]
pub struct Migrations {
    items: Vec<Migration>,
}

impl Migrations {
    /// Sort units by version, rejecting duplicates
    pub fn new(mut items: Vec<Migration>) -> CoreResult<Self> {
        items.sort_by_key(|m| m.version);

        for pair in items.windows(2) {
            if pair[0].version == pair[1].version {
                return Err(CoreError::DuplicateVersion {
                    version: pair[0].version,
                    first: pair[0].source.display().to_string(),
                    second: pair[1].source.display().to_string(),
                });
            }
        }

        Ok(Self { items })
    }

    /// Iterate in ascending version order
    pub fn iter(&self) -> std::slice::Iter<'_, Migration> {
        self.items.iter()
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lowest-versioned unit
    pub fn first(&self) -> Option<&Migration> {
        self.items.first()
    }

    /// Highest-versioned unit
    pub fn last(&self) -> Option<&Migration> {
        self.items.last()
    }

    /// Unit with exactly `version`
    pub fn current(&self, version: i64) -> CoreResult<&Migration> {
        self.items
            .binary_search_by_key(&version, |m| m.version)
            .map(|idx| &self.items[idx])
            .map_err(|_| CoreError::NoCurrentVersion { version })
    }

    /// Smallest version strictly greater than `current`
    pub fn next(&self, current: i64) -> CoreResult<&Migration> {
        let idx = self.items.partition_point(|m| m.version <= current);
        self.items
            .get(idx)
            .ok_or(CoreError::NoNextVersion { current })
    }

    /// Largest version strictly less than `current`
    pub fn previous(&self, current: i64) -> CoreResult<&Migration> {
        let idx = self.items.partition_point(|m| m.version < current);
        idx.checked_sub(1)
            .and_then(|i| self.items.get(i))
            .ok_or(CoreError::NoPreviousVersion { current })
    }

    /// Units with `min <= version <= max`
    pub fn range(&self, min: i64, max: i64) -> Migrations {
        Migrations {
            items: self
                .items
                .iter()
                .filter(|m| m.version >= min && m.version <= max)
                .cloned()
                .collect(),
        }
    }

    /// Units numbered with small sequential integers
    pub fn versioned(&self) -> Migrations {
        self.filtered(|m| !is_timestamp(m.version))
    }

    /// Units numbered with `YYYYMMDDhhmmss` timestamps
    pub fn timestamped(&self) -> Migrations {
        self.filtered(|m| is_timestamp(m.version))
    }

    /// All versions, ascending
    pub fn versions(&self) -> Vec<i64> {
        self.items.iter().map(|m| m.version).collect()
    }

    /// Highest version, if any
    pub fn max_version(&self) -> Option<i64> {
        self.items.last().map(|m| m.version)
    }

    /// Whether a unit with `version` exists
    pub fn contains(&self, version: i64) -> bool {
        self.current(version).is_ok()
    }

    fn filtered(&self, keep: impl Fn(&Migration) -> bool) -> Migrations {
        Migrations {
            items: self.items.iter().filter(|m| keep(m)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Migrations {
    type Item = &'a Migration;
    type IntoIter = std::slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "migrations_test.rs"]
mod tests;
