//! Error types for tm-core

use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Migration directory not found
    #[error("[C003] Migration directory does not exist: {path}")]
    MigrationDirNotFound { path: String },

    /// C004: Migration file name does not follow `<version>_<description>.<ext>`
    #[error("[C004] Invalid migration file name '{name}': {reason}")]
    InvalidFilename { name: String, reason: String },

    /// C005: Version prefix is not a positive integer
    #[error("[C005] Invalid migration version in '{name}': {reason}")]
    InvalidVersion { name: String, reason: String },

    /// C006: Two migrations share a version number
    #[error("[C006] Duplicate migration version {version}: {first} and {second}")]
    DuplicateVersion {
        version: i64,
        first: String,
        second: String,
    },

    /// C007: File extension is not a recognized migration type
    #[error("[C007] Unknown migration extension '{extension}' for {name}")]
    UnknownExtension { name: String, extension: String },

    /// C008: Code migration registered twice
    #[error("[C008] Code migration version {version} registered twice: {first} and {second}")]
    DuplicateRegistration {
        version: i64,
        first: String,
        second: String,
    },

    /// C009: No migration after the given version
    #[error("[C009] No next version after {current}")]
    NoNextVersion { current: i64 },

    /// C010: No migration before the given version
    #[error("[C010] No previous version before {current}")]
    NoPreviousVersion { current: i64 },

    /// C011: No migration with exactly the given version
    #[error("[C011] No migration found for version {version}")]
    NoCurrentVersion { version: i64 },

    /// C012: IO error
    #[error("[C012] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C013: IO error with file path context
    #[error("[C013] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C014: Config YAML parse error
    #[error("[C014] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
