//! Error types for tm-sql

use thiserror::Error;

/// SQL migration script parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// No direction annotation anywhere in the script (S001)
    #[error("[S001] No '-- +tidemark Up' or '-- +tidemark Down' annotation found")]
    NoDirection,

    /// Annotation that is not a recognized directive (S002)
    #[error("[S002] Unknown directive '{directive}' at line {line}")]
    UnknownDirective { directive: String, line: usize },

    /// StatementBegin while another StatementBegin is open (S003)
    #[error("[S003] StatementBegin at line {line} nested inside StatementBegin at line {open}")]
    NestedStatementBegin { line: usize, open: usize },

    /// StatementBegin before any Up/Down section (S004)
    #[error("[S004] StatementBegin at line {line} is outside an Up or Down section")]
    StatementBeginOutsideSection { line: usize },

    /// StatementEnd with no open StatementBegin (S005)
    #[error("[S005] StatementEnd at line {line} has no matching StatementBegin")]
    UnexpectedStatementEnd { line: usize },

    /// StatementBegin never closed (S006)
    #[error("[S006] StatementBegin at line {line} is never closed by StatementEnd")]
    UnterminatedStatementBegin { line: usize },

    /// Statement text without a terminating semicolon (S007)
    #[error("[S007] Statement starting at line {line} is not terminated by ';'")]
    UnterminatedStatement { line: usize },

    /// SQL text before the first Up/Down section (S008)
    #[error("[S008] Statement at line {line} appears before any Up or Down section")]
    StatementOutsideSection { line: usize },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
