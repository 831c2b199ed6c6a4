//! Migration script parser
//!
//! A script is split into direction sections by annotation comments:
//!
//! ```sql
//! -- +tidemark Up
//! CREATE TABLE post (id INT);
//!
//! -- +tidemark StatementBegin
//! CREATE FUNCTION touch() RETURNS trigger AS $$
//! BEGIN NEW.updated_at = now(); RETURN NEW; END;
//! $$ LANGUAGE plpgsql;
//! -- +tidemark StatementEnd
//!
//! -- +tidemark Down
//! -- +tidemark NO TRANSACTION
//! DROP TABLE post;
//! ```
//!
//! Every section is validated; only the statements of the requested
//! direction are returned.

use crate::error::{SqlError, SqlResult};
use tm_core::Direction;

/// Prefix shared by every annotation comment
pub const ANNOTATION_PREFIX: &str = "-- +tidemark";

/// Statements for one direction of a migration script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Executable statements in file order
    pub statements: Vec<String>,

    /// Whether the statements run inside one transaction
    pub use_tx: bool,
}

enum Annotation {
    Section(Direction),
    StatementBegin,
    StatementEnd,
    NoTransaction,
}

impl Annotation {
    fn parse(directive: &str, line: usize) -> SqlResult<Self> {
        let normalized = directive.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_lowercase().as_str() {
            "up" => Ok(Annotation::Section(Direction::Up)),
            "down" => Ok(Annotation::Section(Direction::Down)),
            "statementbegin" => Ok(Annotation::StatementBegin),
            "statementend" => Ok(Annotation::StatementEnd),
            "no transaction" => Ok(Annotation::NoTransaction),
            _ => Err(SqlError::UnknownDirective {
                directive: directive.trim().to_string(),
                line,
            }),
        }
    }
}

/// Statement being accumulated, with the line it started on
#[derive(Default)]
struct Pending {
    text: String,
    start: usize,
}

impl Pending {
    fn push_line(&mut self, line: &str, lineno: usize) {
        if self.text.is_empty() {
            self.start = lineno;
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[derive(Default)]
struct ParseState {
    section: Option<Direction>,
    seen_section: bool,
    block_start: Option<usize>,
    pending: Pending,
    file_no_tx: bool,
    up_no_tx: bool,
    down_no_tx: bool,
    statements: Vec<String>,
}

impl ParseState {
    fn finish_statement(&mut self, direction: Direction) {
        let text = self.pending.take();
        if self.section == Some(direction) && !text.trim().is_empty() {
            self.statements.push(text);
        }
    }

    fn ensure_no_pending(&self) -> SqlResult<()> {
        if let Some(open) = self.block_start {
            return Err(SqlError::UnterminatedStatementBegin { line: open });
        }
        if !self.pending.is_blank() {
            return Err(SqlError::UnterminatedStatement {
                line: self.pending.start,
            });
        }
        Ok(())
    }
}

/// Split `script` into the statements for `direction`.
///
/// A script with no section for `direction` yields zero statements. A
/// script with no section at all is an error.
pub fn parse_sql_migration(script: &str, direction: Direction) -> SqlResult<ParsedMigration> {
    let mut state = ParseState::default();

    for (idx, line) in script.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = line.trim();

        if let Some(directive) = trimmed.strip_prefix(ANNOTATION_PREFIX) {
            match Annotation::parse(directive, lineno)? {
                Annotation::Section(dir) => {
                    state.ensure_no_pending()?;
                    state.section = Some(dir);
                    state.seen_section = true;
                }
                Annotation::StatementBegin => {
                    if let Some(open) = state.block_start {
                        return Err(SqlError::NestedStatementBegin { line: lineno, open });
                    }
                    if state.section.is_none() {
                        return Err(SqlError::StatementBeginOutsideSection { line: lineno });
                    }
                    state.ensure_no_pending()?;
                    state.block_start = Some(lineno);
                }
                Annotation::StatementEnd => {
                    if state.block_start.take().is_none() {
                        return Err(SqlError::UnexpectedStatementEnd { line: lineno });
                    }
                    state.finish_statement(direction);
                }
                Annotation::NoTransaction => match state.section {
                    None => state.file_no_tx = true,
                    Some(Direction::Up) => state.up_no_tx = true,
                    Some(Direction::Down) => state.down_no_tx = true,
                },
            }
            continue;
        }

        if state.block_start.is_some() {
            state.pending.push_line(line, lineno);
            continue;
        }

        let ignorable = trimmed.is_empty() || trimmed.starts_with("--");
        if state.section.is_none() {
            if ignorable {
                continue;
            }
            return Err(SqlError::StatementOutsideSection { line: lineno });
        }

        if state.pending.is_blank() && ignorable {
            continue;
        }

        state.pending.push_line(line, lineno);
        if ends_statement(line) {
            state.finish_statement(direction);
        }
    }

    state.ensure_no_pending()?;
    if !state.seen_section {
        return Err(SqlError::NoDirection);
    }

    let section_no_tx = match direction {
        Direction::Up => state.up_no_tx,
        Direction::Down => state.down_no_tx,
    };

    log::debug!(
        "Parsed {} {} statements",
        state.statements.len(),
        direction
    );

    Ok(ParsedMigration {
        statements: state.statements,
        use_tx: !(state.file_no_tx || section_no_tx),
    })
}

/// Whether the last word before any `--` comment word ends with `;`.
///
/// Only a word that starts with `--` opens a comment, so `--` inside a
/// quoted literal such as `'a--b'` does not hide the terminator.
fn ends_statement(line: &str) -> bool {
    line.split_whitespace()
        .take_while(|word| !word.starts_with("--"))
        .last()
        .is_some_and(|word| word.ends_with(';'))
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
