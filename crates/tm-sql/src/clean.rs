//! Statement cleaning for verbose echo

use regex::Regex;
use std::sync::OnceLock;

static COMMENT_LINE_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn comment_line_re() -> &'static Regex {
    COMMENT_LINE_RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*--.*(\r?\n|$)").expect("valid regex"))
}

fn blank_line_re() -> &'static Regex {
    BLANK_LINE_RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\r?\n").expect("valid regex"))
}

/// Strip comment-only and blank lines from a statement before it is logged.
///
/// Execution always uses the original text.
pub fn clear_statement(statement: &str) -> String {
    let without_comments = comment_line_re().replace_all(statement, "");
    blank_line_re().replace_all(&without_comments, "").into_owned()
}
