//! Scan error types.
//!
//! Errors carry WHERE (the 1-based line in the compiled output) and WHAT
//! (a structured kind). Rendering into a user-facing diagnostic is left to
//! the caller; `Display` gives a plain one-line message.

use std::fmt;

/// A marker scan error with its position in the compiled output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanError {
    /// 1-based line in the compiled CSS where the offending marker starts.
    pub line: u32,
    /// What went wrong.
    pub kind: ScanErrorKind,
}

impl ScanError {
    pub(crate) fn new(line: u32, kind: ScanErrorKind) -> Self {
        ScanError { line, kind }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for ScanError {}

/// What kind of scan error occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScanErrorKind {
    /// A `✖ FAILED:` marker without a `[assertion-type]` prefix.
    MalformedFailure { body: String },
    /// A `- Output:`/`- Expected:`/`- Details:` line with no failing
    /// assertion to attach to.
    DetailOutsideFailure { detail: String },
    /// An `OUTPUT`/`EXPECTED`/`END_*` delimiter outside an `ASSERT` block.
    StrayDelimiter { delimiter: String },
    /// Inside an `ASSERT` block, a comment that is not the expected
    /// delimiter.
    UnexpectedInAssert { expected: &'static str, found: String },
    /// End of input inside an `ASSERT` block.
    UnterminatedAssert { description: String },
    /// A `/*` with no closing `*/`.
    UnterminatedComment,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanErrorKind::MalformedFailure { body } => {
                write!(f, "failed assertion without a [type] prefix: `{body}`")
            }
            ScanErrorKind::DetailOutsideFailure { detail } => {
                write!(f, "`{detail}` line outside a failed assertion")
            }
            ScanErrorKind::StrayDelimiter { delimiter } => {
                write!(f, "`{delimiter}` outside an ASSERT block")
            }
            ScanErrorKind::UnexpectedInAssert { expected, found } => {
                write!(f, "expected `{expected}` in ASSERT block, found `{found}`")
            }
            ScanErrorKind::UnterminatedAssert { description } => {
                write!(f, "unterminated ASSERT block `{description}`")
            }
            ScanErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
        }
    }
}
