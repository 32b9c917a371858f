//! Bridge error taxonomy.
//!
//! Three fatal kinds, all raised before any registration happens:
//! a missing fixture, a compiler rejection, and a marker that violates the
//! pinned grammar. Per-case assertion failures are not errors — they live in
//! the report tree as [`crate::report::CaseOutcome::Fail`].

use std::path::PathBuf;

use thiserror::Error;
use verity_marker::{ScanError, ScanErrorKind};

/// A fatal bridge failure. The whole run aborts; no partial report exists.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// The fixture path does not resolve to a readable file.
    #[error("fixture not found: {}", path.display())]
    FixtureNotFound { path: PathBuf },

    /// The Sass compiler rejected the fixture. The compiler's diagnostic is
    /// forwarded verbatim.
    #[error("{message}")]
    Compile { message: String },

    /// The compiled output carries a marker that violates the pinned
    /// grammar. `line` is 1-based in the compiled CSS.
    #[error("invalid assertion marker at line {line} of compiled output: {kind}")]
    MarkerParse { line: u32, kind: MarkerErrorKind },
}

/// Why a marker failed to parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MarkerErrorKind {
    /// The scanner rejected the marker itself.
    #[error("{0}")]
    Scan(ScanErrorKind),

    /// A `Test:` marker appeared before any `# Module:` marker.
    #[error("test `{name}` appears outside any module")]
    TestOutsideModule { name: String },

    /// An assertion marker appeared before any `Test:` marker.
    #[error("assertion appears outside any test")]
    AssertionOutsideTest,
}

impl From<ScanError> for RunError {
    fn from(err: ScanError) -> Self {
        RunError::MarkerParse {
            line: err.line,
            kind: MarkerErrorKind::Scan(err.kind),
        }
    }
}
