//! Assertion-marker grammar for compiled stylesheet test output.
//!
//! Stylesheet test mixins report their results as structured CSS comments in
//! the compiled output. This crate owns that grammar — the versioned external
//! contract between the stylesheet side and the bridge — and a scanner that
//! turns compiled CSS into a stream of [`Event`]s in document order.
//!
//! # The pinned grammar
//!
//! The grammar is pinned to the report-comment format emitted by the True
//! stylesheet test library, 6.x line. A top-level comment whose trimmed body
//! matches one of these forms is a marker; any other comment is inert:
//!
//! ```text
//! /* # Module: buttons */          module header (nesting joined by " :: ")
//! /* ---------------- */           divider, decoration only
//! /* Test: renders correctly */    test case header
//! /* ✔ description */              passing assertion
//! /* ✖ FAILED: [assert-equal] description */
//! /*   - Output: 8px */            failure payload lines
//! /*   - Expected: 10px */
//! /*   - Details: ... */
//! /* ASSERT: description */        CSS-output comparison block:
//! /* OUTPUT */ ... /* END_OUTPUT */
//! /* EXPECTED */ ... /* END_EXPECTED */
//! /* END_ASSERT */
//! /* # SUMMARY ---------- */       terminal summary, scanning stops here
//! ```
//!
//! Structural violations — a stray payload line, a block delimiter outside an
//! `ASSERT` block, a failure without a bracketed assertion type — are hard
//! [`ScanError`]s carrying the 1-based line in the compiled output. The
//! scanner never guesses: a marker either parses or the scan fails.

mod chunk;
mod error;
mod marker;
mod scanner;

pub use error::{ScanError, ScanErrorKind};
pub use marker::{CssComparison, Event, FailureDetail, Marker};
pub use scanner::{scan, Scanner};
