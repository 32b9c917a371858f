//! Verity — a stylesheet assertion bridge.
//!
//! Test assertions live inline in an SCSS fixture as test mixins; compiling
//! the fixture turns them into structured report comments. Verity compiles
//! the fixture with [grass](https://crates.io/crates/grass), scans the
//! compiled CSS for those markers, and builds a hierarchical pass/fail
//! [`Report`] — which [`register`] can replay against any test framework
//! that offers `describe`/`it` style registration.
//!
//! ```no_run
//! use verity::{run_sass, Harness};
//!
//! let mut harness = Harness::new();
//! run_sass("tests/fixtures/buttons.scss", &mut harness)?;
//! assert_eq!(harness.failed(), 0);
//! # Ok::<(), verity::RunError>(())
//! ```
//!
//! The run is one-shot and side-effect free: compile, scan, report. A
//! missing fixture, a compiler rejection, or a malformed marker aborts the
//! whole run with a [`RunError`] before anything registers; a failing
//! assertion only fails its own case.
//!
//! The marker grammar is owned by the [`verity_marker`] crate and pinned
//! there; see its docs for the exact comment forms.

mod bridge;
mod compiler;
mod error;
mod register;
mod report;

pub use bridge::{report_from_css, run_fixture, run_fixture_with, run_source, run_source_with};
pub use compiler::{Compile, CompileError, GrassCompiler};
pub use error::{MarkerErrorKind, RunError};
pub use register::{register, run_sass, Body, Check, Harness, Recorded, Registrar};
pub use report::{Case, CaseOutcome, Failure, Group, Node, Report};

pub use verity_marker as marker;
