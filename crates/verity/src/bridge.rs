//! The assertion bridge.
//!
//! One-shot per invocation: compile the fixture, scan the compiled CSS for
//! markers in document order, fold them into a [`Report`]. The bridge writes
//! nothing, keeps no global state, and never retries; either the whole report
//! exists or a [`RunError`] explains why nothing was registered.

use std::path::Path;

use tracing::debug;
use verity_marker::{CssComparison, Event, FailureDetail, Marker, Scanner};

use crate::compiler::{Compile, GrassCompiler};
use crate::error::{MarkerErrorKind, RunError};
use crate::report::{Case, Failure, Group, Node, Report};

/// Run a fixture file with the default grass compiler.
pub fn run_fixture(path: impl AsRef<Path>) -> Result<Report, RunError> {
    run_fixture_with(&GrassCompiler::new(), path.as_ref())
}

/// Run a fixture file through the given compiler.
pub fn run_fixture_with(compiler: &dyn Compile, path: &Path) -> Result<Report, RunError> {
    if !path.is_file() {
        return Err(RunError::FixtureNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "compiling fixture");
    let css = compiler
        .compile_file(path)
        .map_err(|err| RunError::Compile {
            message: err.message,
        })?;
    report_from_css(&css)
}

/// Run inline SCSS source with the default grass compiler.
pub fn run_source(source: &str) -> Result<Report, RunError> {
    run_source_with(&GrassCompiler::new(), source)
}

/// Run inline SCSS source through the given compiler.
pub fn run_source_with(compiler: &dyn Compile, source: &str) -> Result<Report, RunError> {
    let css = compiler
        .compile_source(source)
        .map_err(|err| RunError::Compile {
            message: err.message,
        })?;
    report_from_css(&css)
}

/// Build a report straight from already-compiled CSS.
pub fn report_from_css(css: &str) -> Result<Report, RunError> {
    let mut scanner = Scanner::new(css);
    let mut builder = TreeBuilder::default();
    while let Some(event) = scanner.next_event()? {
        builder.handle(event)?;
    }
    let report = builder.finish();
    debug!(
        passed = report.passed,
        failed = report.failed,
        "fixture report built"
    );
    Ok(report)
}

/// Folds the flat marker stream into the report tree.
///
/// Module markers carry full ` :: `-joined paths; the builder diffs each new
/// path against the open group stack, popping the divergent tail and pushing
/// the new segments, so sibling modules close cleanly and shared prefixes
/// stay open.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    /// Open groups, outermost first: name plus children built so far.
    path: Vec<(String, Vec<Node>)>,
    case: Option<OpenCase>,
    passed: usize,
    failed: usize,
}

struct OpenCase {
    name: String,
    /// First failure wins; later assertions still count.
    failure: Option<Failure>,
    assertions: usize,
}

impl TreeBuilder {
    fn handle(&mut self, event: Event) -> Result<(), RunError> {
        match event.marker {
            Marker::ModuleStart { name } => {
                self.module(&name);
                Ok(())
            }
            Marker::TestStart { name } => self.test(name, event.line),
            Marker::Pass { .. } => {
                self.open_case(event.line)?.assertions += 1;
                Ok(())
            }
            Marker::Fail(detail) => {
                let case = self.open_case(event.line)?;
                case.assertions += 1;
                if case.failure.is_none() {
                    case.failure = Some(detail.into());
                }
                Ok(())
            }
            Marker::CompareCss(comparison) => {
                let failure = compare_css(&comparison);
                let case = self.open_case(event.line)?;
                case.assertions += 1;
                if case.failure.is_none() {
                    case.failure = failure;
                }
                Ok(())
            }
        }
    }

    fn module(&mut self, name: &str) {
        self.close_case();
        let segments: Vec<&str> = name.split(" :: ").map(str::trim).collect();
        let shared = self
            .path
            .iter()
            .zip(&segments)
            .take_while(|((open, _), segment)| open == *segment)
            .count();
        while self.path.len() > shared {
            self.pop_group();
        }
        for segment in &segments[shared..] {
            self.path.push(((*segment).to_owned(), Vec::new()));
        }
    }

    fn test(&mut self, name: String, line: u32) -> Result<(), RunError> {
        self.close_case();
        if self.path.is_empty() {
            return Err(RunError::MarkerParse {
                line,
                kind: MarkerErrorKind::TestOutsideModule { name },
            });
        }
        self.case = Some(OpenCase {
            name,
            failure: None,
            assertions: 0,
        });
        Ok(())
    }

    fn open_case(&mut self, line: u32) -> Result<&mut OpenCase, RunError> {
        self.case.as_mut().ok_or_else(|| RunError::MarkerParse {
            line,
            kind: MarkerErrorKind::AssertionOutsideTest,
        })
    }

    fn close_case(&mut self) {
        if let Some(open) = self.case.take() {
            let case = match open.failure {
                Some(failure) => {
                    self.failed += 1;
                    Case::failed(open.name, failure, open.assertions)
                }
                None => {
                    self.passed += 1;
                    Case::passed(open.name, open.assertions)
                }
            };
            self.children().push(Node::Case(case));
        }
    }

    fn pop_group(&mut self) {
        if let Some((name, children)) = self.path.pop() {
            self.children().push(Node::Group(Group { name, children }));
        }
    }

    fn children(&mut self) -> &mut Vec<Node> {
        match self.path.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn finish(mut self) -> Report {
        self.close_case();
        while !self.path.is_empty() {
            self.pop_group();
        }
        Report {
            nodes: self.root,
            passed: self.passed,
            failed: self.failed,
        }
    }
}

impl From<FailureDetail> for Failure {
    fn from(detail: FailureDetail) -> Self {
        Failure {
            assertion: detail.assertion,
            description: detail.description,
            output: detail.output,
            expected: detail.expected,
            details: detail.details,
        }
    }
}

/// Judge an `ASSERT` comparison block: equal normalized sections pass.
fn compare_css(comparison: &CssComparison) -> Option<Failure> {
    let output = normalize_css(&comparison.output);
    let expected = normalize_css(&comparison.expected);
    if output == expected {
        return None;
    }
    let description = if comparison.description.is_empty() {
        "output matches expected".to_owned()
    } else {
        comparison.description.clone()
    };
    Some(Failure {
        assertion: "assert-equal".to_owned(),
        description,
        output: Some(output),
        expected: Some(expected),
        details: None,
    })
}

/// Whitespace-normalize a CSS section for comparison: trim every line and
/// drop blank ones. Formatting differences between the compiled and the
/// hand-written expected CSS are not failures.
fn normalize_css(css: &str) -> String {
    css.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests;
