use std::path::Path;

use pretty_assertions::assert_eq;

use super::*;
use crate::compiler::CompileError;
use crate::report::CaseOutcome;

/// Compiler whose output is canned; stands in for grass in unit tests.
struct CannedCompiler {
    result: Result<String, CompileError>,
}

impl CannedCompiler {
    fn css(css: &str) -> Self {
        CannedCompiler {
            result: Ok(css.to_owned()),
        }
    }

    fn failing(message: &str) -> Self {
        CannedCompiler {
            result: Err(CompileError {
                message: message.to_owned(),
            }),
        }
    }
}

impl Compile for CannedCompiler {
    fn compile_file(&self, _path: &Path) -> Result<String, CompileError> {
        self.result.clone()
    }

    fn compile_source(&self, _source: &str) -> Result<String, CompileError> {
        self.result.clone()
    }
}

const BUTTONS_CSS: &str = "\
/* # Module: buttons */
/* ---------------- */
/* Test: renders correctly */
/* ✔ has a border */
/* Test: applies correct padding */
/* ✖ FAILED: [assert-equal] padding matches */
/*   - Output: 8px */
/*   - Expected: 10px */
";

#[test]
fn builds_group_with_cases_in_source_order() {
    let report = report_from_css(BUTTONS_CSS).unwrap();
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 1);

    let [Node::Group(buttons)] = report.nodes.as_slice() else {
        panic!("expected a single top-level group");
    };
    assert_eq!(buttons.name, "buttons");
    assert_eq!(buttons.children.len(), 2);

    let Node::Case(first) = &buttons.children[0] else {
        panic!("expected a case");
    };
    assert_eq!(first.name, "renders correctly");
    assert!(first.outcome.is_pass());

    let Node::Case(second) = &buttons.children[1] else {
        panic!("expected a case");
    };
    assert_eq!(second.name, "applies correct padding");
    let CaseOutcome::Fail(failure) = &second.outcome else {
        panic!("expected a failure");
    };
    let message = failure.message();
    assert!(message.contains("10px"));
    assert!(message.contains("8px"));
}

#[test]
fn failing_case_does_not_affect_siblings() {
    let report = report_from_css(BUTTONS_CSS).unwrap();
    let outcomes: Vec<bool> = report.cases().map(|case| case.outcome.is_pass()).collect();
    assert_eq!(outcomes, vec![true, false]);
}

#[test]
fn joined_module_paths_nest() {
    let css = "\
/* # Module: forms :: inputs */
/* Test: focus ring */
/* ✔ drawn */
/* # Module: forms :: labels */
/* Test: bold */
/* ✔ set */
/* # Module: footer */
/* Test: present */
/* ✔ yes */
";
    let report = report_from_css(css).unwrap();
    assert_eq!(report.passed, 3);

    let [Node::Group(forms), Node::Group(footer)] = report.nodes.as_slice() else {
        panic!("expected two top-level groups");
    };
    assert_eq!(forms.name, "forms");
    assert_eq!(footer.name, "footer");

    let [Node::Group(inputs), Node::Group(labels)] = forms.children.as_slice() else {
        panic!("expected nested groups under forms");
    };
    assert_eq!(inputs.name, "inputs");
    assert_eq!(labels.name, "labels");
}

#[test]
fn first_failure_wins_but_assertions_keep_counting() {
    let css = "\
/* # Module: m */
/* Test: t */
/* ✖ FAILED: [assert-true] first */
/* ✖ FAILED: [assert-true] second */
/* ✔ third */
";
    let report = report_from_css(css).unwrap();
    let case = report.cases().next().unwrap();
    assert_eq!(case.assertions, 3);
    let CaseOutcome::Fail(failure) = &case.outcome else {
        panic!("expected a failure");
    };
    assert_eq!(failure.description, "first");
}

#[test]
fn css_comparison_normalizes_line_by_line() {
    let css = "\
/* # Module: m */
/* Test: t */
/* ASSERT: renders the ruleset */
/* OUTPUT */
.a {
  color: red;
}
/* END_OUTPUT */
/* EXPECTED */
.a { color: red; }
/* END_EXPECTED */
/* END_ASSERT */
";
    // Formatting differs but lines normalize differently here: the expected
    // section is one line while the output is three. Line-based
    // normalization keeps them distinct, so this comparison fails.
    let report = report_from_css(css).unwrap();
    assert_eq!(report.failed, 1);

    let matching = "\
/* # Module: m */
/* Test: t */
/* ASSERT: renders the ruleset */
/* OUTPUT */
  .a {
    color: red;
  }
/* END_OUTPUT */
/* EXPECTED */
.a {
color: red;
}
/* END_EXPECTED */
/* END_ASSERT */
";
    let report = report_from_css(matching).unwrap();
    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 0);
}

#[test]
fn empty_test_passes() {
    let css = "/* # Module: m */\n/* Test: nothing asserted */\n";
    let report = report_from_css(css).unwrap();
    assert_eq!(report.passed, 1);
    let case = report.cases().next().unwrap();
    assert_eq!(case.assertions, 0);
}

#[test]
fn test_outside_module_is_a_marker_error() {
    let err = report_from_css("/* Test: stray */\n").unwrap_err();
    assert_eq!(
        err,
        RunError::MarkerParse {
            line: 1,
            kind: MarkerErrorKind::TestOutsideModule {
                name: "stray".into()
            },
        }
    );
}

#[test]
fn assertion_outside_test_is_a_marker_error() {
    let err = report_from_css("/* # Module: m */\n/* ✔ floating */\n").unwrap_err();
    assert_eq!(
        err,
        RunError::MarkerParse {
            line: 2,
            kind: MarkerErrorKind::AssertionOutsideTest,
        }
    );
}

#[test]
fn missing_fixture_fails_before_compiling() {
    let compiler = CannedCompiler::css("/* # Module: never reached */");
    let path = Path::new("does/not/exist.scss");
    let err = run_fixture_with(&compiler, path).unwrap_err();
    assert_eq!(
        err,
        RunError::FixtureNotFound {
            path: path.to_path_buf()
        }
    );
}

#[test]
fn compiler_diagnostic_is_forwarded_verbatim() {
    let compiler = CannedCompiler::failing("Error: expected \"}\" at 3:1");
    let err = run_source_with(&compiler, ".broken {").unwrap_err();
    assert_eq!(
        err,
        RunError::Compile {
            message: "Error: expected \"}\" at 3:1".into()
        }
    );
    assert_eq!(err.to_string(), "Error: expected \"}\" at 3:1");
}

#[test]
fn same_css_yields_identical_reports() {
    assert_eq!(
        report_from_css(BUTTONS_CSS).unwrap(),
        report_from_css(BUTTONS_CSS).unwrap()
    );
}
