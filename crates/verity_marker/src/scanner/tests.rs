use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn markers(css: &str) -> Vec<Marker> {
    scan(css)
        .unwrap()
        .into_iter()
        .map(|event| event.marker)
        .collect()
}

#[test]
fn scans_module_test_and_assertions_in_order() {
    let css = "\
/* # Module: buttons */
/* ---------------- */
/* Test: renders correctly */
/* ✔ has a border */
/* Test: applies correct padding */
/* ✖ FAILED: [assert-equal] padding matches */
/*   - Output: 8px */
/*   - Expected: 10px */
";
    assert_eq!(
        markers(css),
        vec![
            Marker::ModuleStart {
                name: "buttons".into()
            },
            Marker::TestStart {
                name: "renders correctly".into()
            },
            Marker::Pass {
                description: "has a border".into()
            },
            Marker::TestStart {
                name: "applies correct padding".into()
            },
            Marker::Fail(FailureDetail {
                assertion: "assert-equal".into(),
                description: "padding matches".into(),
                output: Some("8px".into()),
                expected: Some("10px".into()),
                details: None,
            }),
        ]
    );
}

#[test]
fn ordinary_css_and_comments_are_inert() {
    let css = "\
a { color: red; }
/* plain comment */
/* # Module: m */
.b { top: 0; /* inline note */ }
/* Test: t */
/* ✔ ok */
";
    assert_eq!(markers(css).len(), 3);
}

#[test]
fn scanning_stops_at_summary() {
    let css = "\
/* # Module: m */
/* Test: t */
/* ✔ ok */
/* # SUMMARY ---------- */
/* 1 Tests: */
/* - 1 Passed */
";
    let events = scan(css).unwrap();
    assert_eq!(events.len(), 3);

    // Streaming form stays terminal after the summary.
    let mut scanner = Scanner::new(css);
    while scanner.next_event().unwrap().is_some() {}
    assert_eq!(scanner.next_event().unwrap(), None);
}

#[test]
fn failure_details_attach_to_their_assertion() {
    let css = "\
/* # Module: m */
/* Test: t */
/* ✖ FAILED: [assert-true] flag set */
/*   - Details: argument 2 was false */
/* ✔ next assertion unaffected */
";
    let Marker::Fail(detail) = &markers(css)[2] else {
        panic!("expected a failure marker");
    };
    assert_eq!(detail.assertion, "assert-true");
    assert_eq!(detail.output, None);
    assert_eq!(detail.details.as_deref(), Some("argument 2 was false"));
}

#[test]
fn assert_block_captures_both_sections() {
    let css = "\
/* # Module: m */
/* Test: t */
/* ASSERT: renders the ruleset */
/* OUTPUT */
.out { color: red; }
/* END_OUTPUT */
/* EXPECTED */
.out { color: blue; }
/* END_EXPECTED */
/* END_ASSERT */
";
    let Marker::CompareCss(cmp) = &markers(css)[2] else {
        panic!("expected a comparison marker");
    };
    assert_eq!(cmp.description, "renders the ruleset");
    assert_eq!(cmp.output.trim(), ".out { color: red; }");
    assert_eq!(cmp.expected.trim(), ".out { color: blue; }");
}

#[test]
fn event_lines_point_into_compiled_output() {
    let css = "a { top: 0; }\n/* # Module: m */\n/* Test: t */\n";
    let events = scan(css).unwrap();
    assert_eq!(events[0].line, 2);
    assert_eq!(events[1].line, 3);
}

#[test]
fn stray_payload_line_is_a_hard_error() {
    let err = scan("/* - Output: 8px */").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        ScanErrorKind::DetailOutsideFailure {
            detail: "- Output:".into()
        }
    );
}

#[test]
fn stray_delimiter_is_a_hard_error() {
    let err = scan("/* a */\n/* END_OUTPUT */").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(
        err.kind,
        ScanErrorKind::StrayDelimiter {
            delimiter: "END_OUTPUT".into()
        }
    );
}

#[test]
fn failure_without_bracketed_type_is_a_hard_error() {
    let err = scan("/* ✖ FAILED: no type here */").unwrap_err();
    assert!(matches!(err.kind, ScanErrorKind::MalformedFailure { .. }));
}

#[test]
fn unterminated_assert_block_is_a_hard_error() {
    let css = "/* ASSERT: cut short */\n/* OUTPUT */\n.a { top: 0; }\n";
    let err = scan(css).unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        ScanErrorKind::UnterminatedAssert {
            description: "cut short".into()
        }
    );
}

#[test]
fn wrong_delimiter_order_is_a_hard_error() {
    let css = "/* ASSERT: order */\n/* EXPECTED */\n";
    let err = scan(css).unwrap_err();
    assert_eq!(
        err.kind,
        ScanErrorKind::UnexpectedInAssert {
            expected: "OUTPUT",
            found: "EXPECTED".into()
        }
    );
}

proptest! {
    /// Arbitrary input never panics the scanner; it either produces events
    /// or a structured error.
    #[test]
    fn scan_never_panics(input in ".*") {
        let _ = scan(&input);
    }

    /// Scanning is deterministic: the same input yields the same outcome.
    #[test]
    fn scan_is_deterministic(input in ".*") {
        prop_assert_eq!(scan(&input), scan(&input));
    }
}
