//! Report tree types.
//!
//! One run of a fixture produces one [`Report`]: an ordered tree of groups
//! and cases mirroring the module/test nesting of the fixture, plus pass and
//! fail counters. The tree is plain data — replaying it against a host test
//! framework is [`crate::register`]'s job.

/// Outcome of a single test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Every assertion in the case passed.
    Pass,
    /// At least one assertion failed; carries the first failure.
    Fail(Failure),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CaseOutcome::Fail(_))
    }
}

/// Diagnostic payload of a failed assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// The assertion type, e.g. `assert-equal`.
    pub assertion: String,
    /// Human-readable description of the assertion.
    pub description: String,
    /// The actual value, when the assertion reported one.
    pub output: Option<String>,
    /// The expected value, when the assertion reported one.
    pub expected: Option<String>,
    /// Free-form extra context.
    pub details: Option<String>,
}

impl Failure {
    /// Render the failure as a multi-line diagnostic message.
    ///
    /// Shape: `[<type>] <description>` followed by indented `Output:`,
    /// `Expected:` and `Details:` lines for whichever payloads are present.
    pub fn message(&self) -> String {
        let mut message = format!("[{}] {}", self.assertion, self.description);
        for (label, payload) in [
            ("Output", self.output.as_deref()),
            ("Expected", self.expected.as_deref()),
            ("Details", self.details.as_deref()),
        ] {
            if let Some(payload) = payload {
                message.push_str("\n  ");
                message.push_str(label);
                message.push_str(": ");
                message.push_str(payload);
            }
        }
        message
    }
}

/// A node in the report tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Group(Group),
    Case(Case),
}

/// A named group of child nodes, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub children: Vec<Node>,
}

/// A single test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Case {
    pub name: String,
    pub outcome: CaseOutcome,
    /// How many assertion markers the case contained.
    pub assertions: usize,
}

impl Case {
    /// Create a passed case.
    pub fn passed(name: impl Into<String>, assertions: usize) -> Self {
        Case {
            name: name.into(),
            outcome: CaseOutcome::Pass,
            assertions,
        }
    }

    /// Create a failed case.
    #[cold]
    pub fn failed(name: impl Into<String>, failure: Failure, assertions: usize) -> Self {
        Case {
            name: name.into(),
            outcome: CaseOutcome::Fail(failure),
            assertions,
        }
    }
}

/// The full report for one fixture run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Top-level nodes in source order.
    pub nodes: Vec<Node>,
    /// Number of passing cases across the whole tree.
    pub passed: usize,
    /// Number of failing cases across the whole tree.
    pub failed: usize,
}

impl Report {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Iterate over all cases in the tree, depth-first in source order.
    pub fn cases(&self) -> impl Iterator<Item = &Case> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Case>) {
            for node in nodes {
                match node {
                    Node::Group(group) => walk(&group.children, out),
                    Node::Case(case) => out.push(case),
                }
            }
        }
        let mut cases = Vec::new();
        walk(&self.nodes, &mut cases);
        cases.into_iter()
    }
}
