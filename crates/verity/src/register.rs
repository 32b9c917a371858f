//! Registrar adapter.
//!
//! A [`Report`] is plain data; this module replays it against a host test
//! framework through the two-method [`Registrar`] capability: `describe` for
//! groups, `it` for cases. Replay is depth-first in source order, so the
//! host sees registrations exactly as the fixture laid them out.
//!
//! [`Harness`] is the built-in registrar: it records the registration calls,
//! runs every check eagerly, and tallies outcomes. The crate's own tests use
//! it, and it works as a minimal host when no framework is involved.

use std::path::Path;

use crate::bridge::run_fixture;
use crate::error::RunError;
use crate::report::{CaseOutcome, Failure, Node, Report};

/// A group body: invoked by the host to register the group's children.
pub type Body<'a> = &'a mut dyn FnMut(&mut dyn Registrar);

/// A deferred case check: `Ok(())` is a pass, `Err` carries the diagnostic.
pub type Check<'a> = Box<dyn FnOnce() -> Result<(), Failure> + 'a>;

/// The two registration primitives a host test framework supplies.
///
/// Both are synchronous. The host decides when (and whether) to invoke the
/// bodies and checks it receives; the bridge only hands them over.
pub trait Registrar {
    /// Register a named group whose children register inside `body`.
    fn describe(&mut self, name: &str, body: Body<'_>);

    /// Register a named case. Running `check` yields the outcome.
    fn it(&mut self, name: &str, check: Check<'_>);
}

/// Compile a fixture and replay its report against the registrar.
///
/// A fatal [`RunError`] is returned before any `describe` or `it` call is
/// made; registration is all-or-nothing.
pub fn run_sass(path: impl AsRef<Path>, registrar: &mut dyn Registrar) -> Result<(), RunError> {
    let report = run_fixture(path)?;
    register(&report, registrar);
    Ok(())
}

/// Replay a report against the registrar, depth-first in source order.
pub fn register(report: &Report, registrar: &mut dyn Registrar) {
    register_nodes(&report.nodes, registrar);
}

fn register_nodes(nodes: &[Node], registrar: &mut dyn Registrar) {
    for node in nodes {
        match node {
            Node::Group(group) => {
                let mut body = |host: &mut dyn Registrar| register_nodes(&group.children, host);
                registrar.describe(&group.name, &mut body);
            }
            Node::Case(case) => {
                let outcome = case.outcome.clone();
                registrar.it(
                    &case.name,
                    Box::new(move || match outcome {
                        CaseOutcome::Pass => Ok(()),
                        CaseOutcome::Fail(failure) => Err(failure),
                    }),
                );
            }
        }
    }
}

/// What a [`Harness`] saw during registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    Group {
        name: String,
        children: Vec<Recorded>,
    },
    Case {
        name: String,
        failure: Option<Failure>,
    },
}

/// Built-in registrar: records calls and runs checks eagerly.
#[derive(Default)]
pub struct Harness {
    recorded: Vec<Recorded>,
    open: Vec<(String, Vec<Recorded>)>,
    passed: usize,
    failed: usize,
}

impl Harness {
    pub fn new() -> Self {
        Harness::default()
    }

    /// The recorded registration tree, in registration order.
    pub fn recorded(&self) -> &[Recorded] {
        &self.recorded
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    fn push(&mut self, node: Recorded) {
        match self.open.last_mut() {
            Some((_, children)) => children.push(node),
            None => self.recorded.push(node),
        }
    }
}

impl Registrar for Harness {
    fn describe(&mut self, name: &str, body: Body<'_>) {
        self.open.push((name.to_owned(), Vec::new()));
        body(self);
        if let Some((name, children)) = self.open.pop() {
            self.push(Recorded::Group { name, children });
        }
    }

    fn it(&mut self, name: &str, check: Check<'_>) {
        let failure = match check() {
            Ok(()) => {
                self.passed += 1;
                None
            }
            Err(failure) => {
                self.failed += 1;
                Some(failure)
            }
        };
        self.push(Recorded::Case {
            name: name.to_owned(),
            failure,
        });
    }
}
