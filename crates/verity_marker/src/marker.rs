//! Marker event types.

/// One scanned marker with its position in the compiled output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    /// 1-based line in the compiled CSS where the marker comment starts.
    pub line: u32,
    /// The marker itself.
    pub marker: Marker,
}

/// A structured marker recognized in the compiled output.
///
/// Markers arrive in document order. Module and test markers open scopes;
/// assertion markers belong to the most recently opened test. The scanner is
/// deliberately flat — scope bookkeeping belongs to the report builder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Marker {
    /// `# Module: <name>` — opens a module. Nested module paths are joined
    /// by ` :: ` in the name.
    ModuleStart { name: String },
    /// `Test: <name>` — opens a test case in the current module.
    TestStart { name: String },
    /// `✔ <description>` — a passing assertion in the current test.
    Pass { description: String },
    /// `✖ FAILED: [<type>] <description>` plus its payload lines.
    Fail(FailureDetail),
    /// An `ASSERT` block pairing compiled output with expected CSS. The
    /// scanner captures both sections verbatim; comparing them is the
    /// bridge's job.
    CompareCss(CssComparison),
}

/// Payload of a failing assertion marker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailureDetail {
    /// The bracketed assertion type, e.g. `assert-equal`.
    pub assertion: String,
    /// Human-readable description of the assertion.
    pub description: String,
    /// `- Output:` payload — the actual value.
    pub output: Option<String>,
    /// `- Expected:` payload.
    pub expected: Option<String>,
    /// `- Details:` payload.
    pub details: Option<String>,
}

/// Captured sections of an `ASSERT` comparison block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CssComparison {
    /// Description from the `ASSERT:` header; may be empty.
    pub description: String,
    /// Raw CSS between `OUTPUT` and `END_OUTPUT`.
    pub output: String,
    /// Raw CSS between `EXPECTED` and `END_EXPECTED`.
    pub expected: String,
}
