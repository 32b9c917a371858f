//! Marker scanner.
//!
//! Layers on top of the chunker: classifies comment bodies against the
//! pinned grammar, attaches failure payload lines to their assertion, and
//! consumes `ASSERT` comparison blocks whole. Raw CSS between markers is
//! skipped; inside `OUTPUT`/`EXPECTED` sections it is captured verbatim.

use tracing::trace;

use crate::chunk::{Chunk, Chunker};
use crate::error::{ScanError, ScanErrorKind};
use crate::marker::{CssComparison, Event, FailureDetail, Marker};

/// Block delimiters recognized inside (and only inside) an `ASSERT` block.
const DELIMITERS: [&str; 5] = ["OUTPUT", "END_OUTPUT", "EXPECTED", "END_EXPECTED", "END_ASSERT"];

/// Scan compiled CSS into marker events in document order.
///
/// Convenience wrapper over [`Scanner`]; stops at the `# SUMMARY` marker or
/// end of input, whichever comes first.
pub fn scan(css: &str) -> Result<Vec<Event>, ScanError> {
    let mut scanner = Scanner::new(css);
    let mut events = Vec::new();
    while let Some(event) = scanner.next_event()? {
        events.push(event);
    }
    Ok(events)
}

/// Streaming marker scanner over compiled CSS.
pub struct Scanner<'a> {
    chunks: Chunker<'a>,
    peeked: Option<Chunk<'a>>,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of the compiled output.
    pub fn new(css: &'a str) -> Self {
        Scanner {
            chunks: Chunker::new(css),
            peeked: None,
            done: false,
        }
    }

    /// Produce the next marker event.
    ///
    /// Returns `Ok(None)` after the `# SUMMARY` marker or at end of input.
    pub fn next_event(&mut self) -> Result<Option<Event>, ScanError> {
        if self.done {
            return Ok(None);
        }
        loop {
            let Some(chunk) = self.bump()? else {
                return Ok(None);
            };
            let Chunk::Comment { line, body } = chunk else {
                continue;
            };
            let body = body.trim();

            if let Some(name) = body.strip_prefix("# Module:") {
                trace!(line, name = name.trim(), "module marker");
                return Ok(Some(Event {
                    line,
                    marker: Marker::ModuleStart {
                        name: name.trim().to_owned(),
                    },
                }));
            }
            if body.starts_with("# SUMMARY") {
                trace!(line, "summary marker, scan complete");
                self.done = true;
                return Ok(None);
            }
            if let Some(name) = body.strip_prefix("Test:") {
                return Ok(Some(Event {
                    line,
                    marker: Marker::TestStart {
                        name: name.trim().to_owned(),
                    },
                }));
            }
            if let Some(rest) = body.strip_prefix('✔') {
                return Ok(Some(Event {
                    line,
                    marker: Marker::Pass {
                        description: rest.trim().to_owned(),
                    },
                }));
            }
            if let Some(rest) = body.strip_prefix("✖ FAILED:") {
                let detail = self.failure(line, rest.trim_start())?;
                return Ok(Some(Event {
                    line,
                    marker: Marker::Fail(detail),
                }));
            }
            if body == "ASSERT" || body.starts_with("ASSERT:") {
                let description = body
                    .strip_prefix("ASSERT:")
                    .unwrap_or("")
                    .trim()
                    .to_owned();
                let comparison = self.assert_block(line, description)?;
                return Ok(Some(Event {
                    line,
                    marker: Marker::CompareCss(comparison),
                }));
            }
            if let Some((prefix, _)) = split_payload(body) {
                return Err(ScanError::new(
                    line,
                    ScanErrorKind::DetailOutsideFailure {
                        detail: prefix.to_owned(),
                    },
                ));
            }
            if DELIMITERS.contains(&body) {
                return Err(ScanError::new(
                    line,
                    ScanErrorKind::StrayDelimiter {
                        delimiter: body.to_owned(),
                    },
                ));
            }
            if is_divider(body) {
                continue;
            }
            trace!(line, body, "inert comment");
        }
    }

    /// Parse a `✖ FAILED:` body and attach its payload lines.
    fn failure(&mut self, line: u32, rest: &str) -> Result<FailureDetail, ScanError> {
        let malformed = || {
            ScanError::new(
                line,
                ScanErrorKind::MalformedFailure {
                    body: rest.to_owned(),
                },
            )
        };
        let after_bracket = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = after_bracket.find(']').ok_or_else(malformed)?;
        let mut detail = FailureDetail {
            assertion: after_bracket[..close].to_owned(),
            description: after_bracket[close + 1..].trim().to_owned(),
            output: None,
            expected: None,
            details: None,
        };
        // Payload lines attach to the failure they follow.
        loop {
            // Copy the slice out so the peek borrow ends before `bump`.
            let body = match self.peek()? {
                Some(Chunk::Comment { body, .. }) => *body,
                _ => break,
            };
            let Some((prefix, payload)) = split_payload(body.trim()) else {
                break;
            };
            let slot = match prefix {
                "- Output:" => &mut detail.output,
                "- Expected:" => &mut detail.expected,
                _ => &mut detail.details,
            };
            match slot {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(payload);
                }
                None => *slot = Some(payload.to_owned()),
            }
            self.bump()?;
        }
        Ok(detail)
    }

    /// Consume an `ASSERT` block after its header comment.
    ///
    /// Section order is pinned: `OUTPUT` before `EXPECTED`. Raw CSS between
    /// the delimiters is captured verbatim; comments that are not the
    /// closing delimiter are kept as part of the section text.
    fn assert_block(&mut self, line: u32, description: String) -> Result<CssComparison, ScanError> {
        self.expect_delimiter(line, &description, "OUTPUT")?;
        let output = self.section(line, &description, "END_OUTPUT")?;
        self.expect_delimiter(line, &description, "EXPECTED")?;
        let expected = self.section(line, &description, "END_EXPECTED")?;
        self.expect_delimiter(line, &description, "END_ASSERT")?;
        Ok(CssComparison {
            description,
            output,
            expected,
        })
    }

    /// Consume chunks until the named delimiter comment; raw CSS before it
    /// is an error only at the delimiter positions, so it is skipped.
    fn expect_delimiter(
        &mut self,
        start: u32,
        description: &str,
        expected: &'static str,
    ) -> Result<(), ScanError> {
        loop {
            match self.bump()? {
                Some(Chunk::Css { .. }) => {}
                Some(Chunk::Comment { line, body }) => {
                    let body = body.trim();
                    if body == expected {
                        return Ok(());
                    }
                    return Err(ScanError::new(
                        line,
                        ScanErrorKind::UnexpectedInAssert {
                            expected,
                            found: body.to_owned(),
                        },
                    ));
                }
                None => {
                    return Err(ScanError::new(
                        start,
                        ScanErrorKind::UnterminatedAssert {
                            description: description.to_owned(),
                        },
                    ));
                }
            }
        }
    }

    /// Capture section text up to the named closing delimiter.
    fn section(
        &mut self,
        start: u32,
        description: &str,
        end: &'static str,
    ) -> Result<String, ScanError> {
        let mut text = String::new();
        loop {
            match self.bump()? {
                Some(Chunk::Css { text: css, .. }) => text.push_str(css),
                Some(Chunk::Comment { body, .. }) => {
                    if body.trim() == end {
                        return Ok(text);
                    }
                    // User CSS inside the section may itself carry comments.
                    text.push_str("/*");
                    text.push_str(body);
                    text.push_str("*/");
                }
                None => {
                    return Err(ScanError::new(
                        start,
                        ScanErrorKind::UnterminatedAssert {
                            description: description.to_owned(),
                        },
                    ));
                }
            }
        }
    }

    fn bump(&mut self) -> Result<Option<Chunk<'a>>, ScanError> {
        if let Some(chunk) = self.peeked.take() {
            return Ok(Some(chunk));
        }
        self.chunks.next_chunk()
    }

    fn peek(&mut self) -> Result<Option<&Chunk<'a>>, ScanError> {
        if self.peeked.is_none() {
            self.peeked = self.chunks.next_chunk()?;
        }
        Ok(self.peeked.as_ref())
    }
}

/// Split a failure payload line into its prefix and payload.
fn split_payload(body: &str) -> Option<(&'static str, &str)> {
    for prefix in ["- Output:", "- Expected:", "- Details:"] {
        if let Some(payload) = body.strip_prefix(prefix) {
            return Some((prefix, payload.trim()));
        }
    }
    None
}

/// A divider comment is decoration: one or more dashes and nothing else.
fn is_divider(body: &str) -> bool {
    !body.is_empty() && body.bytes().all(|b| b == b'-')
}

#[cfg(test)]
mod tests;
