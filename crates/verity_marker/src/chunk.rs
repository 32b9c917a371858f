//! Low-level chunker splitting compiled CSS into comments and raw runs.
//!
//! The chunker walks the source byte-by-byte, tracking the 1-based line of
//! each chunk. Comment detection is quote-aware: a `/*` inside a string
//! literal (e.g. `content: "/*"`) does not start a comment. CSS comments do
//! not nest, so a comment ends at the first `*/`.

use crate::error::{ScanError, ScanErrorKind};

/// One chunk of compiled CSS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Chunk<'a> {
    /// A `/* ... */` comment; `body` excludes the delimiters.
    Comment { line: u32, body: &'a str },
    /// A run of non-comment CSS with at least one non-whitespace byte.
    Css { line: u32, text: &'a str },
}

/// Cursor producing chunks from compiled CSS in document order.
pub(crate) struct Chunker<'a> {
    src: &'a str,
    pos: usize,
    line: u32,
}

impl<'a> Chunker<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Chunker { src, pos: 0, line: 1 }
    }

    /// Produce the next chunk, skipping whitespace-only runs.
    ///
    /// Returns `Ok(None)` at end of input.
    pub(crate) fn next_chunk(&mut self) -> Result<Option<Chunk<'a>>, ScanError> {
        loop {
            if self.pos >= self.src.len() {
                return Ok(None);
            }
            if self.src[self.pos..].starts_with("/*") {
                return self.comment().map(Some);
            }
            if let Some(chunk) = self.raw_run() {
                return Ok(Some(chunk));
            }
        }
    }

    /// Consume a comment starting at `self.pos`.
    fn comment(&mut self) -> Result<Chunk<'a>, ScanError> {
        let start = self.pos;
        let start_line = self.line;
        let Some(close) = self.src[start + 2..].find("*/") else {
            return Err(ScanError::new(start_line, ScanErrorKind::UnterminatedComment));
        };
        let body = &self.src[start + 2..start + 2 + close];
        let end = start + 2 + close + 2;
        self.line += count_lines(&self.src[start..end]);
        self.pos = end;
        Ok(Chunk::Comment {
            line: start_line,
            body,
        })
    }

    /// Consume raw CSS up to the next comment start or end of input.
    ///
    /// Returns `None` when the run is whitespace-only (the run is still
    /// consumed and the caller loops).
    fn raw_run(&mut self) -> Option<Chunk<'a>> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        let start_line = self.line;
        let mut i = start;
        let mut quote: Option<u8> = None;
        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) => {
                    if b == b'\\' {
                        // Skip the escaped byte as well.
                        i = (i + 2).min(bytes.len());
                        continue;
                    }
                    if b == q {
                        quote = None;
                    }
                    i += 1;
                }
                None => {
                    if b == b'"' || b == b'\'' {
                        quote = Some(b);
                        i += 1;
                    } else if b == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'*' {
                        break;
                    } else {
                        i += 1;
                    }
                }
            }
        }
        let text = &self.src[start..i];
        self.line += count_lines(text);
        self.pos = i;
        if text.trim().is_empty() {
            None
        } else {
            Some(Chunk::Css {
                line: start_line,
                text,
            })
        }
    }
}

/// Count newlines in `text`, saturating at `u32::MAX`.
fn count_lines(text: &str) -> u32 {
    let count = text.bytes().filter(|&b| b == b'\n').count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
