//! The compiler seam.
//!
//! The bridge never talks to a Sass compiler directly; it goes through
//! [`Compile`], a pure `input -> Result<css, error>` interface with no shared
//! state. Tests substitute a canned implementation; production uses
//! [`GrassCompiler`].

use std::path::Path;

/// Diagnostic from a failed compilation, preserved verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
}

/// A stylesheet compiler: source in, compiled CSS out.
pub trait Compile {
    /// Compile a stylesheet file. The caller guarantees the path exists.
    fn compile_file(&self, path: &Path) -> Result<String, CompileError>;

    /// Compile inline SCSS source.
    fn compile_source(&self, source: &str) -> Result<String, CompileError>;
}

/// The [grass](https://crates.io/crates/grass) pure-Rust Sass compiler.
///
/// Uses expanded output, which preserves the loud comments the assertion
/// markers ride on.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrassCompiler;

impl GrassCompiler {
    pub fn new() -> Self {
        GrassCompiler
    }
}

impl Compile for GrassCompiler {
    fn compile_file(&self, path: &Path) -> Result<String, CompileError> {
        grass::from_path(path, &grass::Options::default()).map_err(|err| CompileError {
            message: err.to_string(),
        })
    }

    fn compile_source(&self, source: &str) -> Result<String, CompileError> {
        grass::from_string(source.to_owned(), &grass::Options::default()).map_err(|err| {
            CompileError {
                message: err.to_string(),
            }
        })
    }
}
