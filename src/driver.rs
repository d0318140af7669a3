//! Build orchestration for the alps CLI.
//!
//! The driver reads the entry file, runs the lex → parse → emit pipeline,
//! and writes the output. Errors from every phase are unified into a
//! [`CompileError`] carried alongside the compile's
//! [`SourceMap`](alps::source::SourceMap) so diagnostics can point into
//! the right file, including files pulled in by `include(...)`.

use std::io;
use std::path::{Path, PathBuf};

use alps::ast::Block;
use alps::emit::{EmitError, Emitter};
use alps::lexer::{LexError, Lexer};
use alps::parser::{ParseError, Parser};
use alps::source::{SourceId, SourceMap};
use alps::token::Token;

/// A compilation error from any phase of the compiler.
///
/// This enum unifies errors from lexing, parsing, emission, and I/O to
/// simplify error handling in the build pipeline.
pub(crate) enum CompileError {
    /// An error during lexical analysis.
    Lex(LexError),
    /// An error during parsing (includes failed includes).
    Parse(ParseError),
    /// An error during assembly emission.
    Emit(EmitError),
    /// Failed to read the entry source file.
    FileRead {
        path: String,
        source: io::Error,
    },
    /// Failed to write the output file.
    OutputWrite {
        path: String,
        source: io::Error,
    },
}

impl CompileError {
    fn file_read_error(path: impl Into<String>, source: io::Error) -> Self {
        CompileError::FileRead {
            path: path.into(),
            source,
        }
    }

    fn output_write_error(path: impl Into<String>, source: io::Error) -> Self {
        CompileError::OutputWrite {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Emit(e) => write!(f, "{}", e),
            CompileError::FileRead { path, source } => {
                write!(f, "Failed to read file '{}': {}", path, source)
            }
            CompileError::OutputWrite { path, source } => {
                write!(f, "Failed to write output file '{}': {}", path, source)
            }
        }
    }
}

/// A compilation error bundled with the source buffers needed to report
/// it.
pub(crate) struct CompileErrorWithSources {
    sources: SourceMap,
    error: CompileError,
}

impl CompileErrorWithSources {
    pub(crate) fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub(crate) fn error(&self) -> &CompileError {
        &self.error
    }
}

/// Bundles an error with the sources read so far.
fn fail(sources: SourceMap, error: CompileError) -> Box<CompileErrorWithSources> {
    Box::new(CompileErrorWithSources { sources, error })
}

/// Reads and lexes the entry file.
fn lex_entry_file(
    file: &str,
) -> Result<(SourceMap, SourceId, Vec<Token>), Box<CompileErrorWithSources>> {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            return Err(fail(
                SourceMap::new(),
                CompileError::file_read_error(file, e),
            ));
        }
    };

    let mut map = SourceMap::new();
    let id = map.add(file, text);
    let lex_result = Lexer::new(map.text(id), id).tokenize();
    match lex_result {
        Ok(tokens) => Ok((map, id, tokens)),
        Err(e) => Err(fail(map, CompileError::Lex(e))),
    }
}

/// Reads, lexes, and parses the entry file and everything it includes.
fn parse_entry_file(file: &str) -> Result<(SourceMap, Block), Box<CompileErrorWithSources>> {
    let (mut map, id, tokens) = lex_entry_file(file)?;

    let result = Parser::with_source_path(tokens, id, &mut map, Path::new(file)).parse();
    match result {
        Ok(program) => Ok((map, program)),
        Err(e) => Err(fail(map, CompileError::Parse(e))),
    }
}

/// Builds an alps source file into an AArch64 assembly file.
///
/// # Arguments
///
/// * `file` - Path to the alps source file
/// * `output` - Optional path for the output assembly. If `None`, uses the
///   input file stem with a `.s` extension.
///
/// # Returns
///
/// * `Ok(())` - Compilation succeeded, assembly written to disk
/// * `Err(CompileErrorWithSources)` - Compilation failed
pub(crate) fn build(
    file: &str,
    output: Option<&str>,
) -> Result<(), Box<CompileErrorWithSources>> {
    let (map, program) = parse_entry_file(file)?;

    let mut assembly = Vec::new();
    let emit_result = Emitter::new(&map, &mut assembly).emit_program(&program);
    if let Err(e) = emit_result {
        return Err(fail(map, CompileError::Emit(e)));
    }

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => Path::new(file).with_extension("s"),
    };
    if let Err(e) = std::fs::write(&output_path, &assembly) {
        let path = output_path.display().to_string();
        return Err(fail(map, CompileError::output_write_error(path, e)));
    }

    println!("Built: {}", output_path.display());
    Ok(())
}

/// Parses a source file and prints its parse tree to stdout.
pub(crate) fn dump_ast(file: &str) -> Result<(), Box<CompileErrorWithSources>> {
    let (map, program) = parse_entry_file(file)?;
    print!("{}", crate::dump::render_tree(&map, &program));
    Ok(())
}

/// Lexes a source file and prints its token stream to stdout.
pub(crate) fn dump_tokens(file: &str) -> Result<(), Box<CompileErrorWithSources>> {
    let (map, _, tokens) = lex_entry_file(file)?;
    print!("{}", crate::dump::render_tokens(&map, &tokens));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = CompileError::file_read_error("test.alps", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to read file 'test.alps': file not found"
        );
    }

    #[test]
    fn test_display_output_write_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let err = CompileError::output_write_error("out.s", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to write output file 'out.s': permission denied"
        );
    }
}
