//! Parse error types.

use crate::lexer::LexError;
use crate::source::SourceId;
use crate::token::Span;

/// The category of a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token of one kind was found where another was required.
    UnexpectedToken,
    /// A statement began with a token no statement form accepts.
    UnknownStatement,
    /// A function body had no `return` among its direct statements.
    MissingReturn,
    /// A reserved word with no grammar (`if`, `for`, `while`, `struct`).
    UnsupportedKeyword,
    /// An included file could not be read or lexed.
    IncludeFailed,
    /// A file included itself, directly or through other includes.
    IncludeCycle,
}

/// An error that occurred during parsing.
///
/// `ParseError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting.
///
/// # See Also
///
/// * [`crate::lexer::LexError`] - Similar error type for lexical errors
#[derive(Debug)]
pub struct ParseError {
    /// The category of this error.
    pub kind: ParseErrorKind,
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
    /// The buffer the span indexes into.
    pub source: SourceId,
}

impl ParseError {
    /// Wraps a lexical error raised while lexing an included file.
    ///
    /// The span and source point into the included file so diagnostics
    /// land on the offending text rather than the `include(...)` call.
    pub(crate) fn from_lex(error: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::IncludeFailed,
            message: error.message,
            span: error.span,
            source: error.source,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}
