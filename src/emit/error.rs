//! Emission error types.

use crate::source::SourceId;
use crate::token::{Span, Token};

/// The category of an emission error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitErrorKind {
    /// An identifier was read or assigned without a preceding declaration.
    UndeclaredVariable,
    /// A built-in intrinsic was called with an argument it cannot accept.
    InvalidBuiltinArgument,
    /// An expression form the emitter does not lower (unary operators).
    UnsupportedExpr,
    /// An operand that cannot participate in arithmetic (string values),
    /// or a constant expression that divides by zero.
    InvalidOperand,
    /// A numeric literal whose integer part does not fit in 64 bits.
    InvalidNumber,
    /// A statement that only makes sense inside a function body.
    OutsideFunction,
    /// A call with more arguments than there are argument registers.
    TooManyArguments,
    /// The output sink failed.
    Io,
}

/// An error that occurred during assembly emission.
///
/// Contains a human-readable message and optionally the source location
/// where the error occurred, enabling rich error reporting.
#[derive(Debug)]
pub struct EmitError {
    /// The category of this error.
    pub kind: EmitErrorKind,
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred, if available.
    pub span: Option<Span>,
    /// The buffer the span indexes into, if available.
    pub source: Option<SourceId>,
}

impl EmitError {
    /// Creates a new error located at `token`.
    pub fn at(kind: EmitErrorKind, message: impl Into<String>, token: &Token) -> Self {
        EmitError {
            kind,
            message: message.into(),
            span: Some(token.span),
            source: Some(token.source),
        }
    }

    /// Creates a new error with only a message (no source location).
    pub fn without_span(kind: EmitErrorKind, message: impl Into<String>) -> Self {
        EmitError {
            kind,
            message: message.into(),
            span: None,
            source: None,
        }
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(span) = &self.span {
            write!(f, "{}:{}: {}", span.line, span.column, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for EmitError {}

impl From<std::io::Error> for EmitError {
    fn from(error: std::io::Error) -> Self {
        EmitError::without_span(
            EmitErrorKind::Io,
            format!("Failed to write assembly output: {}", error),
        )
    }
}
