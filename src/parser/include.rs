//! Source inclusion.
//!
//! A statement-level call `include("path");` splices the parsed contents
//! of another file in place of the call. The path resolves against the
//! directory of the file being parsed, the included file is registered in
//! the compile's [`SourceMap`](crate::source::SourceMap), and a nested
//! parser produces the program block that replaces the call.
//!
//! The chain of canonicalized open files is threaded through nested
//! parsers so a file that includes itself, directly or indirectly, is
//! rejected instead of recursing forever.

use std::fs;
use std::path::PathBuf;

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Expr, Stmt};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

impl Parser<'_> {
    /// Parses `include("path")` and returns the spliced program block.
    ///
    /// The caller has established that the callee identifier is `include`
    /// and consumes the trailing semicolon itself.
    ///
    /// # Errors
    ///
    /// * [`ParseErrorKind::IncludeFailed`] - The argument is not a string
    ///   literal, the file cannot be read, or its contents fail to lex
    /// * [`ParseErrorKind::IncludeCycle`] - The file is already being
    ///   parsed somewhere up the include chain
    pub(super) fn parse_include_statement(&mut self) -> Result<Stmt, ParseError> {
        let call = self.parse_func_call()?;

        let path_token = match call.args.first() {
            Some(Expr::Literal(token)) if token.kind == TokenKind::Str => *token,
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::IncludeFailed,
                    message: "include expects a string literal path".to_string(),
                    span: call.callee.name.span,
                    source: call.callee.name.source,
                });
            }
        };

        let relative = strip_quotes(self.token_text(&path_token)).to_string();
        let path = self.base_dir.join(&relative);
        let canonical = path
            .canonicalize()
            .map_err(|error| self.include_failed(&path_token, &relative, error))?;

        if self.active_files.contains(&canonical) {
            return Err(ParseError {
                kind: ParseErrorKind::IncludeCycle,
                message: format!("Circular include of '{}'", relative),
                span: path_token.span,
                source: path_token.source,
            });
        }

        let text = fs::read_to_string(&canonical)
            .map_err(|error| self.include_failed(&path_token, &relative, error))?;
        let id = self.map.add(canonical.display().to_string(), text);
        let tokens = Lexer::new(self.map.text(id), id)
            .tokenize()
            .map_err(ParseError::from_lex)?;

        let base_dir = canonical
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut active_files = self.active_files.clone();
        active_files.push(canonical);

        let mut nested = Parser {
            map: &mut *self.map,
            tokens,
            pos: 0,
            source: id,
            base_dir,
            active_files,
        };
        let block = nested.parse()?;

        Ok(Stmt::Block(block))
    }

    fn include_failed(&self, token: &Token, path: &str, error: std::io::Error) -> ParseError {
        ParseError {
            kind: ParseErrorKind::IncludeFailed,
            message: format!("Could not load '{}': {}", path, error),
            span: token.span,
            source: token.source,
        }
    }
}

/// Strips the surrounding quote characters from a string token's text.
fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
