//! Parser helper methods for token navigation and basic operations.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::source::SourceId;
use crate::token::{Span, Token, TokenKind};

impl Parser<'_> {
    /// Returns the current token, or `None` at the end of input.
    ///
    /// Tokens are `Copy`, so this hands out a value rather than a
    /// reference.
    pub(super) fn current_token(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    /// Returns the token `offset` positions ahead of the current one.
    pub(super) fn peek(&self, offset: usize) -> Option<Token> {
        self.tokens.get(self.pos + offset).copied()
    }

    /// Returns the kind of the token `offset` positions ahead, if any.
    pub(super) fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.peek(offset).map(|token| token.kind)
    }

    /// Returns `true` if the current token has the given kind.
    pub(super) fn current_is(&self, kind: TokenKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    /// Advances to the next token. Does nothing at the end of input.
    pub(super) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns the text a token covers in its source buffer.
    pub(super) fn token_text(&self, token: &Token) -> &str {
        self.map.token_text(token)
    }

    /// Returns `true` if `token` is the reserved word `word`.
    pub(super) fn keyword_matches(&self, token: &Token, word: &str) -> bool {
        token.kind == TokenKind::Keyword && self.token_text(token) == word
    }

    /// Expects the current token to have kind `expected` and consumes it.
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The consumed token
    /// * `Err(ParseError)` - If the current token does not match or the
    ///   input is exhausted
    pub(super) fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        match self.current_token() {
            Some(token) if token.kind == expected => {
                self.advance();
                Ok(token)
            }
            Some(token) => Err(self.unexpected(expected.name(), token)),
            None => Err(self.end_of_input(expected.name())),
        }
    }

    /// Builds an "Expected X and found Y" error at `found`.
    pub(super) fn unexpected(&self, expected: &str, found: Token) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!(
                "Expected {} and found {} ('{}')",
                expected,
                found.kind,
                self.token_text(&found)
            ),
            span: found.span,
            source: found.source,
        }
    }

    /// Builds an "Expected X and found end of input" error.
    pub(super) fn end_of_input(&self, expected: &str) -> ParseError {
        let (span, source) = self.end_location();
        ParseError {
            kind: ParseErrorKind::UnexpectedToken,
            message: format!("Expected {} and found end of input", expected),
            span,
            source,
        }
    }

    /// Returns a zero-width location just past the last token.
    fn end_location(&self) -> (Span, SourceId) {
        match self.tokens.last() {
            Some(token) => (
                Span::new(
                    token.span.end,
                    token.span.end,
                    token.span.line,
                    token.span.column,
                ),
                token.source,
            ),
            None => (Span::new(0, 0, 1, 1), self.source),
        }
    }
}
