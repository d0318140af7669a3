//! Function declaration parsing.
//!
//! A function header reuses the declaration shape for its name and return
//! type: `fn name(a int, b int) int { ... }` carries the return type after
//! the parameter list, like every other declaration carries its type after
//! the name.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Declare, FuncDeclare};
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses a function declaration.
    ///
    /// The caller has established that the current token is the `fn`
    /// keyword. The body block is mandatory and must contain at least one
    /// `return` among its direct statements.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::MissingReturn`] when the body has no
    /// direct return statement, and the usual unexpected-token errors for
    /// a malformed header or a missing `{`.
    pub(super) fn parse_fn_declaration(&mut self) -> Result<FuncDeclare, ParseError> {
        match self.current_token() {
            Some(token) if self.keyword_matches(&token, "fn") => {}
            Some(token) => return Err(self.unexpected("'fn'", token)),
            None => return Err(self.end_of_input("'fn'")),
        }
        self.advance();

        let variable = self.parse_variable()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.current_is(TokenKind::RParen) {
            loop {
                params.push(self.parse_declaration()?);
                if self.current_is(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        // the return type comes after the parameter list
        let ty = self.expect(TokenKind::Type)?;
        let declaration = Declare { ty, variable };

        // parse_block rejects anything other than `{` here
        let body = self.parse_block()?;

        if !body.has_direct_return() {
            return Err(ParseError {
                kind: ParseErrorKind::MissingReturn,
                message: "No return statement in function".to_string(),
                span: variable.name.span,
                source: variable.name.source,
            });
        }

        Ok(FuncDeclare {
            declaration,
            params,
            body: Some(body),
        })
    }
}
