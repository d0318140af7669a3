//! Expression parsing.
//!
//! Operator precedence is encoded by the standard expr/term/factor
//! layering; associativity is left-to-right because each loop folds the
//! new operator as the parent of everything parsed so far.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Expr, FuncCall};
use crate::token::TokenKind;

impl Parser<'_> {
    /// Parses an expression: `term (("+" | "-") term)*`.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_term()?;

        while let Some(token) = self.current_token() {
            if !matches!(token.kind, TokenKind::Plus | TokenKind::Minus) {
                break;
            }
            self.advance();
            let right = self.parse_term()?;
            node = Expr::Binary {
                op: token,
                left: Box::new(node),
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    /// Parses a term: `factor (("*" | "/") factor)*`.
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_factor()?;

        while let Some(token) = self.current_token() {
            if !matches!(token.kind, TokenKind::Star | TokenKind::Slash) {
                break;
            }
            self.advance();
            let right = self.parse_factor()?;
            node = Expr::Binary {
                op: token,
                left: Box::new(node),
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    /// Parses a factor: a signed factor, a literal, a parenthesized
    /// expression, a call, or a variable read.
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let token = match self.current_token() {
            Some(token) => token,
            None => return Err(self.end_of_input("an expression")),
        };

        match token.kind {
            TokenKind::Plus | TokenKind::Minus => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Expr::Unary {
                    op: token,
                    operand: Box::new(operand),
                })
            }
            TokenKind::Number | TokenKind::Str => {
                self.advance();
                Ok(Expr::Literal(token))
            }
            TokenKind::LParen => {
                self.advance();
                let node = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(node)
            }
            TokenKind::Identifier => {
                if self.peek_kind(1) == Some(TokenKind::LParen) {
                    if self.token_text(&token) == "include" {
                        return Err(ParseError {
                            kind: ParseErrorKind::UnknownStatement,
                            message: "include(...) is only allowed at statement level"
                                .to_string(),
                            span: token.span,
                            source: token.source,
                        });
                    }
                    Ok(Expr::Call(self.parse_func_call()?))
                } else {
                    Ok(Expr::Variable(self.parse_variable()?))
                }
            }
            _ => Err(self.unexpected("an expression", token)),
        }
    }

    /// Parses a function call: `IDENT "(" (expr ("," expr)*)? ")"`.
    pub(super) fn parse_func_call(&mut self) -> Result<FuncCall, ParseError> {
        let callee = self.parse_variable()?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if !self.current_is(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.current_is(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;
        Ok(FuncCall { callee, args })
    }
}
