//! Statement parsing.
//!
//! Statement dispatch is driven by the current token's kind with one token
//! of lookahead: `IDENT TYPE` opens a declaration, `IDENT (` a call, and a
//! bare `IDENT` an assignment. A declaration with an initializer
//! (`x int = e;`) is pushed as two statements, the declaration followed by
//! an assignment to the freshly declared variable, so later passes never
//! see a combined form.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Block, Declare, Stmt, Variable};
use crate::token::{Token, TokenKind};

impl Parser<'_> {
    /// Parses statements until the end of input or a closing `}`.
    pub(super) fn parse_statement_list(&mut self) -> Result<Block, ParseError> {
        let mut statements = Vec::new();

        while let Some(token) = self.current_token() {
            match token.kind {
                TokenKind::RBrace => break,
                TokenKind::Semicolon => {
                    // empty statement
                    self.advance();
                }
                TokenKind::LBrace => {
                    let block = self.parse_block()?;
                    statements.push(Stmt::Block(block));
                }
                TokenKind::Identifier => {
                    self.parse_identifier_statement(&mut statements)?;
                }
                TokenKind::Keyword => {
                    self.parse_keyword_statement(&mut statements)?;
                }
                _ => return Err(self.unknown_statement(token)),
            }
        }

        Ok(Block { statements })
    }

    /// Parses a brace-delimited block.
    pub(super) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let block = self.parse_statement_list()?;
        self.expect(TokenKind::RBrace)?;
        Ok(block)
    }

    /// Parses a statement that begins with an identifier: a declaration
    /// (optionally with an initializer), a call, or an assignment.
    fn parse_identifier_statement(&mut self, out: &mut Vec<Stmt>) -> Result<(), ParseError> {
        match self.peek_kind(1) {
            Some(TokenKind::Type) => {
                let declare = self.parse_declaration()?;
                let target = declare.variable;
                out.push(Stmt::Declare(declare));

                if self.current_is(TokenKind::Equals) {
                    // the declaration went through above; the initializer
                    // becomes a second, ordinary assignment
                    let op = self.expect(TokenKind::Equals)?;
                    let value = self.parse_expr()?;
                    self.expect(TokenKind::Semicolon)?;
                    out.push(Stmt::Assign { target, op, value });
                } else {
                    self.expect(TokenKind::Semicolon)?;
                }
            }
            Some(TokenKind::LParen) => {
                let is_include = self
                    .current_token()
                    .is_some_and(|token| self.token_text(&token) == "include");

                if is_include {
                    let spliced = self.parse_include_statement()?;
                    self.expect(TokenKind::Semicolon)?;
                    out.push(spliced);
                } else {
                    let call = self.parse_func_call()?;
                    self.expect(TokenKind::Semicolon)?;
                    out.push(Stmt::Call(call));
                }
            }
            _ => {
                let target = self.parse_variable()?;
                let op = self.expect(TokenKind::Equals)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                out.push(Stmt::Assign { target, op, value });
            }
        }
        Ok(())
    }

    /// Parses a statement that begins with a reserved word.
    ///
    /// Only `fn` and `return` have grammar; the remaining reserved words
    /// are recognized but unsupported.
    fn parse_keyword_statement(&mut self, out: &mut Vec<Stmt>) -> Result<(), ParseError> {
        let token = match self.current_token() {
            Some(token) => token,
            None => return Err(self.end_of_input("a statement")),
        };
        let word = self.token_text(&token).to_string();

        match word.as_str() {
            "fn" => {
                let fdecl = self.parse_fn_declaration()?;
                // the body's closing brace terminates the statement
                out.push(Stmt::FuncDeclare(fdecl));
            }
            "return" => {
                self.advance();
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon)?;
                out.push(Stmt::Return {
                    keyword: token,
                    value,
                });
            }
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::UnsupportedKeyword,
                    message: format!("Unsupported keyword '{}'", word),
                    span: token.span,
                    source: token.source,
                });
            }
        }
        Ok(())
    }

    /// Parses a declaration: `IDENT TYPE`.
    pub(super) fn parse_declaration(&mut self) -> Result<Declare, ParseError> {
        let variable = self.parse_variable()?;
        let ty = self.expect(TokenKind::Type)?;
        Ok(Declare { ty, variable })
    }

    /// Parses a variable reference: a single identifier.
    pub(super) fn parse_variable(&mut self) -> Result<Variable, ParseError> {
        let name = self.expect(TokenKind::Identifier)?;
        Ok(Variable { name })
    }

    fn unknown_statement(&self, token: Token) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnknownStatement,
            message: format!(
                "Unknown statement ('{}') in block",
                self.token_text(&token)
            ),
            span: token.span,
            source: token.source,
        }
    }
}
