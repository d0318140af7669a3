//! Abstract Syntax Tree definitions for the alps programming language.
//!
//! This module defines the data structures that represent parsed alps
//! programs. The AST is produced by the [`crate::parser`] and consumed by
//! the [`crate::emit`] module.
//!
//! # Structure
//!
//! The AST has a hierarchical structure:
//! - [`Block`] - An ordered statement list; also the program root
//! - [`Stmt`] - Statements (declarations, assignments, calls, function
//!   declarations, returns, nested blocks)
//! - [`Expr`] - Expressions (literals, variable reads, unary and binary
//!   operators, calls)
//!
//! Nodes embed [`Token`]s directly (tokens are `Copy`); token text is
//! recovered through the compile's [`SourceMap`](crate::source::SourceMap).
//! Structural invariants of the language are encoded in the types: a
//! [`Declare`]'s target is a [`Variable`] by construction, and a
//! [`Expr::Binary`]'s operator is one of `+ - * /` because the parser only
//! builds binary nodes from those tokens.
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::emit`] - Generates AArch64 assembly from the AST

use crate::token::Token;

/// A variable reference: a single identifier token.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    /// The identifier token naming the variable.
    pub name: Token,
}

/// A variable declaration: `name type`.
///
/// The type appears after the name in alps (`x int`). Function parameters
/// and the name/return-type pair of a function declaration reuse this
/// shape.
#[derive(Debug, Clone)]
pub struct Declare {
    /// The type token (`int` or `str`).
    pub ty: Token,
    /// The declared variable.
    pub variable: Variable,
}

/// A function call: callee plus ordered argument expressions.
#[derive(Debug, Clone)]
pub struct FuncCall {
    /// The called function's name.
    pub callee: Variable,
    /// The arguments, in source order.
    pub args: Vec<Expr>,
}

/// A function declaration.
///
/// `declaration` carries the function's name and return type as a
/// [`Declare`]; `params` are the parameter declarations in source order.
#[derive(Debug, Clone)]
pub struct FuncDeclare {
    /// The function name and return type.
    pub declaration: Declare,
    /// The parameter declarations.
    pub params: Vec<Declare>,
    /// The function body, if one was given.
    pub body: Option<Block>,
}

impl FuncDeclare {
    /// Returns the token naming this function.
    pub fn name(&self) -> Token {
        self.declaration.variable.name
    }
}

/// An expression in the alps language.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A literal: a number or a string token.
    Literal(Token),
    /// A variable read.
    Variable(Variable),
    /// A unary sign operator applied to an expression.
    Unary {
        /// The operator token (`+` or `-`).
        op: Token,
        /// The operand.
        operand: Box<Expr>,
    },
    /// A binary operator with left and right children.
    Binary {
        /// The operator token (`+`, `-`, `*`, or `/`).
        op: Token,
        /// The left operand.
        left: Box<Expr>,
        /// The right operand.
        right: Box<Expr>,
    },
    /// A function call in expression position.
    Call(FuncCall),
}

/// A statement in the alps language.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// A brace-delimited nested block.
    Block(Block),
    /// A variable declaration.
    Declare(Declare),
    /// An assignment to a previously declared variable.
    Assign {
        /// The assigned variable.
        target: Variable,
        /// The `=` token, kept for error reporting.
        op: Token,
        /// The assigned value.
        value: Expr,
    },
    /// A function call in statement position.
    Call(FuncCall),
    /// A function declaration.
    FuncDeclare(FuncDeclare),
    /// A return statement.
    Return {
        /// The `return` keyword token.
        keyword: Token,
        /// The returned value.
        value: Expr,
    },
}

/// An ordered statement list; also the root of every parse.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// The statements in source order.
    pub statements: Vec<Stmt>,
}

impl Block {
    /// Returns `true` if any of the block's direct statements is a
    /// `return`.
    ///
    /// Only direct statements count; a `return` nested inside an inner
    /// block does not satisfy a function's return requirement.
    pub fn has_direct_return(&self) -> bool {
        self.statements
            .iter()
            .any(|stmt| matches!(stmt, Stmt::Return { .. }))
    }
}
