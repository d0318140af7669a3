//! Parser for the alps programming language.
//!
//! This module provides the [`Parser`] struct which transforms a token
//! stream into an Abstract Syntax Tree rooted at a [`Block`].
//!
//! # Overview
//!
//! The parser implements a recursive descent parsing strategy. It consumes
//! tokens produced by the [`crate::lexer`] and builds an AST suitable for
//! assembly emission.
//!
//! # Grammar
//!
//! ```text
//! program      → statement* EOF
//! block        → "{" statement* "}"
//! statement    → block
//!              | declaration ";"
//!              | declaration "=" expr ";"     (pushed as two statements)
//!              | assignment ";"
//!              | func_call ";"
//!              | func_declare                 (no trailing ";")
//!              | "return" expr ";"
//!              | ";"
//! declaration  → IDENT TYPE                   (name first, then type)
//! func_declare → "fn" IDENT "(" decl_list? ")" TYPE block
//! decl_list    → declaration ("," declaration)*
//! assignment   → IDENT "=" expr
//! func_call    → IDENT "(" (expr ("," expr)*)? ")"
//! expr         → term (("+" | "-") term)*
//! term         → factor (("*" | "/") factor)*
//! factor       → ("+" | "-") factor
//!              | NUMBER | STRING
//!              | "(" expr ")"
//!              | IDENT ("(" expr_list ")")?   (variable or call)
//! ```
//!
//! A statement-level call to `include("path")` splices the parsed contents
//! of another file in place of the call; see the `include` submodule.
//!
//! # Examples
//!
//! ```
//! use alps::lexer::Lexer;
//! use alps::parser::Parser;
//! use alps::source::SourceMap;
//!
//! let mut map = SourceMap::new();
//! let id = map.add("demo.alps", "fn main() int { return 0; }");
//! let tokens = Lexer::new(map.text(id), id).tokenize().unwrap();
//!
//! let program = Parser::new(tokens, id, &mut map).parse().unwrap();
//! assert_eq!(program.statements.len(), 1);
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Parse error types
//! - `helpers` - Token navigation and basic parsing operations
//! - `stmt` - Statement parsing and declarations
//! - `expr` - Expression parsing (precedence ladder)
//! - `fn_def` - Function declaration parsing
//! - `include` - Source inclusion splicing
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed by the parser
//! * [`crate::ast`] - Defines the AST types produced by the parser
//! * [`crate::emit`] - Consumes the AST to generate assembly

mod error;
mod expr;
mod fn_def;
mod helpers;
mod include;
mod stmt;

#[cfg(test)]
mod tests;

pub use error::{ParseError, ParseErrorKind};

use std::path::{Path, PathBuf};

use crate::ast::Block;
use crate::source::{SourceId, SourceMap};
use crate::token::Token;

/// A recursive descent parser for the alps language.
///
/// The parser maintains a position within the token stream and provides
/// methods to parse the grammar productions. It holds a mutable reference
/// to the compile's [`SourceMap`] so that `include(...)` can register the
/// files it reads.
///
/// # Usage
///
/// Create a parser with [`Parser::new`] (or [`Parser::with_source_path`]
/// when the source came from a file on disk), then call [`Parser::parse`]
/// to produce the program [`Block`].
pub struct Parser<'m> {
    /// The compile's source buffers; grows when includes are parsed.
    map: &'m mut SourceMap,
    /// The token stream to parse.
    tokens: Vec<Token>,
    /// Current position in the token stream.
    pos: usize,
    /// The buffer the tokens came from, for end-of-input diagnostics.
    source: SourceId,
    /// Directory against which include paths are resolved.
    base_dir: PathBuf,
    /// Canonicalized paths of the files currently being parsed, outermost
    /// first. Used to detect circular includes.
    active_files: Vec<PathBuf>,
}

impl<'m> Parser<'m> {
    /// Creates a new parser from a token list.
    ///
    /// Include paths are resolved against the current working directory;
    /// use [`Parser::with_source_path`] to resolve them against the source
    /// file's own directory.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token stream to parse
    /// * `source` - The buffer the tokens came from
    /// * `map` - The compile's source map
    pub fn new(tokens: Vec<Token>, source: SourceId, map: &'m mut SourceMap) -> Self {
        Parser {
            map,
            tokens,
            pos: 0,
            source,
            base_dir: PathBuf::from("."),
            active_files: Vec::new(),
        }
    }

    /// Creates a new parser for a source file read from `path`.
    ///
    /// Include paths are resolved against the file's parent directory, and
    /// the file itself participates in circular-include detection.
    pub fn with_source_path(
        tokens: Vec<Token>,
        source: SourceId,
        map: &'m mut SourceMap,
        path: &Path,
    ) -> Self {
        let base_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        // if the entry file cannot be canonicalized, cycle detection
        // simply starts with the first include
        let active_files = path.canonicalize().into_iter().collect();
        Parser {
            map,
            tokens,
            pos: 0,
            source,
            base_dir,
            active_files,
        }
    }

    /// Parses the entire token stream into a program [`Block`].
    ///
    /// This is the main entry point for parsing. It parses statements
    /// until the end of input.
    ///
    /// # Returns
    ///
    /// * `Ok(Block)` - The parsed program
    /// * `Err(ParseError)` - If a syntax error is encountered
    ///
    /// # Errors
    ///
    /// Returns an error on any unexpected token, unknown statement,
    /// function body without a return statement, or failed include.
    pub fn parse(&mut self) -> Result<Block, ParseError> {
        let block = self.parse_statement_list()?;

        // a stray `}` is the only way the statement list stops early
        if let Some(token) = self.current_token() {
            return Err(self.unexpected("end of input", token));
        }

        Ok(block)
    }
}
