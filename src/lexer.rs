//! Lexical analyzer for the alps programming language.
//!
//! This module provides the [`Lexer`] struct which converts source text
//! into a stream of [`Token`]s for parsing.
//!
//! # Overview
//!
//! The lexer performs a single left-to-right scan with one character of
//! lookahead:
//! - Whitespace and `//` line comments separate tokens
//! - "Special" characters (`+ - * / = : ; , . ( ) { }`) are emitted as
//!   single-character tokens and terminate any in-progress word
//! - String literals (enclosed in `"` or `'`) suppress both rules until
//!   the matching quote
//! - Everything else accumulates into a word, classified when it ends
//!
//! A decimal point extends a word that is numeric so far, so `1.5` is one
//! `NUMBER` token while `x.y` is three tokens. A numeric word with two
//! decimal points is a fatal lex error.
//!
//! # Examples
//!
//! ```
//! use alps::lexer::Lexer;
//! use alps::source::SourceMap;
//! use alps::token::TokenKind;
//!
//! let mut map = SourceMap::new();
//! let id = map.add("demo.alps", "x int = 5;");
//! let tokens = Lexer::new(map.text(id), id).tokenize().unwrap();
//!
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Identifier,
//!         TokenKind::Type,
//!         TokenKind::Equals,
//!         TokenKind::Number,
//!         TokenKind::Semicolon,
//!     ]
//! );
//! ```
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

use crate::source::SourceId;
use crate::token::{Span, Token, TokenKind};

/// The default set of single-character tokens.
pub const DEFAULT_SPECIALS: &str = "+-*/=:;,.(){}";

/// Reserved words classified as [`TokenKind::Keyword`].
const KEYWORDS: [&str; 6] = ["if", "return", "for", "while", "struct", "fn"];

/// Reserved words classified as [`TokenKind::Type`].
const TYPES: [&str; 2] = ["int", "str"];

/// Options controlling a [`Lexer`].
///
/// The defaults match the compiler's own invocation: the full special
/// set and string literals enabled.
#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    /// Characters emitted as single-character tokens outside strings.
    pub specials: &'static str,
    /// Whether `"..."` and `'...'` string literals are recognized.
    pub enable_strings: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            specials: DEFAULT_SPECIALS,
            enable_strings: true,
        }
    }
}

/// The category of a lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A numeric lexeme contained more than one decimal point.
    InvalidNumber,
    /// A string literal was still open at the end of input.
    UnterminatedString,
}

/// An error that occurred during lexical analysis.
///
/// `LexError` contains a human-readable message and the source location
/// where the error occurred, enabling rich error reporting with tools
/// like [`ariadne`].
///
/// [`ariadne`]: https://docs.rs/ariadne
#[derive(Debug)]
pub struct LexError {
    /// The category of this error.
    pub kind: LexErrorKind,
    /// A human-readable description of the error.
    pub message: String,
    /// The source location where the error occurred.
    pub span: Span,
    /// The buffer the span indexes into.
    pub source: SourceId,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// A lexical analyzer that tokenizes alps source code.
///
/// The `Lexer` maintains its position within the input and tracks
/// line/column numbers for error reporting. It is designed to be used
/// once per source file.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties the lexer to the input string slice,
/// which should be the buffer registered in the compile's
/// [`SourceMap`](crate::source::SourceMap) under the same [`SourceId`].
pub struct Lexer<'a> {
    /// The input source code being tokenized.
    input: &'a str,
    /// The buffer id stamped on every produced token.
    source: SourceId,
    /// Lexing options (special set, string handling).
    options: LexOptions,
    /// Current byte position in the input.
    pos: usize,
    /// Current line number (1-indexed).
    line: usize,
    /// Current column number (1-indexed).
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` with default options.
    ///
    /// # Arguments
    ///
    /// * `input` - The source text to tokenize
    /// * `source` - The id of the buffer `input` was read from
    pub fn new(input: &'a str, source: SourceId) -> Self {
        Lexer::with_options(input, source, LexOptions::default())
    }

    /// Creates a new `Lexer` with explicit options.
    pub fn with_options(input: &'a str, source: SourceId, options: LexOptions) -> Self {
        Lexer {
            input,
            source,
            options,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input and returns a vector of tokens.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Token>)` - The tokens in source order
    /// * `Err(LexError)` - If a malformed number or unterminated string
    ///   is encountered
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A numeric lexeme contains two decimal points
    /// - A string literal is not terminated before the end of input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_eof() {
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the current character without consuming it.
    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns `true` if the end of input has been reached.
    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns `true` if `c` is one of the configured special characters.
    fn is_special(&self, c: char) -> bool {
        self.options.specials.contains(c)
    }

    /// Returns `true` if `c` opens a string literal under current options.
    fn is_quote(&self, c: char) -> bool {
        self.options.enable_strings && (c == '"' || c == '\'')
    }

    /// Advances the lexer by one character.
    ///
    /// Updates the position, line, and column tracking. Handles multi-byte
    /// UTF-8 characters correctly and increments the line counter on
    /// newlines.
    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips whitespace and comments in a loop.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();
            if !self.skip_comment() {
                break;
            }
        }
    }

    /// Skips consecutive whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skips a `//` line comment if one starts at the current position.
    ///
    /// # Returns
    ///
    /// `true` if a comment was skipped, `false` otherwise.
    fn skip_comment(&mut self) -> bool {
        if self.input[self.pos..].starts_with("//") {
            while let Some(c) = self.current_char() {
                if c == '\n' {
                    self.advance();
                    break;
                }
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// Reads and returns the next token from the input.
    ///
    /// Assumes whitespace and comments have already been skipped and the
    /// input is not exhausted.
    fn next_token(&mut self) -> Result<Token, LexError> {
        let start_pos = self.pos;
        let start_line = self.line;
        let start_column = self.column;

        // next_token is only called when current_char is Some
        let c = match self.current_char() {
            Some(c) => c,
            None => {
                let span = Span::new(start_pos, start_pos, start_line, start_column);
                return Ok(Token::new(TokenKind::None, span, self.source));
            }
        };

        if self.is_quote(c) {
            return self.read_string(c, start_pos, start_line, start_column);
        }

        if self.is_special(c) {
            self.advance();
            let span = Span::new(start_pos, self.pos, start_line, start_column);
            return Ok(Token::new(special_kind(c), span, self.source));
        }

        self.read_word(start_pos, start_line, start_column)
    }

    /// Reads a string literal delimited by `quote`.
    ///
    /// The token's span includes both quote characters; consumers strip
    /// them. A string opened with `"` closes only with `"`, and likewise
    /// for `'`. Newlines inside a string are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`LexErrorKind::UnterminatedString`] if the input ends
    /// before the closing quote.
    fn read_string(
        &mut self,
        quote: char,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        self.advance(); // skip opening quote

        loop {
            match self.current_char() {
                Some(c) if c == quote => {
                    self.advance(); // skip closing quote
                    let span = Span::new(start_pos, self.pos, start_line, start_column);
                    return Ok(Token::new(TokenKind::Str, span, self.source));
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        message: "Unterminated string literal".to_string(),
                        span: Span::new(start_pos, self.pos, start_line, start_column),
                        source: self.source,
                    });
                }
            }
        }
    }

    /// Reads a word: a maximal run not broken by whitespace or specials.
    ///
    /// A decimal point, although special, extends the word while the word
    /// is numeric so far; this is what makes `1.5` a single lexeme.
    fn read_word(
        &mut self,
        start_pos: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                break;
            }
            if c == '.' && self.word_is_numeric(start_pos) {
                self.advance();
                continue;
            }
            if self.is_special(c) || self.is_quote(c) {
                break;
            }
            self.advance();
        }

        let text = &self.input[start_pos..self.pos];
        let span = Span::new(start_pos, self.pos, start_line, start_column);
        let kind = classify_word(text).map_err(|(kind, message)| LexError {
            kind,
            message,
            span,
            source: self.source,
        })?;
        Ok(Token::new(kind, span, self.source))
    }

    /// Returns `true` if the in-progress word consists of digits and
    /// decimal points and starts with a digit.
    fn word_is_numeric(&self, start_pos: usize) -> bool {
        let word = &self.input[start_pos..self.pos];
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_ascii_digit() => {
                chars.all(|c| c.is_ascii_digit() || c == '.')
            }
            _ => false,
        }
    }
}

/// Maps a special character to its token kind.
///
/// Only called for characters in the special set; an unexpected character
/// degrades to [`TokenKind::None`] rather than panicking.
fn special_kind(c: char) -> TokenKind {
    match c {
        ';' => TokenKind::Semicolon,
        ':' => TokenKind::Colon,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Period,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '=' => TokenKind::Equals,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        _ => TokenKind::None,
    }
}

/// Classifies a completed word.
///
/// Applies the rules in order: number (two decimal points is an error),
/// reserved word, type word, identifier (leading alphabetic), `NONE`.
fn classify_word(text: &str) -> Result<TokenKind, (LexErrorKind, String)> {
    let mut dots = 0;
    let mut numeric = !text.is_empty();
    for c in text.chars() {
        if c == '.' {
            dots += 1;
        } else if !c.is_ascii_digit() {
            numeric = false;
            break;
        }
    }

    if numeric && text.chars().any(|c| c.is_ascii_digit()) {
        if dots > 1 {
            return Err((
                LexErrorKind::InvalidNumber,
                format!("Invalid number format '{}'", text),
            ));
        }
        return Ok(TokenKind::Number);
    }

    if KEYWORDS.contains(&text) {
        return Ok(TokenKind::Keyword);
    }
    if TYPES.contains(&text) {
        return Ok(TokenKind::Type);
    }

    match text.chars().next() {
        Some(first) if first.is_alphabetic() => Ok(TokenKind::Identifier),
        _ => Ok(TokenKind::None),
    }
}
