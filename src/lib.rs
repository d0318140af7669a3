//! The alps programming language compiler library.
//!
//! This library provides the core components of the alps compiler:
//! lexical analysis, recursive descent parsing, and direct AArch64
//! assembly emission targeting the Apple/Darwin calling convention.
//!
//! # Modules
//!
//! - [`source`] - Source buffer ownership ([`source::SourceMap`])
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`parser`] - Recursive descent parser
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`emit`] - AArch64 assembly emission
//!
//! # Example
//!
//! ```
//! use alps::emit::Emitter;
//! use alps::lexer::Lexer;
//! use alps::parser::Parser;
//! use alps::source::SourceMap;
//!
//! // Source code to compile
//! let source = "fn main() int { x int = 5; return x; }";
//!
//! // The compile owns every source buffer it reads
//! let mut map = SourceMap::new();
//! let id = map.add("example.alps", source);
//!
//! // Lexical analysis
//! let tokens = Lexer::new(map.text(id), id).tokenize().expect("Lexer error");
//!
//! // Parsing
//! let program = Parser::new(tokens, id, &mut map)
//!     .parse()
//!     .expect("Parse error");
//!
//! // Assembly emission
//! let mut out = Vec::new();
//! Emitter::new(&map, &mut out)
//!     .emit_program(&program)
//!     .expect("Emit error");
//!
//! let asm = String::from_utf8(out).unwrap();
//! assert!(asm.starts_with(".text"));
//! ```

pub mod ast;
pub mod emit;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;
