//! AArch64 assembly emission for the alps programming language.
//!
//! This module provides the [`Emitter`] struct which walks an AST and
//! writes AArch64 assembly text, Apple directive style, to an
//! [`io::Write`] sink.
//!
//! # Overview
//!
//! Output has two sections: `.text` (with `.globl _main` and `.align 2`)
//! holding the code produced by walking the program block, then, when any
//! string literals were encountered, a `.data` section with one
//! `.L.StrN: .asciz "..."` line per literal in the order they were first
//! seen.
//!
//! # Target ABI (AArch64/Darwin, summarized)
//!
//! - Arguments pass in `X0..X12`; the return value comes back in `X0`
//! - `X8` is the expression accumulator; `X9` and `X10` are scratch
//! - A function prologue saves `FP`/`LR` with `stp FP, LR, [SP, -64]!`
//!   and reserves its frame with `sub SP, SP, #sp_size`; the epilogue
//!   mirrors it and `ret`s
//! - `sp_size` covers 8 bytes per local and per parameter, rounded up to
//!   a 16-byte multiple with a 16-byte minimum
//!
//! # Example
//!
//! ```
//! use alps::emit::Emitter;
//! use alps::lexer::Lexer;
//! use alps::parser::Parser;
//! use alps::source::SourceMap;
//!
//! let mut map = SourceMap::new();
//! let id = map.add("demo.alps", "fn main() int { return 2 + 3; }");
//! let tokens = Lexer::new(map.text(id), id).tokenize().unwrap();
//! let program = Parser::new(tokens, id, &mut map).parse().unwrap();
//!
//! let mut out = Vec::new();
//! Emitter::new(&map, &mut out).emit_program(&program).unwrap();
//!
//! let asm = String::from_utf8(out).unwrap();
//! assert!(asm.contains("_main:"));
//! assert!(asm.contains("mov X8, #5"));
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Emission error types
//! - `frame` - Per-function stack frames and size computation
//! - `symtab` - Symbol table and string-literal table
//! - `expr` - Expression lowering and binary-operator folding
//! - `builtins` - Compile-time intrinsics (`del`)
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::ast`] - The AST types consumed by this module
//! * [`crate::parser`] - Produces the AST

mod builtins;
mod error;
mod expr;
mod frame;
mod symtab;


pub use error::{EmitError, EmitErrorKind};

use std::io::Write;

use self::expr::Reg;
use self::frame::{Frame, SLOT_SIZE, frame_size, storage_size};
use self::symtab::{StringLiteral, VarRecord};
use crate::ast::{Block, Expr, FuncDeclare, Stmt, Variable};
use crate::source::SourceMap;
use crate::token::{Token, TokenKind};

/// AArch64 assembly emitter for alps programs.
///
/// `Emitter` holds the output sink plus the tables threaded through the
/// emit walk: the symbol table, the string-literal table, and the current
/// scope depth. One emitter translates one program.
///
/// # Lifetime
///
/// The `'a` lifetime ties the emitter to the compile's [`SourceMap`],
/// which must outlive emission because tokens resolve their text through
/// it.
pub struct Emitter<'a, W: Write> {
    /// The compile's source buffers, for token text.
    map: &'a SourceMap,
    /// The assembly text sink.
    out: W,
    /// Live variable records, oldest first.
    vars: Vec<VarRecord>,
    /// Interned string literals, in insertion order.
    strings: Vec<StringLiteral>,
    /// Current scope depth; 0 outside any function.
    scope: usize,
}

impl<'a, W: Write> Emitter<'a, W> {
    /// Creates a new emitter writing to `out`.
    pub fn new(map: &'a SourceMap, out: W) -> Self {
        Emitter {
            map,
            out,
            vars: Vec::new(),
            strings: Vec::new(),
            scope: 0,
        }
    }

    /// Emits the whole program: section header, code, data epilogue.
    ///
    /// # Errors
    ///
    /// Returns an error for undeclared variables, misplaced statements,
    /// unsupported expression forms, bad intrinsic arguments, or a failing
    /// output sink. Emission stops at the first error and the output is
    /// then incomplete.
    pub fn emit_program(&mut self, program: &Block) -> Result<(), EmitError> {
        writeln!(self.out, ".text")?;
        writeln!(self.out, ".globl _main")?;
        writeln!(self.out, ".align 2")?;
        self.emit_block(program, None)?;
        self.emit_data_section()?;
        Ok(())
    }

    /// Emits a block's statements, then drops every variable declared at
    /// the current scope depth or deeper.
    fn emit_block(&mut self, block: &Block, mut frame: Option<&mut Frame>) -> Result<(), EmitError> {
        for statement in &block.statements {
            self.emit_statement(statement, frame.as_deref_mut())?;
        }
        self.purge_scope(self.scope);
        Ok(())
    }

    /// Emits a single statement.
    fn emit_statement(
        &mut self,
        statement: &Stmt,
        frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        match statement {
            Stmt::Block(block) => {
                self.scope += 1;
                self.emit_block(block, frame)?;
                self.scope -= 1;
                Ok(())
            }
            Stmt::Declare(declare) => match frame {
                Some(frame) => {
                    // slot allocation only; no instructions
                    self.declare_variable(declare, frame);
                    Ok(())
                }
                None => Err(EmitError::at(
                    EmitErrorKind::OutsideFunction,
                    format!(
                        "Declaration of '{}' outside of a function",
                        self.map.token_text(&declare.variable.name)
                    ),
                    &declare.variable.name,
                )),
            },
            Stmt::Assign { target, value, .. } => self.emit_assign(target, value, frame),
            Stmt::Call(call) => self.emit_func_call(call, frame),
            Stmt::Return { keyword, value } => match frame {
                Some(frame) => {
                    self.emit_expr(value, Reg::X0, Some(&mut *frame))?;
                    self.emit_func_end(frame)
                }
                None => Err(EmitError::at(
                    EmitErrorKind::OutsideFunction,
                    "'return' outside of a function",
                    keyword,
                )),
            },
            Stmt::FuncDeclare(fdecl) => self.emit_func_declare(fdecl),
        }
    }

    /// Emits an assignment: evaluate into `X8`, store to the target slot.
    ///
    /// When the right-hand side is a string literal the target record is
    /// bound to the interned entry, so later reads of the variable
    /// materialize the label.
    fn emit_assign(
        &mut self,
        target: &Variable,
        value: &Expr,
        frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        let index = self.lookup(&target.name)?;
        self.emit_expr(value, Reg::X8, frame)?;

        if let Expr::Literal(token) = value {
            if token.kind == TokenKind::Str {
                // emit_expr interned the literal as the newest entry
                self.vars[index].string_literal = Some(self.strings.len() - 1);
            }
        }

        let offset = self.vars[index].stack_offset;
        writeln!(self.out, "\tstr X8, [SP, #{}]", offset)?;
        Ok(())
    }

    /// Emits a function declaration: label, prologue, parameter spills,
    /// body.
    ///
    /// The epilogue is emitted by the body's `return` statement; the
    /// parser guarantees a body contains one.
    fn emit_func_declare(&mut self, fdecl: &FuncDeclare) -> Result<(), EmitError> {
        let name = fdecl.name();
        let label = self.function_label(&name);
        writeln!(self.out, "{}:", label)?;

        if fdecl.params.len() > expr::MAX_CALL_ARGS {
            return Err(EmitError::at(
                EmitErrorKind::TooManyArguments,
                format!(
                    "Function '{}' has {} parameters; at most {} are supported",
                    self.map.token_text(&name),
                    fdecl.params.len(),
                    expr::MAX_CALL_ARGS
                ),
                &name,
            ));
        }

        let storage = fdecl.body.as_ref().map(storage_size).unwrap_or(0);
        let args_size = fdecl.params.len() as i64 * SLOT_SIZE;
        let sp_size = frame_size(storage + args_size);
        let mut frame = Frame::new(sp_size);

        self.scope += 1;
        writeln!(self.out, "\tstp FP, LR, [SP, -64]!")?;
        writeln!(self.out, "\tsub SP, SP, #{}", sp_size)?;

        // persist incoming arguments into their slots
        for (index, param) in fdecl.params.iter().enumerate() {
            let offset = self.declare_variable(param, &mut frame);
            writeln!(self.out, "\tstr {}, [SP, #{}]", Reg(index as u8), offset)?;
        }

        if let Some(body) = &fdecl.body {
            self.emit_block(body, Some(&mut frame))?;
        }
        self.scope -= 1;
        Ok(())
    }

    /// Emits a function epilogue: release the frame, restore `FP`/`LR`,
    /// return.
    fn emit_func_end(&mut self, frame: &Frame) -> Result<(), EmitError> {
        writeln!(self.out, "\tadd SP, SP, #{}", frame.sp_size)?;
        writeln!(self.out, "\tldp FP, LR, [SP], 64")?;
        writeln!(self.out, "\tret")?;
        Ok(())
    }

    /// Returns the label for a function name.
    ///
    /// `main` becomes `_main` to match the exported `.globl _main`; every
    /// other function keeps its source name. Definitions and `bl` targets
    /// both use this, so calls always agree with the emitted label.
    fn function_label(&self, name: &Token) -> String {
        let text = self.map.token_text(name);
        if text == "main" {
            "_main".to_string()
        } else {
            text.to_string()
        }
    }

    /// Emits the `.data` section for interned string literals, if any.
    fn emit_data_section(&mut self) -> Result<(), EmitError> {
        if self.strings.is_empty() {
            return Ok(());
        }
        writeln!(self.out, ".data")?;
        for index in 0..self.strings.len() {
            let token = self.strings[index].token;
            let content = strip_quotes(self.map.token_text(&token)).to_string();
            writeln!(
                self.out,
                ".L.{}: .asciz \"{}\"",
                self.strings[index].label, content
            )?;
        }
        Ok(())
    }

    /// Converts a number token to its value.
    ///
    /// Takes the integer part (everything before a decimal point), so a
    /// fractional literal truncates.
    pub(crate) fn number_value(&self, token: &Token) -> Result<i64, EmitError> {
        let text = self.map.token_text(token);
        let integer_part = match text.find('.') {
            Some(dot) => &text[..dot],
            None => text,
        };
        integer_part.parse::<i64>().map_err(|_| {
            EmitError::at(
                EmitErrorKind::InvalidNumber,
                format!("Invalid numeric literal '{}'", text),
                token,
            )
        })
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
