//! The emitter's symbol table and string-literal table.
//!
//! Both tables are plain growable vectors owned by the
//! [`Emitter`](super::Emitter). Variable lookup compares full token text
//! (never a prefix), newest record first, so inner declarations shadow
//! outer ones and `foo` can never resolve to `foobar`.

use std::io::Write;

use super::Emitter;
use super::error::{EmitError, EmitErrorKind};
use super::frame::Frame;
use crate::ast::Declare;
use crate::token::Token;

/// One declared variable.
pub(super) struct VarRecord {
    /// The identifier token that declared the variable.
    pub(super) name: Token,
    /// The variable's slot, relative to the function's `SP`.
    pub(super) stack_offset: i64,
    /// The scope depth the variable was declared at.
    pub(super) scope: usize,
    /// Index into the string table when the variable was last assigned a
    /// string literal; reads then materialize the label instead of the
    /// stack slot.
    pub(super) string_literal: Option<usize>,
}

/// One interned string literal, in insertion order.
pub(super) struct StringLiteral {
    /// The source token, quotes included.
    pub(super) token: Token,
    /// The generated label, `Str1` onward.
    pub(super) label: String,
}

impl<W: Write> Emitter<'_, W> {
    /// Finds the record index for `name`, newest record first.
    ///
    /// # Errors
    ///
    /// Returns [`EmitErrorKind::UndeclaredVariable`] when no record
    /// matches.
    pub(super) fn lookup(&self, name: &Token) -> Result<usize, EmitError> {
        let text = self.map.token_text(name);
        for (index, record) in self.vars.iter().enumerate().rev() {
            if self.map.token_text(&record.name) == text {
                return Ok(index);
            }
        }
        Err(EmitError::at(
            EmitErrorKind::UndeclaredVariable,
            format!("using undeclared variable '{}'", text),
            name,
        ))
    }

    /// Inserts a record for `declare`, allocating its stack slot from
    /// `frame`. Returns the slot offset.
    pub(super) fn declare_variable(&mut self, declare: &Declare, frame: &mut Frame) -> i64 {
        let offset = frame.allocate_slot();
        self.vars.push(VarRecord {
            name: declare.variable.name,
            stack_offset: offset,
            scope: self.scope,
            string_literal: None,
        });
        offset
    }

    /// Removes every record declared at `scope` or deeper.
    pub(super) fn purge_scope(&mut self, scope: usize) {
        self.vars.retain(|record| record.scope < scope);
    }

    /// Appends a string literal and returns its table index.
    ///
    /// Labels are dense and 1-based in insertion order; every literal
    /// occurrence gets a fresh entry.
    pub(super) fn intern_string(&mut self, token: Token) -> usize {
        let label = format!("Str{}", self.strings.len() + 1);
        self.strings.push(StringLiteral { token, label });
        self.strings.len() - 1
    }
}
