//! Expression lowering.
//!
//! Expressions evaluate into a destination register, with `X8` as the
//! accumulator for binary-operator chains. Evaluation is left-to-right at
//! any depth: the left side is materialized into `X8` first, then each
//! right operand is folded onto it. A compound right operand spills the
//! accumulator with pre-indexed stores around its own evaluation, the same
//! discipline used around calls, so non-commutative operators always see
//! their operands in written order.

use std::io::Write;

use super::Emitter;
use super::error::{EmitError, EmitErrorKind};
use super::frame::Frame;
use crate::ast::{Expr, FuncCall, Variable};
use crate::token::{Token, TokenKind};

/// The number of argument registers (`X0..X12`).
pub(super) const MAX_CALL_ARGS: usize = 13;

/// A general-purpose register operand, `X0` through `X12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Reg(pub(super) u8);

impl Reg {
    /// The return-value and first-argument register.
    pub(super) const X0: Reg = Reg(0);
    /// The expression accumulator.
    pub(super) const X8: Reg = Reg(8);
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "X{}", self.0)
    }
}

/// Returns the mnemonic for an arithmetic operator token.
fn mnemonic(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Plus => "add",
        TokenKind::Minus => "sub",
        TokenKind::Star => "mul",
        TokenKind::Slash => "udiv",
        _ => "add",
    }
}

impl<W: Write> Emitter<'_, W> {
    /// Lowers an expression into `dest`.
    pub(super) fn emit_expr(
        &mut self,
        expr: &Expr,
        dest: Reg,
        mut frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        match expr {
            Expr::Literal(token) if token.kind == TokenKind::Str => {
                let index = self.intern_string(*token);
                self.load_string(dest, index)
            }
            Expr::Literal(token) => {
                let value = self.number_value(token)?;
                writeln!(self.out, "\tmov {}, #{}", dest, value)?;
                Ok(())
            }
            Expr::Variable(variable) => self.load_variable(variable, dest),
            Expr::Binary { op, left, right } => {
                self.emit_binop(*op, left, right, frame)?;
                if dest != Reg::X8 {
                    writeln!(self.out, "\tmov {}, X8", dest)?;
                }
                Ok(())
            }
            Expr::Call(call) => {
                self.emit_func_call(call, frame.as_deref_mut())?;
                writeln!(self.out, "\tmov {}, X0", dest)?;
                Ok(())
            }
            Expr::Unary { op, .. } => Err(unsupported_unary(op)),
        }
    }

    /// Lowers a variable read into `dest`.
    ///
    /// A variable bound to a string literal materializes the label; any
    /// other variable loads from its stack slot.
    fn load_variable(&mut self, variable: &Variable, dest: Reg) -> Result<(), EmitError> {
        let index = self.lookup(&variable.name)?;
        if let Some(string_index) = self.vars[index].string_literal {
            self.load_string(dest, string_index)
        } else {
            let offset = self.vars[index].stack_offset;
            writeln!(self.out, "\tldr {}, [SP, #{}]", dest, offset)?;
            Ok(())
        }
    }

    /// Materializes an interned string literal's address into `dest`.
    fn load_string(&mut self, dest: Reg, index: usize) -> Result<(), EmitError> {
        let label = self.strings[index].label.clone();
        writeln!(self.out, "\tadrp {}, .L.{}@PAGE", dest, label)?;
        writeln!(self.out, "\tadd {}, {}, .L.{}@PAGEOFF", dest, dest, label)?;
        Ok(())
    }

    /// Lowers a call: arguments into `X0..`, then `bl`.
    ///
    /// Built-in intrinsics are intercepted first and emit no instructions.
    pub(super) fn emit_func_call(
        &mut self,
        call: &FuncCall,
        mut frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        if self.run_intrinsic(call)? {
            return Ok(());
        }

        if call.args.len() > MAX_CALL_ARGS {
            let map = self.map;
            return Err(EmitError::at(
                EmitErrorKind::TooManyArguments,
                format!(
                    "Call to '{}' has {} arguments; at most {} are supported",
                    map.token_text(&call.callee.name),
                    call.args.len(),
                    MAX_CALL_ARGS
                ),
                &call.callee.name,
            ));
        }

        for (index, arg) in call.args.iter().enumerate() {
            self.emit_expr(arg, Reg(index as u8), frame.as_deref_mut())?;
        }
        // the branch target must agree with the label the definition gets
        let target = self.function_label(&call.callee.name);
        writeln!(self.out, "\tbl {}", target)?;
        Ok(())
    }

    /// Lowers a binary-operator tree into `X8`.
    ///
    /// A tree built entirely from number literals constant-folds to a
    /// single `mov`. Otherwise the left side is evaluated first and the
    /// right operand is folded onto the accumulator.
    pub(super) fn emit_binop(
        &mut self,
        op: Token,
        left: &Expr,
        right: &Expr,
        mut frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        if let (Some(x), Some(y)) = (self.try_fold(left)?, self.try_fold(right)?) {
            let value = self.apply_operator(op, x, y)?;
            writeln!(self.out, "\tmov X8, #{}", value)?;
            return Ok(());
        }

        self.emit_initial(left, frame.as_deref_mut())?;
        self.fold_operand(right, op, frame)
    }

    /// First step of a binary chain: materialize `side` into `X8`.
    fn emit_initial(&mut self, side: &Expr, frame: Option<&mut Frame>) -> Result<(), EmitError> {
        match side {
            Expr::Binary { op, left, right } => self.emit_binop(*op, left, right, frame),
            Expr::Variable(variable) => {
                let index = self.lookup(&variable.name)?;
                if self.vars[index].string_literal.is_some() {
                    return Err(self.string_operand_error(&variable.name));
                }
                let offset = self.vars[index].stack_offset;
                writeln!(self.out, "\tldr X9, [SP, #{}]", offset)?;
                writeln!(self.out, "\tmov X8, X9")?;
                Ok(())
            }
            Expr::Literal(token) if token.kind == TokenKind::Str => {
                Err(self.string_operand_error(token))
            }
            Expr::Literal(token) => {
                let value = self.number_value(token)?;
                writeln!(self.out, "\tmov X8, #{}", value)?;
                Ok(())
            }
            Expr::Call(call) => {
                writeln!(self.out, "\tstr X8, [SP, -16]!")?;
                self.emit_func_call(call, frame)?;
                writeln!(self.out, "\tldr X8, [SP], 16")?;
                writeln!(self.out, "\tmov X8, X0")?;
                Ok(())
            }
            Expr::Unary { op, .. } => Err(unsupported_unary(op)),
        }
    }

    /// Folds an operand onto the `X8` accumulator with `op`.
    fn fold_operand(
        &mut self,
        operand: &Expr,
        op: Token,
        mut frame: Option<&mut Frame>,
    ) -> Result<(), EmitError> {
        let instr = mnemonic(op.kind);
        match operand {
            Expr::Binary {
                op: inner_op,
                left,
                right,
            } => {
                // compound right side: spill the accumulator around it
                writeln!(self.out, "\tstr X8, [SP, -16]!")?;
                self.emit_binop(*inner_op, left, right, frame.as_deref_mut())?;
                writeln!(self.out, "\tmov X9, X8")?;
                writeln!(self.out, "\tldr X8, [SP], 16")?;
                writeln!(self.out, "\t{} X8, X8, X9", instr)?;
                Ok(())
            }
            Expr::Variable(variable) => {
                let index = self.lookup(&variable.name)?;
                if self.vars[index].string_literal.is_some() {
                    return Err(self.string_operand_error(&variable.name));
                }
                let offset = self.vars[index].stack_offset;
                writeln!(self.out, "\tldr X9, [SP, #{}]", offset)?;
                writeln!(self.out, "\t{} X8, X8, X9", instr)?;
                Ok(())
            }
            Expr::Literal(token) if token.kind == TokenKind::Str => {
                Err(self.string_operand_error(token))
            }
            Expr::Literal(token) => {
                let value = self.number_value(token)?;
                // mul and udiv cannot take an immediate operand
                if matches!(op.kind, TokenKind::Star | TokenKind::Slash) {
                    writeln!(self.out, "\tmov X10, #{}", value)?;
                    writeln!(self.out, "\t{} X8, X8, X10", instr)?;
                } else {
                    writeln!(self.out, "\t{} X8, X8, #{}", instr, value)?;
                }
                Ok(())
            }
            Expr::Call(call) => {
                writeln!(self.out, "\tstr X8, [SP, -16]!")?;
                self.emit_func_call(call, frame)?;
                writeln!(self.out, "\tldr X8, [SP], 16")?;
                writeln!(self.out, "\t{} X8, X8, X0", instr)?;
                Ok(())
            }
            Expr::Unary { op: unary_op, .. } => Err(unsupported_unary(unary_op)),
        }
    }

    /// Evaluates an expression at compile time, if it is made purely of
    /// number literals and arithmetic operators.
    fn try_fold(&self, expr: &Expr) -> Result<Option<i64>, EmitError> {
        match expr {
            Expr::Literal(token) if token.kind == TokenKind::Number => {
                Ok(Some(self.number_value(token)?))
            }
            Expr::Binary { op, left, right } => {
                let Some(x) = self.try_fold(left)? else {
                    return Ok(None);
                };
                let Some(y) = self.try_fold(right)? else {
                    return Ok(None);
                };
                Ok(Some(self.apply_operator(*op, x, y)?))
            }
            _ => Ok(None),
        }
    }

    /// Applies an arithmetic operator to two folded constants.
    fn apply_operator(&self, op: Token, x: i64, y: i64) -> Result<i64, EmitError> {
        match op.kind {
            TokenKind::Plus => Ok(x.wrapping_add(y)),
            TokenKind::Minus => Ok(x.wrapping_sub(y)),
            TokenKind::Star => Ok(x.wrapping_mul(y)),
            TokenKind::Slash => {
                if y == 0 {
                    return Err(EmitError::at(
                        EmitErrorKind::InvalidOperand,
                        "Division by zero in constant expression",
                        &op,
                    ));
                }
                Ok(x.wrapping_div(y))
            }
            _ => Err(EmitError::at(
                EmitErrorKind::InvalidOperand,
                format!("'{}' is not an arithmetic operator", op.kind),
                &op,
            )),
        }
    }

    fn string_operand_error(&self, token: &Token) -> EmitError {
        EmitError::at(
            EmitErrorKind::InvalidOperand,
            format!(
                "String value '{}' cannot be used in arithmetic",
                self.map.token_text(token)
            ),
            token,
        )
    }
}

fn unsupported_unary(op: &Token) -> EmitError {
    EmitError::at(
        EmitErrorKind::UnsupportedExpr,
        "Unary operators are not supported yet",
        op,
    )
}
