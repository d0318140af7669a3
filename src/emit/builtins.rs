//! Compile-time intrinsics.
//!
//! An intrinsic is a pseudo-call recognized by name and handled entirely
//! at compile time; no `bl` is emitted. The only intrinsic is
//! `del(v1, v2, ...)`, which removes each named variable from the symbol
//! table.

use std::io::Write;

use super::Emitter;
use super::error::{EmitError, EmitErrorKind};
use crate::ast::{Expr, FuncCall};

impl<W: Write> Emitter<'_, W> {
    /// Runs the intrinsic handler for `call` if its callee names one.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The call was an intrinsic and has been handled
    /// * `Ok(false)` - Not an intrinsic; the caller emits a real call
    pub(super) fn run_intrinsic(&mut self, call: &FuncCall) -> Result<bool, EmitError> {
        let map = self.map;
        match map.token_text(&call.callee.name) {
            "del" => {
                self.intrinsic_del(call)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// `del(v1, v2, ...)`: forget each named variable.
    ///
    /// Later uses of a deleted name are undeclared-variable errors.
    ///
    /// # Errors
    ///
    /// Every argument must be a plain variable; anything else is fatal.
    fn intrinsic_del(&mut self, call: &FuncCall) -> Result<(), EmitError> {
        for arg in &call.args {
            let Expr::Variable(variable) = arg else {
                return Err(EmitError::at(
                    EmitErrorKind::InvalidBuiltinArgument,
                    "Invalid argument passed into del",
                    &call.callee.name,
                ));
            };
            let index = self.lookup(&variable.name)?;
            self.vars.remove(index);
        }
        Ok(())
    }
}
