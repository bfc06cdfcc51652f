use arch65::{opcode, AddrMode, Mnemonic};

use crate::addrmode::Operand;
use crate::assembler::{Assembler, Step};
use crate::error::AsmError;
use crate::expr::ExprValue;

impl Assembler {
    /// Assemble one instruction whose mnemonic has just been read.
    pub(crate) fn instruction(&mut self, op: Mnemonic) -> Step<()> {
        let (line, col) = self.lexer.pos();
        let Operand { mode, value } = self.operand()?;

        let mode = if op.is_branch() {
            if mode != AddrMode::Absolute {
                self.error_at(AsmError::IllegalMode(op, mode), line, col);
                return Ok(());
            }
            if let Some(name) = &value.symbol {
                self.error_at(AsmError::ExternBranch(name.clone()), line, col);
                return Ok(());
            }
            AddrMode::Relative
        } else {
            narrow(op, mode, &value)
        };

        let Some(code) = opcode(op, mode) else {
            self.error_at(AsmError::IllegalMode(op, mode), line, col);
            return Ok(());
        };
        self.seg.emit(code)?;

        if mode == AddrMode::Relative {
            return self.displacement(&value, line, col);
        }
        let size = mode.operand_size();
        if size > 0 {
            let location = self.seg.lc;
            self.seg
                .relocs
                .maybe_add(value.symbol.as_deref(), location, size);
            self.seg.emit_value(value.value, size)?;
        }
        Ok(())
    }

    /// Signed offset from the end of the branch to its target.
    fn displacement(&mut self, target: &ExprValue, line: usize, col: usize) -> Step<()> {
        let disp = target.value.wrapping_sub(self.seg.lc as i64 + 1);
        let byte = match i8::try_from(disp) {
            Ok(byte) => byte,
            Err(_) => {
                // Unresolved targets are still placeholders on pass one.
                if target.resolved {
                    self.error_at(AsmError::BranchOutOfRange(disp), line, col);
                }
                0
            }
        };
        self.seg.emit(byte as u8)?;
        Ok(())
    }
}

/// Zero page form of an absolute operand whose value fits in one byte.
///
/// Values tied to an external symbol keep their full width, and so do
/// instructions without the zero page form (`jmp $10`, `lda $10,y`).
fn narrow(op: Mnemonic, mode: AddrMode, value: &ExprValue) -> AddrMode {
    match mode.zero_page() {
        Some(zp)
            if value.symbol.is_none()
                && value.resolved
                && (0..0x100).contains(&value.value)
                && opcode(op, zp).is_some() =>
        {
            zp
        }
        _ => mode,
    }
}
