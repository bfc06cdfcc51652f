use crate::assembler::{Assembler, Label, Step};
use crate::error::AsmError;
use crate::symbols::Symbol;
use crate::token::{Directive, Token};

impl Assembler {
    pub(crate) fn directive(&mut self, dir: Directive, label: Option<Label>) -> Step<()> {
        match dir {
            Directive::Db => self.data(1),
            Directive::Dw => self.data(2),
            Directive::Dd => self.data(4),
            Directive::Ds => self.strings(),
            Directive::Equ => self.equ(label),
            Directive::Extern => self.externs(),
            Directive::Global => self.globals(),
        }
    }

    /// After a list item: `true` on `,`, `false` at the end of the line.
    fn list_continues(&mut self) -> Step<bool> {
        match self.lexer.next_token() {
            Token::Comma => Ok(true),
            Token::NewLine | Token::Eof => Ok(false),
            tok => Err(self.unexpected("`,` or end of line", tok)),
        }
    }

    fn name(&mut self) -> Step<String> {
        match self.lexer.next_token() {
            Token::Ident(name) => Ok(name),
            tok => Err(self.unexpected("symbol name", tok)),
        }
    }
}

// ----------------------------------------------------------------------------
// Data: db / dw / dd / ds
// ----------------------------------------------------------------------------

impl Assembler {
    fn data(&mut self, size: usize) -> Step<()> {
        loop {
            let value = self.expression()?;
            let location = self.seg.lc;
            self.seg
                .relocs
                .maybe_add(value.symbol.as_deref(), location, size);
            self.seg.emit_value(value.value, size)?;
            if !self.list_continues()? {
                return Ok(());
            }
        }
    }

    fn strings(&mut self) -> Step<()> {
        loop {
            match self.lexer.next_token() {
                Token::Str(text) => {
                    for byte in text.bytes() {
                        self.seg.emit(byte)?;
                    }
                }
                tok => return Err(self.unexpected("string", tok)),
            }
            if !self.list_continues()? {
                return Ok(());
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Symbols: equ / extern / global
// ----------------------------------------------------------------------------

impl Assembler {
    fn equ(&mut self, label: Option<Label>) -> Step<()> {
        let value = self.expression()?;
        self.end_of_line()?;

        let Some(label) = label else {
            self.warn(AsmError::EquWithoutLabel);
            return Ok(());
        };
        let number = match value.symbol {
            Some(_) => {
                self.error_at(AsmError::ExternEqu(label.name.clone()), label.line, label.col);
                0
            }
            None => value.value,
        };
        self.define(&label, number, value.resolved);
        Ok(())
    }

    fn externs(&mut self) -> Step<()> {
        loop {
            let name = self.name()?;
            if !self.defined.insert(name.clone()) {
                self.warn(AsmError::ExternRedefined(name.clone()));
            }
            self.seg.symbols.register(&name, Symbol::Extern);
            if !self.list_continues()? {
                return Ok(());
            }
        }
    }

    fn globals(&mut self) -> Step<()> {
        loop {
            let name = self.name()?;
            match self.seg.symbols.get_mut(&name) {
                Some(Symbol::Local { global, .. }) => *global = true,
                Some(Symbol::Extern) => self.error(AsmError::GlobalExtern(name)),
                // Defined further down; checked again on the next pass.
                None if self.pass == 1 => {}
                None => self.error(AsmError::GlobalUndefined(name)),
            }
            if !self.list_continues()? {
                return Ok(());
            }
        }
    }
}
