use arch65::{AddrMode, Reg};

use crate::assembler::{Assembler, Step};
use crate::expr::ExprValue;
use crate::token::Token;

/// Syntactic addressing mode of an instruction operand and its value.
///
/// Only the shape of the operand is looked at here. Zero page and relative
/// forms are picked by the encoder once the value is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub mode: AddrMode,
    pub value: ExprValue,
}

impl Operand {
    fn new(mode: AddrMode, value: ExprValue) -> Self {
        Operand { mode, value }
    }
}

impl Assembler {
    /// Parse the operand after an opcode, through the end of the line.
    pub(crate) fn operand(&mut self) -> Step<Operand> {
        let operand = match self.lexer.next_token() {
            Token::NewLine | Token::Eof => {
                return Ok(Operand::new(AddrMode::Implicit, ExprValue::constant(0)))
            }
            Token::Register(Reg::A) => Operand::new(AddrMode::Accumulator, ExprValue::constant(0)),
            Token::Hash => Operand::new(AddrMode::Immediate, self.expression()?),
            Token::LParen => self.indirect()?,
            tok => {
                self.lexer.push_back(tok);
                self.absolute()?
            }
        };
        self.end_of_line()?;
        Ok(operand)
    }

    /// `(expr)`, `(expr,X)` or `(expr),Y`; the `(` is already read.
    fn indirect(&mut self) -> Step<Operand> {
        let value = self.expression()?;
        match self.lexer.next_token() {
            Token::Comma => {
                self.expect(Token::Register(Reg::X), "`X`")?;
                self.expect(Token::RParen, "`)`")?;
                Ok(Operand::new(AddrMode::IndexedIndirect, value))
            }
            Token::RParen => match self.lexer.next_token() {
                Token::Comma => {
                    self.expect(Token::Register(Reg::Y), "`Y`")?;
                    Ok(Operand::new(AddrMode::IndirectIndexed, value))
                }
                tok => {
                    self.lexer.push_back(tok);
                    Ok(Operand::new(AddrMode::Indirect, value))
                }
            },
            tok => Err(self.unexpected("`,` or `)`", tok)),
        }
    }

    /// `expr`, `expr,X` or `expr,Y`.
    fn absolute(&mut self) -> Step<Operand> {
        let value = self.expression()?;
        match self.lexer.next_token() {
            Token::Comma => match self.lexer.next_token() {
                Token::Register(Reg::X) => Ok(Operand::new(AddrMode::AbsoluteX, value)),
                Token::Register(Reg::Y) => Ok(Operand::new(AddrMode::AbsoluteY, value)),
                tok => Err(self.unexpected("`X` or `Y`", tok)),
            },
            tok => {
                self.lexer.push_back(tok);
                Ok(Operand::new(AddrMode::Absolute, value))
            }
        }
    }
}
