use crate::assembler::{Assembler, Step};
use crate::error::AsmError;
use crate::symbols::Symbol;
use crate::token::Token;

/// Value of an operand expression.
///
/// With `symbol` set the value is an offset from that external symbol and
/// the bytes it lands in need a relocation. `resolved` is false when a name
/// that is not defined (yet) went into the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExprValue {
    pub symbol: Option<String>,
    pub value: i64,
    pub resolved: bool,
}

impl ExprValue {
    pub fn constant(value: i64) -> Self {
        ExprValue {
            symbol: None,
            value,
            resolved: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Num {
    value: i64,
    resolved: bool,
}

impl Num {
    fn known(value: i64) -> Self {
        Num {
            value,
            resolved: true,
        }
    }

    fn unknown() -> Self {
        Num {
            value: 0,
            resolved: false,
        }
    }

    fn with(self, rhs: Num, f: impl FnOnce(i64, i64) -> i64) -> Num {
        Num {
            value: f(self.value, rhs.value),
            resolved: self.resolved && rhs.resolved,
        }
    }
}

// ----------------------------------------------------------------------------
// Expression
//
//   expr    := extern [('+' | '-') level1] | level1
//   level1  := level2 (('|' | '&') level2)*
//   level2  := level3 (('+' | '-') level3)*
//   level3  := primary (('*' | '/') primary)*
//   primary := int | char | '*' | name | '(' level1 ')' | ('+' | '-') primary
//
// The token after the expression is left pushed back.

impl Assembler {
    pub(crate) fn expression(&mut self) -> Step<ExprValue> {
        let tok = self.lexer.next_token();
        if let Token::Ident(name) = &tok {
            if self.seg.symbols.get(name) == Some(&Symbol::Extern) {
                let symbol = Some(name.clone());
                let next = self.lexer.next_token();
                let offset = match next {
                    // The sign is read as a unary operator on the offset.
                    Token::Plus | Token::Minus => {
                        self.lexer.push_back(next);
                        self.level1()?
                    }
                    next => {
                        self.lexer.push_back(next);
                        Num::known(0)
                    }
                };
                return Ok(ExprValue {
                    symbol,
                    value: offset.value,
                    resolved: offset.resolved,
                });
            }
        }

        self.lexer.push_back(tok);
        let num = self.level1()?;
        Ok(ExprValue {
            symbol: None,
            value: num.value,
            resolved: num.resolved,
        })
    }

    fn level1(&mut self) -> Step<Num> {
        let mut acc = self.level2()?;
        loop {
            match self.lexer.next_token() {
                Token::Pipe => acc = acc.with(self.level2()?, |a, b| a | b),
                Token::Amp => acc = acc.with(self.level2()?, |a, b| a & b),
                tok => {
                    self.lexer.push_back(tok);
                    return Ok(acc);
                }
            }
        }
    }

    fn level2(&mut self) -> Step<Num> {
        let mut acc = self.level3()?;
        loop {
            match self.lexer.next_token() {
                Token::Plus => acc = acc.with(self.level3()?, i64::wrapping_add),
                Token::Minus => acc = acc.with(self.level3()?, i64::wrapping_sub),
                tok => {
                    self.lexer.push_back(tok);
                    return Ok(acc);
                }
            }
        }
    }

    fn level3(&mut self) -> Step<Num> {
        let mut acc = self.primary()?;
        loop {
            match self.lexer.next_token() {
                Token::Star => acc = acc.with(self.primary()?, i64::wrapping_mul),
                Token::Slash => {
                    let rhs = self.primary()?;
                    if rhs.value == 0 {
                        if rhs.resolved {
                            self.error(AsmError::DivisionByZero);
                        }
                        acc = acc.with(rhs, |_, _| 0);
                    } else {
                        acc = acc.with(rhs, i64::wrapping_div);
                    }
                }
                tok => {
                    self.lexer.push_back(tok);
                    return Ok(acc);
                }
            }
        }
    }

    fn primary(&mut self) -> Step<Num> {
        match self.lexer.next_token() {
            Token::Int(n) => Ok(Num::known(n)),
            Token::Char(ch) => Ok(Num::known(i64::from(u32::from(ch)))),
            Token::Star => Ok(Num::known(self.seg.lc as i64)),
            Token::Ident(name) => Ok(self.symbol_value(name)),
            Token::LParen => {
                let num = self.level1()?;
                self.expect(Token::RParen, "`)`")?;
                Ok(num)
            }
            Token::Plus => self.primary(),
            Token::Minus => {
                let num = self.primary()?;
                Ok(Num::known(0).with(num, i64::wrapping_sub))
            }
            tok => Err(self.unexpected("expression", tok)),
        }
    }

    fn symbol_value(&mut self, name: String) -> Num {
        match self.seg.symbols.get(&name).copied() {
            Some(Symbol::Local { value, .. }) => Num {
                value,
                resolved: !self.unresolved.contains(&name),
            },
            Some(Symbol::Extern) => {
                self.error(AsmError::ExternInExpression(name));
                Num::known(0)
            }
            // Forward references are expected on pass one.
            None => {
                if self.pass > 1 {
                    self.error(AsmError::UnknownLabel(name));
                }
                Num::unknown()
            }
        }
    }
}

