use arch65::{Mnemonic, Reg};

use crate::error::AsmError;
use crate::source::Source;
use crate::token::{single_char_token, Directive, Token};

/// Tokenizer over a [`Source`] with room for one pushed-back token.
#[derive(Debug, Clone)]
pub struct Lexer {
    src: Source,
    pushed: Option<(Token, (usize, usize))>,
    pos: (usize, usize),
}

impl Lexer {
    pub fn new(src: Source) -> Self {
        Lexer {
            src,
            pushed: None,
            pos: (1, 1),
        }
    }

    /// Back to the start of the source.
    pub fn rewind(&mut self) {
        self.src.rewind();
        self.pushed = None;
        self.pos = (1, 1);
    }

    /// Line and column where the last returned token started.
    pub fn pos(&self) -> (usize, usize) {
        self.pos
    }

    /// Hand a token back; the next call to [`Lexer::next_token`] returns it.
    pub fn push_back(&mut self, tok: Token) {
        assert!(self.pushed.is_none(), "token pushed back twice");
        self.pushed = Some((tok, self.pos));
    }

    /// Throw away whatever is left of the current line.
    pub fn skip_line(&mut self) {
        self.pushed = None;
        self.src.move_to_next_line();
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl Lexer {
    fn error(&self, err: AsmError) -> Token {
        Token::Error(err, self.pos.0, self.pos.1)
    }

    /// Maximal run of ASCII letters and digits.
    fn alnum_run(&mut self) -> String {
        let mut run = String::new();
        while let Some(ch) = self.src.peek() {
            if !ch.is_ascii_alphanumeric() {
                break;
            }
            run.push(ch);
            self.src.consume();
        }
        run
    }

    fn word(&mut self, first: char) -> String {
        let mut word: String = first.to_lowercase().collect();
        while let Some(ch) = self.src.peek() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            word.extend(ch.to_lowercase());
            self.src.consume();
        }
        word
    }
}

// ----------------------------------------------------------------------------
// Tokenizer
// ----------------------------------------------------------------------------

impl Lexer {
    pub fn next_token(&mut self) -> Token {
        if let Some((tok, pos)) = self.pushed.take() {
            self.pos = pos;
            return tok;
        }

        // 0. Skip whitespaces
        while let Some(ch) = self.src.peek() {
            if ch == '\n' || !ch.is_whitespace() {
                break;
            }
            self.src.consume();
        }
        self.pos = (self.src.line(), self.src.col());

        let Some(ch) = self.src.consume() else {
            return Token::Eof;
        };

        match ch {
            '\n' => Token::NewLine,
            ';' => {
                self.src.skip_to_eol();
                self.src.consume();
                Token::NewLine
            }
            '$' => {
                let digits = self.alnum_run();
                self.number(format!("${digits}"), &digits, 16)
            }
            '0' => self.zero(),
            '1'..='9' => {
                let digits = format!("{ch}{}", self.alnum_run());
                self.number(digits.clone(), &digits, 10)
            }
            '"' => self.string(),
            '\'' => self.char_lit(),
            ch if ch.is_alphabetic() || ch == '_' => keyword(self.word(ch)),
            ch => single_char_token(ch).unwrap_or_else(|| self.error(AsmError::UnexpectedChar(ch))),
        }
    }

    /// Literal starting with `0`: `0x` hex, `0b` binary, octal, or zero itself.
    fn zero(&mut self) -> Token {
        match self.src.peek() {
            Some(p @ ('x' | 'X')) => {
                self.src.consume();
                let digits = self.alnum_run();
                self.number(format!("0{p}{digits}"), &digits, 16)
            }
            Some(p @ ('b' | 'B')) => {
                self.src.consume();
                let digits = self.alnum_run();
                self.number(format!("0{p}{digits}"), &digits, 2)
            }
            _ => {
                let digits = self.alnum_run();
                if digits.is_empty() {
                    Token::Int(0)
                } else {
                    self.number(format!("0{digits}"), &digits, 8)
                }
            }
        }
    }

    fn number(&self, text: String, digits: &str, radix: u32) -> Token {
        if digits.is_empty() {
            return self.error(AsmError::EmptyNumber);
        }
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return self.error(AsmError::InvalidDigit(radix, text));
        }
        match i64::from_str_radix(digits, radix) {
            Ok(n) => Token::Int(n),
            Err(_) => self.error(AsmError::NumberOverflow(text)),
        }
    }

    fn string(&mut self) -> Token {
        let mut text = String::new();
        loop {
            // The newline stays in the source so the line can still be skipped.
            match self.src.peek() {
                None | Some('\n') => return self.error(AsmError::UnterminatedString),
                Some('"') => {
                    self.src.consume();
                    if self.src.peek() != Some('"') {
                        return Token::Str(text);
                    }
                    self.src.consume();
                    text.push('"');
                }
                Some(ch) => {
                    self.src.consume();
                    text.push(ch);
                }
            }
        }
    }

    fn char_lit(&mut self) -> Token {
        let ch = match self.src.peek() {
            None | Some('\n') => return self.error(AsmError::InvalidCharLiteral),
            Some(ch) => ch,
        };
        self.src.consume();
        if self.src.peek() != Some('\'') {
            return self.error(AsmError::InvalidCharLiteral);
        }
        self.src.consume();
        Token::Char(ch)
    }
}

/// Opcode, directive and register names win over identifiers, in that order.
fn keyword(word: String) -> Token {
    if let Some(op) = Mnemonic::parse(&word) {
        Token::Opcode(op)
    } else if let Some(dir) = Directive::parse(&word) {
        Token::Directive(dir)
    } else if let Some(reg) = Reg::parse(&word) {
        Token::Register(reg)
    } else {
        Token::Ident(word)
    }
}

impl From<&str> for Lexer {
    fn from(src: &str) -> Self {
        Lexer::new(Source::from(src))
    }
}
