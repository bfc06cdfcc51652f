use arch65::{Mnemonic, Reg};
use std::fmt;
use strum::{Display, EnumString};

use crate::error::AsmError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Eof,
    NewLine,

    Ident(String),
    Int(i64),
    Str(String),
    Char(char),

    Opcode(Mnemonic),
    Directive(Directive),
    Register(Reg),

    Comma,  // ','
    LParen, // '('
    RParen, // ')'
    Plus,   // '+'
    Minus,  // '-'
    Star,   // '*'
    Slash,  // '/'
    Amp,    // '&'
    Pipe,   // '|'
    Hash,   // '#'
    Colon,  // ':'

    Error(AsmError, usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Directive {
    Db,
    Dw,
    Dd,
    Ds,
    Equ,
    Extern,
    Global,
}

impl Directive {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Eof => write!(f, "end of file"),
            Token::NewLine => write!(f, "end of line"),
            Token::Ident(id) => write!(f, "`{id}`"),
            Token::Int(n) => write!(f, "`{n}`"),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Char(ch) => write!(f, "'{ch}'"),
            Token::Opcode(op) => write!(f, "`{op}`"),
            Token::Directive(dir) => write!(f, "`{dir}`"),
            Token::Register(reg) => write!(f, "`{reg}`"),
            Token::Comma => write!(f, "`,`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Plus => write!(f, "`+`"),
            Token::Minus => write!(f, "`-`"),
            Token::Star => write!(f, "`*`"),
            Token::Slash => write!(f, "`/`"),
            Token::Amp => write!(f, "`&`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Hash => write!(f, "`#`"),
            Token::Colon => write!(f, "`:`"),
            Token::Error(err, _, _) => write!(f, "{err}"),
        }
    }
}

pub fn single_char_token(ch: char) -> Option<Token> {
    match ch {
        ',' => Some(Token::Comma),
        '(' => Some(Token::LParen),
        ')' => Some(Token::RParen),
        '+' => Some(Token::Plus),
        '-' => Some(Token::Minus),
        '*' => Some(Token::Star),
        '/' => Some(Token::Slash),
        '&' => Some(Token::Amp),
        '|' => Some(Token::Pipe),
        '#' => Some(Token::Hash),
        ':' => Some(Token::Colon),
        _ => None,
    }
}
