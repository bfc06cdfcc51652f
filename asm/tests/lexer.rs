use a65::lexer::Lexer;
use a65::token::{Directive, Token, Token::*};
use a65::AsmError;
use arch65::{Mnemonic, Reg};

fn tokens(code: &str) -> Vec<Token> {
    let mut lexer = Lexer::from(code);
    let mut tokens = vec![];
    loop {
        match lexer.next_token() {
            Eof => return tokens,
            tok => tokens.push(tok),
        }
    }
}

fn first(code: &str) -> Token {
    Lexer::from(code).next_token()
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert_eq!(first($code), $expect);
        }
    };
}

// ---- Numbers ----
case!(decimal, "42", Int(42));
case!(hex_dollar, "$2A", Int(42));
case!(hex_dollar_lower, "$ff", Int(255));
case!(hex_0x, "0x2A", Int(42));
case!(hex_0x_upper, "0X2a", Int(42));
case!(binary, "0b101010", Int(42));
case!(octal, "052", Int(42));
case!(zero, "0", Int(0));
case!(zero_before_comma, "0,", Int(0));
case!(max, "9223372036854775807", Int(i64::MAX));
case!(max_hex_dollar, "$7FFFFFFFFFFFFFFF", Int(i64::MAX));
case!(max_hex_0x, "0x7fffffffffffffff", Int(i64::MAX));
case!(
    max_binary,
    "0b111111111111111111111111111111111111111111111111111111111111111",
    Int(i64::MAX)
);
case!(max_octal, "0777777777777777777777", Int(i64::MAX));
case!(
    hex_overflow,
    "$8000000000000000",
    Error(AsmError::NumberOverflow("$8000000000000000".into()), 1, 1)
);

case!(dollar_empty, "$", Error(AsmError::EmptyNumber, 1, 1));
case!(hex_empty, "0x", Error(AsmError::EmptyNumber, 1, 1));
case!(
    decimal_letter,
    "43a",
    Error(AsmError::InvalidDigit(10, "43a".into()), 1, 1)
);
case!(
    binary_digit,
    "0b102",
    Error(AsmError::InvalidDigit(2, "0b102".into()), 1, 1)
);
case!(
    octal_digit,
    "09",
    Error(AsmError::InvalidDigit(8, "09".into()), 1, 1)
);
case!(
    overflow,
    "9223372036854775808",
    Error(AsmError::NumberOverflow("9223372036854775808".into()), 1, 1)
);

// ---- Strings and characters ----
case!(string, "\"aap\"", Str("aap".into()));
case!(string_empty, "\"\"", Str("".into()));
case!(string_quote, "\"a\"\"b\"", Str("a\"b".into()));
case!(string_unterminated, "\"aap", Error(AsmError::UnterminatedString, 1, 1));
case!(character, "'c'", Char('c'));
case!(character_quote, "'''", Char('\''));
case!(character_long, "'ab'", Error(AsmError::InvalidCharLiteral, 1, 1));
case!(character_open, "'", Error(AsmError::InvalidCharLiteral, 1, 1));

// ---- Keywords ----
case!(opcode, "lda", Opcode(Mnemonic::LDA));
case!(opcode_upper, "LDA", Opcode(Mnemonic::LDA));
case!(directive_db, "db", Directive(Directive::Db));
case!(directive_extern, "EXTERN", Directive(Directive::Extern));
case!(register_a, "A", Register(Reg::A));
case!(register_x, "x", Register(Reg::X));
case!(ident, "Loop_1", Ident("loop_1".into()));
case!(ident_underscore, "_tmp", Ident("_tmp".into()));

// ---- Punctuation ----
case!(comma, ",", Comma);
case!(lparen, "(", LParen);
case!(rparen, ")", RParen);
case!(plus, "+", Plus);
case!(minus, "-", Minus);
case!(star, "*", Star);
case!(slash, "/", Slash);
case!(amp, "&", Amp);
case!(pipe, "|", Pipe);
case!(hash, "#", Hash);
case!(colon, ":", Colon);
case!(unexpected, "@", Error(AsmError::UnexpectedChar('@'), 1, 1));

#[test]
fn statement() {
    assert_eq!(
        tokens("loop:  lda ($10),y ; comment\n  bne loop"),
        vec![
            Ident("loop".into()),
            Colon,
            Opcode(Mnemonic::LDA),
            LParen,
            Int(16),
            RParen,
            Comma,
            Register(Reg::Y),
            NewLine,
            Opcode(Mnemonic::BNE),
            Ident("loop".into()),
            NewLine,
        ]
    );
}

#[test]
fn comment_is_one_newline() {
    assert_eq!(tokens("; one\n;two"), vec![NewLine, NewLine]);
    assert_eq!(tokens("nop;x"), vec![Opcode(Mnemonic::NOP), NewLine]);
}

#[test]
fn error_position() {
    assert_eq!(
        tokens("db 1,\n  db 0q"),
        vec![
            Directive(Directive::Db),
            Int(1),
            Comma,
            NewLine,
            Directive(Directive::Db),
            Error(AsmError::InvalidDigit(8, "0q".into()), 2, 6),
            NewLine,
        ]
    );
}

#[test]
fn push_back() {
    let mut lexer = Lexer::from("a b");
    let tok = lexer.next_token();
    assert_eq!(tok, Register(Reg::A));
    lexer.push_back(tok);
    assert_eq!(lexer.next_token(), Register(Reg::A));
    assert_eq!(lexer.pos(), (1, 1));
    assert_eq!(lexer.next_token(), Ident("b".into()));
    assert_eq!(lexer.pos(), (1, 3));
}

#[test]
#[should_panic]
fn double_push_back() {
    let mut lexer = Lexer::from("a b");
    lexer.push_back(Comma);
    lexer.push_back(Comma);
}

#[test]
fn skip_line_after_error() {
    let mut lexer = Lexer::from("\"open\nnop");
    assert_eq!(lexer.next_token(), Error(AsmError::UnterminatedString, 1, 1));
    lexer.skip_line();
    assert_eq!(lexer.next_token(), Opcode(Mnemonic::NOP));
}
