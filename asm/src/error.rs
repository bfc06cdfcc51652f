use arch65::{AddrMode, Mnemonic};
use thiserror::Error;

/// Problems reported against a source line. Assembly keeps going after
/// these; they are collected as [`crate::msg::Msg`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    // Lexical errors
    #[error("Number literal has no digits")]
    EmptyNumber,

    #[error("Invalid digit in base {0} literal: `{1}`")]
    InvalidDigit(u32, String),

    #[error("Number literal does not fit in 64 bits: `{0}`")]
    NumberOverflow(String),

    #[error("Unterminated string literal")]
    UnterminatedString,

    #[error("Invalid character literal")]
    InvalidCharLiteral,

    #[error("Unexpected character: `{0}`")]
    UnexpectedChar(char),

    // Syntax errors
    #[error("Expected {0}, found {1}")]
    Expected(&'static str, String),

    // Semantic errors
    #[error("Unknown label: `{0}`")]
    UnknownLabel(String),

    #[error("External label used in illegal context: `{0}`")]
    ExternInExpression(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Illegal addressing mode {1} for `{0}`")]
    IllegalMode(Mnemonic, AddrMode),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("Branch target out of range: displacement {0}")]
    BranchOutOfRange(i64),

    #[error("Branch target may not be an external symbol: `{0}`")]
    ExternBranch(String),

    #[error("Cannot define a local symbol with an external value: `{0}`")]
    ExternEqu(String),

    #[error("Cannot make an external symbol global: `{0}`")]
    GlobalExtern(String),

    #[error("Undefined symbol: `{0}`")]
    GlobalUndefined(String),

    #[error("Label values did not settle after {0} passes")]
    PhaseError(usize),

    // Warnings
    #[error("`equ` without label, value is lost")]
    EquWithoutLabel,

    #[error("Re-declared symbol: `{0}`")]
    ExternRedefined(String),
}

/// Failures that end a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Code segment overflow at line {0}: image exceeds 64KB")]
    CodeOverflow(usize),

    #[error("Assembly failed with {0} error(s)")]
    Failed(u32),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Failed to serialize object map")]
    Map(#[from] serde_yaml::Error),
}
