use color_print::cprintln;
use std::fmt;

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
}

impl Level {
    pub fn name(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warning",
        }
    }
}

/// A diagnostic attached to a source position (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msg {
    pub level: Level,
    pub error: AsmError,
    pub line: usize,
    pub col: usize,
}

impl Msg {
    pub fn error(error: AsmError, line: usize, col: usize) -> Self {
        Msg {
            level: Level::Error,
            error,
            line,
            col,
        }
    }

    pub fn warn(error: AsmError, line: usize, col: usize) -> Self {
        Msg {
            level: Level::Warn,
            error,
            line,
            col,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn print(&self, file: &str, raw: &str) {
        match self.level {
            Level::Error => cprintln!("<red,bold>{}</>: {}", self.level.name(), self.error),
            Level::Warn => cprintln!("<yellow,bold>{}</>: {}", self.level.name(), self.error),
        }
        cprintln!(
            "     <blue>--></> <underline>{}:{}:{}</>",
            file,
            self.line,
            self.col
        );
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.line, raw);
        cprintln!("      <blue>|</>");
    }
}

impl fmt::Display for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}] {}: {}",
            self.line,
            self.col,
            self.level.name(),
            self.error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let msg = Msg::warn(AsmError::EquWithoutLabel, 3, 1);
        assert!(msg.to_string().starts_with("[3:1] warning: "));
        assert!(!msg.is_error());
        let msg = Msg::error(AsmError::DivisionByZero, 2, 9);
        assert_eq!(msg.to_string(), format!("[2:9] error: {}", AsmError::DivisionByZero));
    }
}
