use indexmap::IndexSet;

use crate::error::{AsmError, Error};
use crate::lexer::Lexer;
use crate::msg::Msg;
use crate::reloc::Relocations;
use crate::segment::{Overflow, Segment};
use crate::source::Source;
use crate::symbols::{Symbol, SymbolTable};
use crate::token::{Directive, Token};

/// Upper bound on passes while label values are still moving.
pub const MAX_PASSES: usize = 8;

/// Why a statement stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    /// Already reported; drop the rest of the line.
    Skip,
    /// The code buffer is full; the run is over.
    Overflow,
}

impl From<Overflow> for Halt {
    fn from(_: Overflow) -> Self {
        Halt::Overflow
    }
}

pub(crate) type Step<T> = Result<T, Halt>;

/// Label written at the start of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Label {
    pub name: String,
    pub line: usize,
    pub col: usize,
}

/// Assembler state for one run over one source.
pub struct Assembler {
    pub(crate) lexer: Lexer,
    pub(crate) seg: Segment,
    pub(crate) pass: usize,
    /// Names bound during the current pass.
    pub(crate) defined: IndexSet<String>,
    /// `equ` names whose expression used an undefined name when last bound.
    /// Kept across passes; their values are placeholders until rebound.
    pub(crate) unresolved: IndexSet<String>,
    pub(crate) msgs: Vec<Msg>,
    /// Some label got a different value than on the previous pass.
    pub(crate) moved: bool,
}

/// Outcome of a run: the segment and the diagnostics of pass one and of the
/// final pass.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub segment: Segment,
    pub msgs: Vec<Msg>,
    pub passes: usize,
}

impl Assembly {
    /// The code image, only when the source assembled without errors.
    pub fn image(&self) -> Option<&[u8]> {
        (self.segment.errors == 0).then(|| self.segment.code())
    }

    pub fn errors(&self) -> u32 {
        self.segment.errors
    }

    pub fn warnings(&self) -> u32 {
        self.segment.warnings
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.segment.symbols
    }

    pub fn relocs(&self) -> &Relocations {
        &self.segment.relocs
    }

    pub fn globals(&self) -> impl Iterator<Item = (&str, i64)> {
        self.segment.symbols.globals()
    }
}

/// Assemble source lines (without line terminators).
pub fn assemble<S: AsRef<str>>(lines: &[S]) -> Result<Assembly, Error> {
    Assembler::new(Source::new(lines)).run()
}

pub fn assemble_str(src: &str) -> Result<Assembly, Error> {
    Assembler::new(Source::from(src)).run()
}

// ----------------------------------------------------------------------------
// Passes
// ----------------------------------------------------------------------------

impl Assembler {
    pub fn new(src: Source) -> Self {
        Assembler {
            lexer: Lexer::new(src),
            seg: Segment::new(),
            pass: 0,
            defined: IndexSet::new(),
            unresolved: IndexSet::new(),
            msgs: Vec::new(),
            moved: false,
        }
    }

    /// Pass one, then further passes until every label keeps its value.
    ///
    /// Counts and messages add up over pass one and the final pass. A pass
    /// that has to be repeated leaves nothing behind.
    pub fn run(mut self) -> Result<Assembly, Error> {
        self.run_pass(1)?;
        if self.seg.errors == 0 {
            loop {
                let mark = (self.seg.errors, self.seg.warnings, self.msgs.len());
                self.run_pass(self.pass + 1)?;
                if !self.moved {
                    break;
                }
                if self.pass == MAX_PASSES {
                    self.error_at(AsmError::PhaseError(MAX_PASSES), 0, 0);
                    break;
                }
                let (errors, warnings, msgs) = mark;
                self.seg.errors = errors;
                self.seg.warnings = warnings;
                self.msgs.truncate(msgs);
            }
        }
        Ok(Assembly {
            segment: self.seg,
            msgs: self.msgs,
            passes: self.pass,
        })
    }

    fn run_pass(&mut self, pass: usize) -> Result<(), Error> {
        self.pass = pass;
        self.lexer.rewind();
        self.seg.reset();
        self.defined.clear();
        self.moved = false;

        loop {
            let step = match self.lexer.next_token() {
                Token::Eof => return Ok(()),
                Token::NewLine => continue,
                tok => self.statement(tok),
            };
            match step {
                Ok(()) => {}
                Err(Halt::Skip) => self.lexer.skip_line(),
                Err(Halt::Overflow) => return Err(Error::CodeOverflow(self.lexer.pos().0)),
            }
        }
    }

    /// `[label[:]] (opcode | directive) ...` or a label on its own.
    fn statement(&mut self, first: Token) -> Step<()> {
        let mut tok = first;
        let mut label = None;
        if let Token::Ident(name) = tok {
            let (line, col) = self.lexer.pos();
            label = Some(Label { name, line, col });
            tok = self.lexer.next_token();
            if tok == Token::Colon {
                tok = self.lexer.next_token();
            }
        }

        // `equ` binds its label to the expression instead.
        if !matches!(tok, Token::Directive(Directive::Equ)) {
            if let Some(label) = &label {
                self.define(label, self.seg.lc as i64, true);
            }
        }

        match tok {
            Token::NewLine | Token::Eof if label.is_some() => Ok(()),
            Token::Opcode(op) => self.instruction(op),
            Token::Directive(dir) => self.directive(dir, label),
            tok => Err(self.unexpected("instruction or directive", tok)),
        }
    }

    /// Bind a label for this pass, noting duplicates and moved values.
    ///
    /// `resolved` is false for an `equ` whose value still depends on a name
    /// that is not defined yet.
    pub(crate) fn define(&mut self, label: &Label, value: i64, resolved: bool) {
        if !self.defined.insert(label.name.clone()) {
            self.error_at(
                AsmError::DuplicateLabel(label.name.clone()),
                label.line,
                label.col,
            );
        }
        let was_resolved = !self.unresolved.contains(&label.name);
        if resolved {
            self.unresolved.swap_remove(&label.name);
        } else {
            self.unresolved.insert(label.name.clone());
        }
        let prev = self.seg.symbols.define_label(&label.name, value);
        // A label redeclared `extern` further down is rebound every pass.
        let changed = matches!(prev, Some(Symbol::Local { value: old, .. }) if old != value);
        if self.pass > 1 && (changed || was_resolved != resolved) {
            self.moved = true;
        }
    }
}

// ----------------------------------------------------------------------------
// Diagnostics
// ----------------------------------------------------------------------------

impl Assembler {
    pub(crate) fn error_at(&mut self, err: AsmError, line: usize, col: usize) {
        self.seg.errors += 1;
        self.msgs.push(Msg::error(err, line, col));
    }

    /// Error at the last token read.
    pub(crate) fn error(&mut self, err: AsmError) {
        let (line, col) = self.lexer.pos();
        self.error_at(err, line, col);
    }

    pub(crate) fn warn(&mut self, err: AsmError) {
        let (line, col) = self.lexer.pos();
        self.seg.warnings += 1;
        self.msgs.push(Msg::warn(err, line, col));
    }

    /// Report a token that does not fit here. Lexical errors are reported
    /// as themselves.
    pub(crate) fn unexpected(&mut self, what: &'static str, tok: Token) -> Halt {
        match tok {
            Token::Error(err, line, col) => self.error_at(err, line, col),
            tok => self.error(AsmError::Expected(what, tok.to_string())),
        }
        Halt::Skip
    }

    pub(crate) fn expect(&mut self, want: Token, what: &'static str) -> Step<()> {
        match self.lexer.next_token() {
            tok if tok == want => Ok(()),
            tok => Err(self.unexpected(what, tok)),
        }
    }

    pub(crate) fn end_of_line(&mut self) -> Step<()> {
        match self.lexer.next_token() {
            Token::NewLine | Token::Eof => Ok(()),
            tok => Err(self.unexpected("end of line", tok)),
        }
    }
}
