use std::io::Read;

use crate::error::Error;

/// Character cursor over the lines of a source file.
///
/// Every line ends in a `'\n'` whether or not the text had one. Lines are
/// entered lazily: consuming a line's newline leaves the cursor there, and
/// the next read moves on to the following line.
#[derive(Debug, Clone)]
pub struct Source {
    lines: Vec<Vec<char>>,
    line: Option<usize>,
    pos: usize,
    peeked: Option<char>,
}

impl Source {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Source {
            lines: lines.iter().map(|l| l.as_ref().chars().collect()).collect(),
            line: None,
            pos: 0,
            peeked: None,
        }
    }

    /// Back to the first character of the first line.
    pub fn rewind(&mut self) {
        self.line = None;
        self.pos = 0;
        self.peeked = None;
    }

    /// Next character without consuming it. `None` at end of file.
    pub fn peek(&mut self) -> Option<char> {
        if self.peeked.is_none() {
            if self.exhausted() && !self.next_line() {
                return None;
            }
            let line = &self.lines[self.line?];
            let ch = line.get(self.pos).copied().unwrap_or('\n');
            self.pos += 1;
            self.peeked = Some(ch);
        }
        self.peeked
    }

    pub fn consume(&mut self) -> Option<char> {
        let ch = self.peek();
        self.peeked = None;
        ch
    }

    /// Drop the rest of the current line; the next read is its newline.
    pub fn skip_to_eol(&mut self) {
        if let Some(idx) = self.line {
            if self.peeked.is_some() || !self.exhausted() {
                self.pos = self.lines[idx].len() + 1;
                self.peeked = Some('\n');
            }
        }
    }

    /// Drop the rest of the current line including its newline.
    pub fn move_to_next_line(&mut self) {
        match self.line {
            Some(idx) => self.pos = self.lines[idx].len() + 1,
            None if !self.lines.is_empty() => {
                self.line = Some(0);
                self.pos = self.lines[0].len() + 1;
            }
            None => {}
        }
        self.peeked = None;
    }

    /// 1-based number of the current line.
    pub fn line(&self) -> usize {
        self.line.map_or(1, |idx| idx + 1)
    }

    /// 1-based column of the next character.
    pub fn col(&self) -> usize {
        match self.peeked {
            Some(_) => self.pos,
            None => self.pos + 1,
        }
    }

    fn exhausted(&self) -> bool {
        match self.line {
            Some(idx) => self.pos > self.lines[idx].len(),
            None => true,
        }
    }

    fn next_line(&mut self) -> bool {
        let next = self.line.map_or(0, |idx| idx + 1);
        if next >= self.lines.len() {
            return false;
        }
        self.line = Some(next);
        self.pos = 0;
        true
    }
}

impl From<&str> for Source {
    fn from(src: &str) -> Self {
        Source::new(&src.lines().collect::<Vec<_>>())
    }
}

/// Read a file, or stdin for `-`, into lines.
pub fn read_lines(path: &str) -> Result<Vec<String>, Error> {
    let text = if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| Error::FileRead(path.to_string(), e))?;
        text
    } else {
        std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_string(), e))?
    };
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(src: &mut Source) -> String {
        let mut got = String::new();
        while let Some(ch) = src.consume() {
            got.push(ch);
        }
        got
    }

    #[test]
    fn newline_after_every_line() {
        let mut src = Source::from("aap\n\nnoot");
        assert_eq!(drain(&mut src), "aap\n\nnoot\n");
        assert_eq!(src.peek(), None);
        assert_eq!(src.consume(), None);
    }

    #[test]
    fn peek_does_not_advance() {
        let mut src = Source::from("ab");
        for _ in 0..3 {
            assert_eq!(src.peek(), Some('a'));
        }
        assert_eq!(src.consume(), Some('a'));
        assert_eq!(src.peek(), Some('b'));
        assert_eq!(src.col(), 2);
    }

    #[test]
    fn empty_source_is_eof() {
        let mut src = Source::from("");
        assert_eq!(src.peek(), None);
        assert_eq!(src.consume(), None);
    }

    #[test]
    fn skip_to_eol_keeps_newline() {
        let mut src = Source::from("abc\nde");
        src.consume();
        src.skip_to_eol();
        assert_eq!(src.consume(), Some('\n'));
        assert_eq!(src.consume(), Some('d'));
        assert_eq!(src.line(), 2);
    }

    #[test]
    fn move_to_next_line_drops_newline() {
        let mut src = Source::from("abc\nde");
        src.consume();
        src.move_to_next_line();
        assert_eq!(src.consume(), Some('d'));
    }

    #[test]
    fn move_after_newline_is_noop() {
        let mut src = Source::from("a\nb\nc");
        assert_eq!(src.consume(), Some('a'));
        assert_eq!(src.consume(), Some('\n'));
        src.move_to_next_line();
        assert_eq!(src.consume(), Some('b'));
    }

    #[test]
    fn rewind_restarts() {
        let mut src = Source::from("x\ny");
        drain(&mut src);
        src.rewind();
        assert_eq!(drain(&mut src), "x\ny\n");
    }
}
