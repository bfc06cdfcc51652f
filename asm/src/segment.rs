use crate::reloc::Relocations;
use crate::symbols::SymbolTable;

pub const CODE_SIZE: usize = 0x10000;

/// Write past the end of the 64KB code buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

/// The single code/data region being assembled.
#[derive(Debug, Clone)]
pub struct Segment {
    code: Box<[u8]>,
    /// Location counter.
    pub lc: usize,
    /// Highest location written so far.
    pub size: usize,
    pub symbols: SymbolTable,
    pub relocs: Relocations,
    pub errors: u32,
    pub warnings: u32,
}

impl Default for Segment {
    fn default() -> Self {
        Segment::new()
    }
}

impl Segment {
    pub fn new() -> Self {
        Segment {
            code: vec![0; CODE_SIZE].into_boxed_slice(),
            lc: 0,
            size: 0,
            symbols: SymbolTable::new(),
            relocs: Relocations::new(),
            errors: 0,
            warnings: 0,
        }
    }

    /// Start a new pass. Symbols and counts survive; code and relocations
    /// are rebuilt.
    pub fn reset(&mut self) {
        self.lc = 0;
        self.size = 0;
        self.relocs.clear();
    }

    pub fn code(&self) -> &[u8] {
        &self.code[..self.size]
    }

    pub fn emit(&mut self, byte: u8) -> Result<(), Overflow> {
        let slot = self.code.get_mut(self.lc).ok_or(Overflow)?;
        *slot = byte;
        self.lc += 1;
        self.size = self.size.max(self.lc);
        Ok(())
    }

    /// Low `size` bytes of `value`, most significant first.
    pub fn emit_value(&mut self, value: i64, size: usize) -> Result<(), Overflow> {
        for shift in (0..size).rev() {
            self.emit((value >> (8 * shift)) as u8)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_truncated() {
        let mut seg = Segment::new();
        seg.emit(0xA9).unwrap();
        seg.emit_value(0x1234, 2).unwrap();
        seg.emit_value(0x12345678, 4).unwrap();
        seg.emit_value(-1, 2).unwrap();
        seg.emit_value(0x1FF, 1).unwrap();
        assert_eq!(
            seg.code(),
            &[0xA9u8, 0x12, 0x34, 0x12, 0x34, 0x56, 0x78, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(seg.lc, 10);
    }

    #[test]
    fn overflow_at_64k() {
        let mut seg = Segment::new();
        seg.lc = CODE_SIZE - 1;
        assert_eq!(seg.emit(1), Ok(()));
        assert_eq!(seg.size, CODE_SIZE);
        assert_eq!(seg.emit(2), Err(Overflow));
        assert_eq!(seg.code().len(), CODE_SIZE);
    }

    #[test]
    fn reset_keeps_symbols_and_counts() {
        let mut seg = Segment::new();
        seg.symbols.define_label("x", 3);
        seg.relocs.add("y", 0, 2);
        seg.emit(0).unwrap();
        seg.errors = 2;
        seg.reset();
        assert_eq!(seg.lc, 0);
        assert!(seg.code().is_empty());
        assert!(seg.relocs.is_empty());
        assert_eq!(seg.errors, 2);
        assert!(seg.symbols.contains("x"));
    }
}
