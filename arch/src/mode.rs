use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumCount, EnumIter};

/// 6502 addressing modes.
///
/// The discriminant is the column of the mode in the opcode table, so the
/// order of the variants must not change.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumIter,
    EnumCount,
    Display,
)]
#[repr(u8)]
pub enum AddrMode {
    Implicit,        // <none>
    Accumulator,     // A
    Immediate,       // #expr
    ZeroPage,        // expr < 256
    ZeroPageX,       // expr < 256, X
    ZeroPageY,       // expr < 256, Y
    Relative,        // branches
    Absolute,        // expr
    AbsoluteX,       // expr, X
    AbsoluteY,       // expr, Y
    Indirect,        // (expr)
    IndexedIndirect, // (expr, X)
    IndirectIndexed, // (expr), Y
    Error,
}

impl AddrMode {
    pub fn column(self) -> usize {
        u8::from(self) as usize
    }

    /// Number of operand bytes following the opcode.
    ///
    /// Every indirect form carries a full word, the pointer of `(zp,X)` and
    /// `(zp),Y` included.
    pub fn operand_size(self) -> usize {
        use AddrMode::*;
        match self {
            Implicit | Accumulator | Error => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY => 2,
            Indirect | IndexedIndirect | IndirectIndexed => 2,
        }
    }

    /// The zero page form of an absolute mode.
    pub fn zero_page(self) -> Option<AddrMode> {
        match self {
            AddrMode::Absolute => Some(AddrMode::ZeroPage),
            AddrMode::AbsoluteX => Some(AddrMode::ZeroPageX),
            AddrMode::AbsoluteY => Some(AddrMode::ZeroPageY),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn columns_follow_declaration_order() {
        for (idx, mode) in AddrMode::iter().enumerate() {
            assert_eq!(mode.column(), idx);
            assert_eq!(AddrMode::try_from(idx as u8).ok(), Some(mode));
        }
        assert_eq!(AddrMode::Implicit.column(), 0);
        assert_eq!(AddrMode::Error.column(), AddrMode::COUNT - 1);
    }

    #[test]
    fn operand_sizes() {
        assert_eq!(AddrMode::Implicit.operand_size(), 0);
        assert_eq!(AddrMode::Accumulator.operand_size(), 0);
        assert_eq!(AddrMode::Immediate.operand_size(), 1);
        assert_eq!(AddrMode::ZeroPageY.operand_size(), 1);
        assert_eq!(AddrMode::Relative.operand_size(), 1);
        assert_eq!(AddrMode::AbsoluteX.operand_size(), 2);
        assert_eq!(AddrMode::IndexedIndirect.operand_size(), 2);
        assert_eq!(AddrMode::IndirectIndexed.operand_size(), 2);
    }

    #[test]
    fn zero_page_forms() {
        assert_eq!(AddrMode::Absolute.zero_page(), Some(AddrMode::ZeroPage));
        assert_eq!(AddrMode::AbsoluteX.zero_page(), Some(AddrMode::ZeroPageX));
        assert_eq!(AddrMode::AbsoluteY.zero_page(), Some(AddrMode::ZeroPageY));
        assert_eq!(AddrMode::Indirect.zero_page(), None);
        assert_eq!(AddrMode::Immediate.zero_page(), None);
    }
}
