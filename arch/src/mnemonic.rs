use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::{mode::AddrMode, opcode::opcode};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    EnumCount,
    Display,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

impl Mnemonic {
    pub fn parse(s: &str) -> Option<Self> {
        s.parse::<Self>().ok()
    }

    /// Branches only have a relative encoding.
    pub fn is_branch(self) -> bool {
        opcode(self, AddrMode::Relative).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_any_case() {
        assert_eq!(Mnemonic::parse("lda"), Some(Mnemonic::LDA));
        assert_eq!(Mnemonic::parse("Brk"), Some(Mnemonic::BRK));
        assert_eq!(Mnemonic::parse("TYA"), Some(Mnemonic::TYA));
        assert_eq!(Mnemonic::parse("hoge"), None);
        assert_eq!(Mnemonic::parse("db"), None);
    }

    #[test]
    fn branches() {
        use Mnemonic::*;
        for op in [BCC, BCS, BEQ, BMI, BNE, BPL, BVC, BVS] {
            assert!(op.is_branch(), "{op}");
        }
        assert!(!JMP.is_branch());
        assert!(!JSR.is_branch());
        assert!(!LDA.is_branch());
    }
}
