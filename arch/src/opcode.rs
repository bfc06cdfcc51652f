use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::{EnumCount, IntoEnumIterator};

use crate::{mnemonic::Mnemonic, mode::AddrMode};

const __: i16 = -1;

// ----------------------------------------------------------------------------
// Encoding table
//
// One row per mnemonic in declaration order, one column per addressing mode
// in `AddrMode` order. `__` marks modes the instruction does not have.

#[rustfmt::skip]
static OPCODES: [[i16; AddrMode::COUNT]; Mnemonic::COUNT] = [
    //  Imp   Acc   Imm   Zp    ZpX   ZpY   Rel   Abs   AbsX  AbsY  Ind   (X)   ()Y   Err
    [   __,   __, 0x69, 0x65, 0x75,   __,   __, 0x6D, 0x7D, 0x79,   __, 0x61, 0x71,   __], // ADC
    [   __,   __, 0x29, 0x25, 0x35,   __,   __, 0x2D, 0x3D, 0x39,   __, 0x21, 0x31,   __], // AND
    [   __, 0x0A,   __, 0x06, 0x16,   __,   __, 0x0E, 0x1E,   __,   __,   __,   __,   __], // ASL
    [   __,   __,   __,   __,   __,   __, 0x90,   __,   __,   __,   __,   __,   __,   __], // BCC
    [   __,   __,   __,   __,   __,   __, 0xB0,   __,   __,   __,   __,   __,   __,   __], // BCS
    [   __,   __,   __,   __,   __,   __, 0xF0,   __,   __,   __,   __,   __,   __,   __], // BEQ
    [   __,   __,   __, 0x24,   __,   __,   __, 0x2C,   __,   __,   __,   __,   __,   __], // BIT
    [   __,   __,   __,   __,   __,   __, 0x30,   __,   __,   __,   __,   __,   __,   __], // BMI
    [   __,   __,   __,   __,   __,   __, 0xD0,   __,   __,   __,   __,   __,   __,   __], // BNE
    [   __,   __,   __,   __,   __,   __, 0x10,   __,   __,   __,   __,   __,   __,   __], // BPL
    [ 0x00,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // BRK
    [   __,   __,   __,   __,   __,   __, 0x50,   __,   __,   __,   __,   __,   __,   __], // BVC
    [   __,   __,   __,   __,   __,   __, 0x70,   __,   __,   __,   __,   __,   __,   __], // BVS
    [ 0x18,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // CLC
    [ 0xD8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // CLD
    [ 0x58,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // CLI
    [ 0xB8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // CLV
    [   __,   __, 0xC9, 0xC5, 0xD5,   __,   __, 0xCD, 0xDD, 0xD9,   __, 0xC1, 0xD1,   __], // CMP
    [   __,   __, 0xE0, 0xE4,   __,   __,   __, 0xEC,   __,   __,   __,   __,   __,   __], // CPX
    [   __,   __, 0xC0, 0xC4,   __,   __,   __, 0xCC,   __,   __,   __,   __,   __,   __], // CPY
    [   __,   __,   __, 0xC6, 0xD6,   __,   __, 0xCE, 0xDE,   __,   __,   __,   __,   __], // DEC
    [ 0xCA,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // DEX
    [ 0x88,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // DEY
    [   __,   __, 0x49, 0x45, 0x55,   __,   __, 0x4D, 0x5D, 0x59,   __, 0x41, 0x51,   __], // EOR
    [   __,   __,   __, 0xE6, 0xF6,   __,   __, 0xEE, 0xFE,   __,   __,   __,   __,   __], // INC
    [ 0xE8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // INX
    [ 0xC8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // INY
    [   __,   __,   __,   __,   __,   __,   __, 0x4C,   __,   __, 0x6C,   __,   __,   __], // JMP
    [   __,   __,   __,   __,   __,   __,   __, 0x20,   __,   __,   __,   __,   __,   __], // JSR
    [   __,   __, 0xA9, 0xA5, 0xB5,   __,   __, 0xAD, 0xBD, 0xB9,   __, 0xA1, 0xB1,   __], // LDA
    [   __,   __, 0xA2, 0xA6,   __, 0xB6,   __, 0xAE,   __, 0xBE,   __,   __,   __,   __], // LDX
    [   __,   __, 0xA0, 0xA4, 0xB4,   __,   __, 0xAC, 0xBC,   __,   __,   __,   __,   __], // LDY
    [   __, 0x4A,   __, 0x46, 0x56,   __,   __, 0x4E, 0x5E,   __,   __,   __,   __,   __], // LSR
    [ 0xEA,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // NOP
    [   __,   __, 0x09, 0x05, 0x15,   __,   __, 0x0D, 0x1D, 0x19,   __, 0x01, 0x11,   __], // ORA
    [ 0x48,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // PHA
    [ 0x08,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // PHP
    [ 0x68,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // PLA
    [ 0x28,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // PLP
    [   __, 0x2A,   __, 0x26, 0x36,   __,   __, 0x2E, 0x3E,   __,   __,   __,   __,   __], // ROL
    [   __, 0x6A,   __, 0x66, 0x76,   __,   __, 0x6E, 0x7E,   __,   __,   __,   __,   __], // ROR
    [ 0x40,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // RTI
    [ 0x60,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // RTS
    [   __,   __, 0xE9, 0xE5, 0xF5,   __,   __, 0xED, 0xFD, 0xF9,   __, 0xE1, 0xF1,   __], // SBC
    [ 0x38,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // SEC
    [ 0xF8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // SED
    [ 0x78,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // SEI
    [   __,   __,   __, 0x85, 0x95,   __,   __, 0x8D, 0x9D, 0x99,   __, 0x81, 0x91,   __], // STA
    [   __,   __,   __, 0x86,   __, 0x96,   __, 0x8E,   __,   __,   __,   __,   __,   __], // STX
    [   __,   __,   __, 0x84, 0x94,   __,   __, 0x8C,   __,   __,   __,   __,   __,   __], // STY
    [ 0xAA,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TAX
    [ 0xA8,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TAY
    [ 0xBA,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TSX
    [ 0x8A,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TXA
    [ 0x9A,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TXS
    [ 0x98,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __,   __], // TYA
];

/// Machine code byte for `op` in `mode`, if the instruction has that mode.
pub fn opcode(op: Mnemonic, mode: AddrMode) -> Option<u8> {
    let code = OPCODES[u8::from(op) as usize][mode.column()];
    u8::try_from(code).ok()
}

static DECODE: Lazy<BiMap<(Mnemonic, AddrMode), u8>> = Lazy::new(|| {
    let mut map = BiMap::new();
    for op in Mnemonic::iter() {
        for mode in AddrMode::iter() {
            if let Some(code) = opcode(op, mode) {
                map.insert((op, mode), code);
            }
        }
    }
    map
});

/// Instruction and addressing mode encoded by an opcode byte.
pub fn decode(code: u8) -> Option<(Mnemonic, AddrMode)> {
    DECODE.get_by_right(&code).copied()
}
