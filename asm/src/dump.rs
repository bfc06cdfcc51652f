use arch65::{decode, AddrMode};
use color_print::{cformat, cprintln};

use crate::assembler::Assembly;
use crate::symbols::Symbol;

/// One decoded line of a linear disassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub addr: usize,
    pub bytes: Vec<u8>,
    pub text: String,
}

/// Linear sweep over `code`. Bytes that are no documented opcode, or whose
/// operand runs past the end, come out as `db`.
pub fn disassemble(code: &[u8]) -> Vec<Line> {
    let mut lines = vec![];
    let mut addr = 0;
    while addr < code.len() {
        let decoded = decode(code[addr]).filter(|(_, mode)| addr + mode.operand_size() < code.len());
        let Some((op, mode)) = decoded else {
            lines.push(Line {
                addr,
                bytes: vec![code[addr]],
                text: format!("db ${:02X}", code[addr]),
            });
            addr += 1;
            continue;
        };
        let len = 1 + mode.operand_size();
        let bytes = code[addr..addr + len].to_vec();
        let text = format!("{} {}", op, operand(mode, addr, &bytes[1..]))
            .trim_end()
            .to_string();
        lines.push(Line { addr, bytes, text });
        addr += len;
    }
    lines
}

fn operand(mode: AddrMode, addr: usize, arg: &[u8]) -> String {
    let byte = arg.first().copied().unwrap_or(0);
    let word = arg.iter().fold(0u16, |acc, b| acc << 8 | u16::from(*b));
    match mode {
        AddrMode::Implicit | AddrMode::Error => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${byte:02X}"),
        AddrMode::ZeroPage => format!("${byte:02X}"),
        AddrMode::ZeroPageX => format!("${byte:02X},X"),
        AddrMode::ZeroPageY => format!("${byte:02X},Y"),
        AddrMode::Relative => {
            let target = addr as i64 + 2 + i64::from(byte as i8);
            format!("${target:04X}")
        }
        AddrMode::Absolute => format!("${word:04X}"),
        AddrMode::AbsoluteX => format!("${word:04X},X"),
        AddrMode::AbsoluteY => format!("${word:04X},Y"),
        AddrMode::Indirect => format!("(${word:04X})"),
        AddrMode::IndexedIndirect => format!("(${word:04X},X)"),
        AddrMode::IndirectIndexed => format!("(${word:04X}),Y"),
    }
}

// ----------------------------------------------------------------------------
// Printing
// ----------------------------------------------------------------------------

pub fn print_dump(asm: &Assembly) {
    if !asm.symbols().is_empty() {
        print_symbols(asm);
    }
    if !asm.relocs().is_empty() {
        print_relocs(asm);
    }
    print_code(asm);
}

fn print_symbols(asm: &Assembly) {
    println!("+-[Symbols]-+---------------------------------------------------------------");
    for (name, sym) in asm.symbols().iter() {
        match sym {
            Symbol::Local { value, global } => {
                let export = if *global { cformat!("<g>global</>") } else { String::new() };
                cprintln!("| <y>{:>8}</> | {} {}", format!("${:04X}", value), name, export);
            }
            Symbol::Extern => cprintln!("| <c>{:>8}</> | {}", "extern", name),
        }
    }
}

fn print_relocs(asm: &Assembly) {
    println!("+-[Relocs]--+---------------------------------------------------------------");
    for (name, relocs) in asm.relocs().iter() {
        for reloc in relocs {
            cprintln!("| <c>{:>8}</> | {} ({} bytes)", format!("${:04X}", reloc.location), name, reloc.size);
        }
    }
}

fn print_code(asm: &Assembly) {
    println!("+-[Code]----+---------------------------------------------------------------");
    let labels: Vec<(i64, &String)> = asm
        .symbols()
        .iter()
        .filter_map(|(name, sym)| match sym {
            Symbol::Local { value, .. } => Some((*value, name)),
            Symbol::Extern => None,
        })
        .collect();
    for line in disassemble(asm.segment.code()) {
        for (_, name) in labels.iter().filter(|(value, _)| *value == line.addr as i64) {
            cprintln!("|           | <m>{}</>:", name);
        }
        let hex: Vec<String> = line.bytes.iter().map(|b| format!("{b:02X}")).collect();
        cprintln!("| <y>{:04X}</> {:<8}|   {}", line.addr, hex.join(" "), line.text);
    }
    println!("+-----------+---------------------------------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing() {
        let code = [0xA9, 0x2A, 0x8D, 0x12, 0x34, 0xD0, 0xFE, 0xFF, 0x6C];
        let text: Vec<_> = disassemble(&code).into_iter().map(|l| l.text).collect();
        assert_eq!(
            text,
            vec!["LDA #$2A", "STA $1234", "BNE $0005", "db $FF", "db $6C"]
        );
    }

    #[test]
    fn addresses_follow_sizes() {
        let code = [0x0A, 0xB1, 0x00, 0x10, 0x81, 0x00, 0x20, 0x60];
        let lines = disassemble(&code);
        let addrs: Vec<_> = lines.iter().map(|l| l.addr).collect();
        assert_eq!(addrs, vec![0, 1, 4, 7]);
        assert_eq!(lines[0].text, "ASL A");
        assert_eq!(lines[1].text, "LDA ($0010),Y");
        assert_eq!(lines[2].text, "STA ($0020,X)");
        assert_eq!(lines[3].text, "RTS");
    }
}
