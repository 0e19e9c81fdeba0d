//! Static decode table mapping each opcode byte to its mnemonic, addressing
//! mode and base cycle count.
//!
//! Every byte of the 6502 decode space is listed, undocumented rows included.
//! Cycle counts are the nominal per-instruction values; page-crossing and
//! branch-taken penalties are not modeled.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    Relative,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
}

/// Closed set of instruction semantics, official and undocumented.
///
/// `Dop` and `Top` are the two- and three-byte NOP families; they disassemble
/// as `NOP`. `Kil` and `Xaa` decode but jam or misbehave on hardware, so
/// executing them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Official.
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
    // Undocumented.
    Aac, Arr, Asr, Atx, Axa, Axs, Dcp, Dop, Isb, Kil, Lar, Lax, Rla,
    Rra, Sax, Slo, Sre, Sxa, Sya, Top, Xaa, Xas,
}

impl Mnemonic {
    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA",
            Aac => "ANC", Arr => "ARR", Asr => "ALR", Atx => "ATX", Axa => "AHX",
            Axs => "AXS", Dcp => "DCP", Dop => "NOP", Isb => "ISB", Kil => "KIL",
            Lar => "LAS", Lax => "LAX", Rla => "RLA", Rra => "RRA", Sax => "SAX",
            Slo => "SLO", Sre => "SRE", Sxa => "SHX", Sya => "SHY", Top => "NOP",
            Xaa => "XAA", Xas => "TAS",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: u8,
    pub official: bool,
}

/// Instruction size in bytes, opcode byte included, as a function of the
/// addressing mode alone.
pub const fn bytes_consumed(mode: AddressingMode) -> u16 {
    use AddressingMode::*;
    match mode {
        Implied | Accumulator => 1,
        Immediate | Relative | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY => 2,
        Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
    }
}

pub fn decode(opcode: u8) -> Option<OpCode> {
    OPCODES[opcode as usize]
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpCode> {
    Some(OpCode {
        mnemonic,
        mode,
        cycles,
        official: true,
    })
}

const fn undoc(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Option<OpCode> {
    Some(OpCode {
        mnemonic,
        mode,
        cycles,
        official: false,
    })
}

static OPCODES: [Option<OpCode>; 256] = build_table();

const fn build_table() -> [Option<OpCode>; 256] {
    use AddressingMode::*;
    use Mnemonic::*;

    let mut t: [Option<OpCode>; 256] = [None; 256];

    // 0x00 - 0x0F
    t[0x00] = op(Brk, Implied, 7);
    t[0x01] = op(Ora, IndirectX, 6);
    t[0x02] = undoc(Kil, Implied, 2);
    t[0x03] = undoc(Slo, IndirectX, 8);
    t[0x04] = undoc(Dop, ZeroPage, 3);
    t[0x05] = op(Ora, ZeroPage, 3);
    t[0x06] = op(Asl, ZeroPage, 5);
    t[0x07] = undoc(Slo, ZeroPage, 5);
    t[0x08] = op(Php, Implied, 3);
    t[0x09] = op(Ora, Immediate, 2);
    t[0x0A] = op(Asl, Accumulator, 2);
    t[0x0B] = undoc(Aac, Immediate, 2);
    t[0x0C] = undoc(Top, Absolute, 4);
    t[0x0D] = op(Ora, Absolute, 4);
    t[0x0E] = op(Asl, Absolute, 6);
    t[0x0F] = undoc(Slo, Absolute, 6);

    // 0x10 - 0x1F
    t[0x10] = op(Bpl, Relative, 2);
    t[0x11] = op(Ora, IndirectY, 5);
    t[0x12] = undoc(Kil, Implied, 2);
    t[0x13] = undoc(Slo, IndirectY, 8);
    t[0x14] = undoc(Dop, ZeroPageX, 4);
    t[0x15] = op(Ora, ZeroPageX, 4);
    t[0x16] = op(Asl, ZeroPageX, 6);
    t[0x17] = undoc(Slo, ZeroPageX, 6);
    t[0x18] = op(Clc, Implied, 2);
    t[0x19] = op(Ora, AbsoluteY, 4);
    t[0x1A] = undoc(Nop, Implied, 2);
    t[0x1B] = undoc(Slo, AbsoluteY, 7);
    t[0x1C] = undoc(Top, AbsoluteX, 4);
    t[0x1D] = op(Ora, AbsoluteX, 4);
    t[0x1E] = op(Asl, AbsoluteX, 7);
    t[0x1F] = undoc(Slo, AbsoluteX, 7);

    // 0x20 - 0x2F
    t[0x20] = op(Jsr, Absolute, 6);
    t[0x21] = op(And, IndirectX, 6);
    t[0x22] = undoc(Kil, Implied, 2);
    t[0x23] = undoc(Rla, IndirectX, 8);
    t[0x24] = op(Bit, ZeroPage, 3);
    t[0x25] = op(And, ZeroPage, 3);
    t[0x26] = op(Rol, ZeroPage, 5);
    t[0x27] = undoc(Rla, ZeroPage, 5);
    t[0x28] = op(Plp, Implied, 4);
    t[0x29] = op(And, Immediate, 2);
    t[0x2A] = op(Rol, Accumulator, 2);
    t[0x2B] = undoc(Aac, Immediate, 2);
    t[0x2C] = op(Bit, Absolute, 4);
    t[0x2D] = op(And, Absolute, 4);
    t[0x2E] = op(Rol, Absolute, 6);
    t[0x2F] = undoc(Rla, Absolute, 6);

    // 0x30 - 0x3F
    t[0x30] = op(Bmi, Relative, 2);
    t[0x31] = op(And, IndirectY, 5);
    t[0x32] = undoc(Kil, Implied, 2);
    t[0x33] = undoc(Rla, IndirectY, 8);
    t[0x34] = undoc(Dop, ZeroPageX, 4);
    t[0x35] = op(And, ZeroPageX, 4);
    t[0x36] = op(Rol, ZeroPageX, 6);
    t[0x37] = undoc(Rla, ZeroPageX, 6);
    t[0x38] = op(Sec, Implied, 2);
    t[0x39] = op(And, AbsoluteY, 4);
    t[0x3A] = undoc(Nop, Implied, 2);
    t[0x3B] = undoc(Rla, AbsoluteY, 7);
    t[0x3C] = undoc(Top, AbsoluteX, 4);
    t[0x3D] = op(And, AbsoluteX, 4);
    t[0x3E] = op(Rol, AbsoluteX, 7);
    t[0x3F] = undoc(Rla, AbsoluteX, 7);

    // 0x40 - 0x4F
    t[0x40] = op(Rti, Implied, 6);
    t[0x41] = op(Eor, IndirectX, 6);
    t[0x42] = undoc(Kil, Implied, 2);
    t[0x43] = undoc(Sre, IndirectX, 8);
    t[0x44] = undoc(Dop, ZeroPage, 3);
    t[0x45] = op(Eor, ZeroPage, 3);
    t[0x46] = op(Lsr, ZeroPage, 5);
    t[0x47] = undoc(Sre, ZeroPage, 5);
    t[0x48] = op(Pha, Implied, 3);
    t[0x49] = op(Eor, Immediate, 2);
    t[0x4A] = op(Lsr, Accumulator, 2);
    t[0x4B] = undoc(Asr, Immediate, 2);
    t[0x4C] = op(Jmp, Absolute, 3);
    t[0x4D] = op(Eor, Absolute, 4);
    t[0x4E] = op(Lsr, Absolute, 6);
    t[0x4F] = undoc(Sre, Absolute, 6);

    // 0x50 - 0x5F
    t[0x50] = op(Bvc, Relative, 2);
    t[0x51] = op(Eor, IndirectY, 5);
    t[0x52] = undoc(Kil, Implied, 2);
    t[0x53] = undoc(Sre, IndirectY, 8);
    t[0x54] = undoc(Dop, ZeroPageX, 4);
    t[0x55] = op(Eor, ZeroPageX, 4);
    t[0x56] = op(Lsr, ZeroPageX, 6);
    t[0x57] = undoc(Sre, ZeroPageX, 6);
    t[0x58] = op(Cli, Implied, 2);
    t[0x59] = op(Eor, AbsoluteY, 4);
    t[0x5A] = undoc(Nop, Implied, 2);
    t[0x5B] = undoc(Sre, AbsoluteY, 7);
    t[0x5C] = undoc(Top, AbsoluteX, 4);
    t[0x5D] = op(Eor, AbsoluteX, 4);
    t[0x5E] = op(Lsr, AbsoluteX, 7);
    t[0x5F] = undoc(Sre, AbsoluteX, 7);

    // 0x60 - 0x6F
    t[0x60] = op(Rts, Implied, 6);
    t[0x61] = op(Adc, IndirectX, 6);
    t[0x62] = undoc(Kil, Implied, 2);
    t[0x63] = undoc(Rra, IndirectX, 8);
    t[0x64] = undoc(Dop, ZeroPage, 3);
    t[0x65] = op(Adc, ZeroPage, 3);
    t[0x66] = op(Ror, ZeroPage, 5);
    t[0x67] = undoc(Rra, ZeroPage, 5);
    t[0x68] = op(Pla, Implied, 4);
    t[0x69] = op(Adc, Immediate, 2);
    t[0x6A] = op(Ror, Accumulator, 2);
    t[0x6B] = undoc(Arr, Immediate, 2);
    t[0x6C] = op(Jmp, Indirect, 5);
    t[0x6D] = op(Adc, Absolute, 4);
    t[0x6E] = op(Ror, Absolute, 6);
    t[0x6F] = undoc(Rra, Absolute, 6);

    // 0x70 - 0x7F
    t[0x70] = op(Bvs, Relative, 2);
    t[0x71] = op(Adc, IndirectY, 5);
    t[0x72] = undoc(Kil, Implied, 2);
    t[0x73] = undoc(Rra, IndirectY, 8);
    t[0x74] = undoc(Dop, ZeroPageX, 4);
    t[0x75] = op(Adc, ZeroPageX, 4);
    t[0x76] = op(Ror, ZeroPageX, 6);
    t[0x77] = undoc(Rra, ZeroPageX, 6);
    t[0x78] = op(Sei, Implied, 2);
    t[0x79] = op(Adc, AbsoluteY, 4);
    t[0x7A] = undoc(Nop, Implied, 2);
    t[0x7B] = undoc(Rra, AbsoluteY, 7);
    t[0x7C] = undoc(Top, AbsoluteX, 4);
    t[0x7D] = op(Adc, AbsoluteX, 4);
    t[0x7E] = op(Ror, AbsoluteX, 7);
    t[0x7F] = undoc(Rra, AbsoluteX, 7);

    // 0x80 - 0x8F
    t[0x80] = undoc(Dop, Immediate, 2);
    t[0x81] = op(Sta, IndirectX, 6);
    t[0x82] = undoc(Dop, Immediate, 2);
    t[0x83] = undoc(Sax, IndirectX, 6);
    t[0x84] = op(Sty, ZeroPage, 3);
    t[0x85] = op(Sta, ZeroPage, 3);
    t[0x86] = op(Stx, ZeroPage, 3);
    t[0x87] = undoc(Sax, ZeroPage, 3);
    t[0x88] = op(Dey, Implied, 2);
    t[0x89] = undoc(Dop, Immediate, 2);
    t[0x8A] = op(Txa, Implied, 2);
    t[0x8B] = undoc(Xaa, Immediate, 2);
    t[0x8C] = op(Sty, Absolute, 4);
    t[0x8D] = op(Sta, Absolute, 4);
    t[0x8E] = op(Stx, Absolute, 4);
    t[0x8F] = undoc(Sax, Absolute, 4);

    // 0x90 - 0x9F
    t[0x90] = op(Bcc, Relative, 2);
    t[0x91] = op(Sta, IndirectY, 6);
    t[0x92] = undoc(Kil, Implied, 2);
    t[0x93] = undoc(Axa, IndirectY, 6);
    t[0x94] = op(Sty, ZeroPageX, 4);
    t[0x95] = op(Sta, ZeroPageX, 4);
    t[0x96] = op(Stx, ZeroPageY, 4);
    t[0x97] = undoc(Sax, ZeroPageY, 4);
    t[0x98] = op(Tya, Implied, 2);
    t[0x99] = op(Sta, AbsoluteY, 5);
    t[0x9A] = op(Txs, Implied, 2);
    t[0x9B] = undoc(Xas, AbsoluteY, 5);
    t[0x9C] = undoc(Sya, AbsoluteX, 5);
    t[0x9D] = op(Sta, AbsoluteX, 5);
    t[0x9E] = undoc(Sxa, AbsoluteY, 5);
    t[0x9F] = undoc(Axa, AbsoluteY, 5);

    // 0xA0 - 0xAF
    t[0xA0] = op(Ldy, Immediate, 2);
    t[0xA1] = op(Lda, IndirectX, 6);
    t[0xA2] = op(Ldx, Immediate, 2);
    t[0xA3] = undoc(Lax, IndirectX, 6);
    t[0xA4] = op(Ldy, ZeroPage, 3);
    t[0xA5] = op(Lda, ZeroPage, 3);
    t[0xA6] = op(Ldx, ZeroPage, 3);
    t[0xA7] = undoc(Lax, ZeroPage, 3);
    t[0xA8] = op(Tay, Implied, 2);
    t[0xA9] = op(Lda, Immediate, 2);
    t[0xAA] = op(Tax, Implied, 2);
    t[0xAB] = undoc(Atx, Immediate, 2);
    t[0xAC] = op(Ldy, Absolute, 4);
    t[0xAD] = op(Lda, Absolute, 4);
    t[0xAE] = op(Ldx, Absolute, 4);
    t[0xAF] = undoc(Lax, Absolute, 4);

    // 0xB0 - 0xBF
    t[0xB0] = op(Bcs, Relative, 2);
    t[0xB1] = op(Lda, IndirectY, 5);
    t[0xB2] = undoc(Kil, Implied, 2);
    t[0xB3] = undoc(Lax, IndirectY, 5);
    t[0xB4] = op(Ldy, ZeroPageX, 4);
    t[0xB5] = op(Lda, ZeroPageX, 4);
    t[0xB6] = op(Ldx, ZeroPageY, 4);
    t[0xB7] = undoc(Lax, ZeroPageY, 4);
    t[0xB8] = op(Clv, Implied, 2);
    t[0xB9] = op(Lda, AbsoluteY, 4);
    t[0xBA] = op(Tsx, Implied, 2);
    t[0xBB] = undoc(Lar, AbsoluteY, 4);
    t[0xBC] = op(Ldy, AbsoluteX, 4);
    t[0xBD] = op(Lda, AbsoluteX, 4);
    t[0xBE] = op(Ldx, AbsoluteY, 4);
    t[0xBF] = undoc(Lax, AbsoluteY, 4);

    // 0xC0 - 0xCF
    t[0xC0] = op(Cpy, Immediate, 2);
    t[0xC1] = op(Cmp, IndirectX, 6);
    t[0xC2] = undoc(Dop, Immediate, 2);
    t[0xC3] = undoc(Dcp, IndirectX, 8);
    t[0xC4] = op(Cpy, ZeroPage, 3);
    t[0xC5] = op(Cmp, ZeroPage, 3);
    t[0xC6] = op(Dec, ZeroPage, 5);
    t[0xC7] = undoc(Dcp, ZeroPage, 5);
    t[0xC8] = op(Iny, Implied, 2);
    t[0xC9] = op(Cmp, Immediate, 2);
    t[0xCA] = op(Dex, Implied, 2);
    t[0xCB] = undoc(Axs, Immediate, 2);
    t[0xCC] = op(Cpy, Absolute, 4);
    t[0xCD] = op(Cmp, Absolute, 4);
    t[0xCE] = op(Dec, Absolute, 6);
    t[0xCF] = undoc(Dcp, Absolute, 6);

    // 0xD0 - 0xDF
    t[0xD0] = op(Bne, Relative, 2);
    t[0xD1] = op(Cmp, IndirectY, 5);
    t[0xD2] = undoc(Kil, Implied, 2);
    t[0xD3] = undoc(Dcp, IndirectY, 8);
    t[0xD4] = undoc(Dop, ZeroPageX, 4);
    t[0xD5] = op(Cmp, ZeroPageX, 4);
    t[0xD6] = op(Dec, ZeroPageX, 6);
    t[0xD7] = undoc(Dcp, ZeroPageX, 6);
    t[0xD8] = op(Cld, Implied, 2);
    t[0xD9] = op(Cmp, AbsoluteY, 4);
    t[0xDA] = undoc(Nop, Implied, 2);
    t[0xDB] = undoc(Dcp, AbsoluteY, 7);
    t[0xDC] = undoc(Top, AbsoluteX, 4);
    t[0xDD] = op(Cmp, AbsoluteX, 4);
    t[0xDE] = op(Dec, AbsoluteX, 7);
    t[0xDF] = undoc(Dcp, AbsoluteX, 7);

    // 0xE0 - 0xEF
    t[0xE0] = op(Cpx, Immediate, 2);
    t[0xE1] = op(Sbc, IndirectX, 6);
    t[0xE2] = undoc(Dop, Immediate, 2);
    t[0xE3] = undoc(Isb, IndirectX, 8);
    t[0xE4] = op(Cpx, ZeroPage, 3);
    t[0xE5] = op(Sbc, ZeroPage, 3);
    t[0xE6] = op(Inc, ZeroPage, 5);
    t[0xE7] = undoc(Isb, ZeroPage, 5);
    t[0xE8] = op(Inx, Implied, 2);
    t[0xE9] = op(Sbc, Immediate, 2);
    t[0xEA] = op(Nop, Implied, 2);
    t[0xEB] = undoc(Sbc, Immediate, 2);
    t[0xEC] = op(Cpx, Absolute, 4);
    t[0xED] = op(Sbc, Absolute, 4);
    t[0xEE] = op(Inc, Absolute, 6);
    t[0xEF] = undoc(Isb, Absolute, 6);

    // 0xF0 - 0xFF
    t[0xF0] = op(Beq, Relative, 2);
    t[0xF1] = op(Sbc, IndirectY, 5);
    t[0xF2] = undoc(Kil, Implied, 2);
    t[0xF3] = undoc(Isb, IndirectY, 8);
    t[0xF4] = undoc(Dop, ZeroPageX, 4);
    t[0xF5] = op(Sbc, ZeroPageX, 4);
    t[0xF6] = op(Inc, ZeroPageX, 6);
    t[0xF7] = undoc(Isb, ZeroPageX, 6);
    t[0xF8] = op(Sed, Implied, 2);
    t[0xF9] = op(Sbc, AbsoluteY, 4);
    t[0xFA] = undoc(Nop, Implied, 2);
    t[0xFB] = undoc(Isb, AbsoluteY, 7);
    t[0xFC] = undoc(Top, AbsoluteX, 4);
    t[0xFD] = op(Sbc, AbsoluteX, 4);
    t[0xFE] = op(Inc, AbsoluteX, 7);
    t[0xFF] = undoc(Isb, AbsoluteX, 7);

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_decodes() {
        for opcode in 0..=255u8 {
            assert!(decode(opcode).is_some(), "no entry for ${opcode:02X}");
        }
    }

    #[test]
    fn official_count_matches_the_6502() {
        let official = (0..=255u8)
            .filter(|&b| decode(b).map(|o| o.official) == Some(true))
            .count();
        assert_eq!(official, 151);
    }

    #[test]
    fn spot_check_entries() {
        let lda = decode(0xA9).unwrap();
        assert_eq!(lda.mnemonic, Mnemonic::Lda);
        assert_eq!(lda.mode, AddressingMode::Immediate);
        assert_eq!(lda.cycles, 2);
        assert!(lda.official);

        let jmp = decode(0x6C).unwrap();
        assert_eq!(jmp.mnemonic, Mnemonic::Jmp);
        assert_eq!(jmp.mode, AddressingMode::Indirect);
        assert_eq!(jmp.cycles, 5);

        let sbc = decode(0xEB).unwrap();
        assert_eq!(sbc.mnemonic, Mnemonic::Sbc);
        assert!(!sbc.official);

        let kil = decode(0x02).unwrap();
        assert_eq!(kil.mnemonic, Mnemonic::Kil);
    }

    #[test]
    fn instruction_sizes_by_mode() {
        use AddressingMode::*;
        assert_eq!(bytes_consumed(Implied), 1);
        assert_eq!(bytes_consumed(Accumulator), 1);
        assert_eq!(bytes_consumed(Immediate), 2);
        assert_eq!(bytes_consumed(Relative), 2);
        assert_eq!(bytes_consumed(ZeroPage), 2);
        assert_eq!(bytes_consumed(ZeroPageX), 2);
        assert_eq!(bytes_consumed(ZeroPageY), 2);
        assert_eq!(bytes_consumed(IndirectX), 2);
        assert_eq!(bytes_consumed(IndirectY), 2);
        assert_eq!(bytes_consumed(Absolute), 3);
        assert_eq!(bytes_consumed(AbsoluteX), 3);
        assert_eq!(bytes_consumed(AbsoluteY), 3);
        assert_eq!(bytes_consumed(Indirect), 3);
    }

    #[test]
    fn undocumented_rows_disassemble_as_nop() {
        assert_eq!(decode(0x04).unwrap().mnemonic.name(), "NOP");
        assert_eq!(decode(0x0C).unwrap().mnemonic.name(), "NOP");
        assert_eq!(decode(0x1A).unwrap().mnemonic.name(), "NOP");
    }
}
