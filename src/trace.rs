//! nestest-format execution trace.
//!
//! Formatting a line reads through the bus but never mutates CPU state, so
//! the interpreter behaves identically whether or not a sink is attached.
//! Bytes the bus refuses to read render as `00`.

use crate::cpu::opcodes::{bytes_consumed, decode, AddressingMode, Mnemonic};
use crate::cpu::{Cpu, CpuBus};

fn peek(bus: &mut dyn CpuBus, addr: u16) -> u8 {
    bus.read(addr).unwrap_or(0)
}

/// Render the instruction at the current PC as one nestest reference line:
/// address, raw bytes, disassembly with the operand walk, then the register
/// file. Undocumented opcodes carry a `*` in front of the mnemonic.
pub fn trace_line(cpu: &Cpu, bus: &mut dyn CpuBus) -> String {
    let pc = cpu.pc;
    let opcode = peek(bus, pc);

    let op = match decode(opcode) {
        Some(op) => op,
        None => {
            return format!("{pc:04X}  {opcode:02X}        ???");
        }
    };

    let size = bytes_consumed(op.mode);
    let param1 = peek(bus, pc.wrapping_add(1));
    let param2 = peek(bus, pc.wrapping_add(2));
    let operand_word = ((param2 as u16) << 8) | param1 as u16;
    let addr = cpu.operand_address(bus, op.mode, pc).unwrap_or(0);
    let stored = peek(bus, addr);

    let bytes = match size {
        1 => format!("{opcode:02X}"),
        2 => format!("{opcode:02X} {param1:02X}"),
        _ => format!("{opcode:02X} {param1:02X} {param2:02X}"),
    };

    let annotation = match op.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${param1:02X}"),
        AddressingMode::Relative => format!("${addr:04X}"),
        AddressingMode::ZeroPage => format!("${param1:02X} = {stored:02X}"),
        AddressingMode::ZeroPageX => {
            format!("${param1:02X},X @ {addr:02X} = {stored:02X}")
        }
        AddressingMode::ZeroPageY => {
            format!("${param1:02X},Y @ {addr:02X} = {stored:02X}")
        }
        AddressingMode::Absolute => {
            if matches!(op.mnemonic, Mnemonic::Jmp | Mnemonic::Jsr) {
                format!("${addr:04X}")
            } else {
                format!("${addr:04X} = {stored:02X}")
            }
        }
        AddressingMode::AbsoluteX => {
            format!("${operand_word:04X},X @ {addr:04X} = {stored:02X}")
        }
        AddressingMode::AbsoluteY => {
            format!("${operand_word:04X},Y @ {addr:04X} = {stored:02X}")
        }
        AddressingMode::Indirect => format!("(${operand_word:04X}) = {addr:04X}"),
        AddressingMode::IndirectX => {
            let ptr = param1.wrapping_add(cpu.x);
            format!("(${param1:02X},X) @ {ptr:02X} = {addr:04X} = {stored:02X}")
        }
        AddressingMode::IndirectY => {
            let base = addr.wrapping_sub(cpu.y as u16);
            format!("(${param1:02X}),Y = {base:04X} @ {addr:04X} = {stored:02X}")
        }
    };

    let star = if op.official { ' ' } else { '*' };
    let disasm = format!("{} {}", op.mnemonic, annotation);

    format!(
        "{:04X}  {:<9}{}{:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        pc,
        bytes,
        star,
        disasm.trim_end(),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.status.bits(),
        cpu.sp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::Bus;
    use crate::cartridge::{Cartridge, PRG_ROM_PAGE_SIZE};

    fn bus_with_program(program: &[u8]) -> Bus {
        let mut prg = vec![0u8; PRG_ROM_PAGE_SIZE];
        prg[..program.len()].copy_from_slice(program);
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(b"NES\x1a");
        data[4] = 1;
        data.extend_from_slice(&prg);
        Bus::new(Cartridge::from_bytes(&data).unwrap())
    }

    #[test]
    fn formats_an_immediate_load() {
        let mut bus = bus_with_program(&[0xA9, 0x05]);
        let mut cpu = Cpu::new();
        cpu.reset_to(0x8000);

        let line = trace_line(&cpu, &mut bus);

        assert!(line.starts_with("8000  A9 05     LDA #$05"));
        assert_eq!(line.find("A:"), Some(48));
        assert!(line.ends_with("A:00 X:00 Y:00 P:24 SP:FD"));
    }

    #[test]
    fn formats_a_jump_without_operand_value() {
        let mut bus = bus_with_program(&[0x4C, 0xF5, 0xC5]);
        let mut cpu = Cpu::new();
        cpu.reset_to(0x8000);

        let line = trace_line(&cpu, &mut bus);

        assert!(line.starts_with("8000  4C F5 C5  JMP $C5F5"));
    }

    #[test]
    fn marks_undocumented_opcodes() {
        let mut bus = bus_with_program(&[0x04, 0x10]);
        let mut cpu = Cpu::new();
        cpu.reset_to(0x8000);

        let line = trace_line(&cpu, &mut bus);

        // The star sits in the column just before the mnemonic.
        assert_eq!(line.chars().nth(15), Some('*'));
        assert!(line.contains("*NOP $10"));
    }

    #[test]
    fn tracing_does_not_change_cpu_state() {
        let mut bus = bus_with_program(&[0xA9, 0x05]);
        let mut cpu = Cpu::new();
        cpu.reset_to(0x8000);

        let _ = trace_line(&cpu, &mut bus);

        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.status.bits(), 0x24);
        assert_eq!(cpu.cycles(), 0);
    }
}
