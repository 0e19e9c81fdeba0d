//! The 2A03 (6502) interpreter: register file, status flags, addressing-mode
//! resolution and the fetch/execute loop.
//!
//! Decimal mode is tracked as a flag but never alters the ALU, matching the
//! NES part.

use bitflags::bitflags;

use crate::fault::Fault;

pub mod opcodes;


use opcodes::{bytes_consumed, decode, AddressingMode, Mnemonic, OpCode};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

pub const STACK_BASE: u16 = 0x0100;
pub const STACK_RESET: u8 = 0xFD;
const STATUS_RESET: u8 = 0x24;

const NMI_VECTOR: u16 = 0xFFFA;
const RESET_VECTOR: u16 = 0xFFFC;
const IRQ_VECTOR: u16 = 0xFFFE;

/// Everything the CPU can see: a 16-bit address space of bytes.
///
/// The 16-bit accessors are plain little-endian pairs; the 6502's page-wrap
/// quirks live in the addressing-mode resolution, not here.
pub trait CpuBus {
    fn read(&mut self, addr: u16) -> Result<u8, Fault>;
    fn write(&mut self, addr: u16, data: u8) -> Result<(), Fault>;

    fn read_u16(&mut self, addr: u16) -> Result<u16, Fault> {
        let low = self.read(addr)? as u16;
        let high = self.read(addr.wrapping_add(1))? as u16;
        Ok((high << 8) | low)
    }

    fn write_u16(&mut self, addr: u16, data: u16) -> Result<(), Fault> {
        self.write(addr, (data & 0xFF) as u8)?;
        self.write(addr.wrapping_add(1), (data >> 8) as u8)
    }
}

/// What a single `step` did with the instruction stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Instruction retired; carries its base cycle count.
    Continue(u8),
    /// BRK reached; the run loop is done.
    Halted,
}

/// How an executed instruction left the program counter.
enum Flow {
    Next,
    Jumped,
    Halted,
}

pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: StatusFlags,
    cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: STACK_RESET,
            pc: 0,
            status: StatusFlags::from_bits_truncate(STATUS_RESET),
            cycles: 0,
        }
    }

    /// Power-on / reset: clear the register file and load PC from the reset
    /// vector at `0xFFFC`.
    pub fn reset(&mut self, bus: &mut dyn CpuBus) -> Result<(), Fault> {
        self.reset_registers();
        self.pc = bus.read_u16(RESET_VECTOR)?;
        log::debug!("reset: PC <- ${:04X} from vector", self.pc);
        Ok(())
    }

    /// Reset with an explicit entry point instead of the vector. Used by test
    /// harnesses (nestest enters at `0xC000`).
    pub fn reset_to(&mut self, entry: u16) {
        self.reset_registers();
        self.pc = entry;
    }

    fn reset_registers(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = STACK_RESET;
        self.status = StatusFlags::from_bits_truncate(STATUS_RESET);
        self.cycles = 0;
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Fetch, decode, resolve the operand address and execute one
    /// instruction. PC advances by the instruction size unless the semantics
    /// placed it somewhere themselves.
    pub fn step(&mut self, bus: &mut dyn CpuBus) -> Result<StepOutcome, Fault> {
        let opcode_pc = self.pc;
        let opcode = bus.read(opcode_pc)?;
        let op = decode(opcode).ok_or(Fault::UnknownOpcode {
            opcode,
            pc: opcode_pc,
        })?;
        let addr = self.operand_address(bus, op.mode, opcode_pc)?;

        match self.execute(bus, &op, opcode, opcode_pc, addr)? {
            Flow::Halted => return Ok(StepOutcome::Halted),
            Flow::Jumped => {}
            Flow::Next => self.pc = opcode_pc.wrapping_add(bytes_consumed(op.mode)),
        }

        self.cycles += op.cycles as u64;
        Ok(StepOutcome::Continue(op.cycles))
    }

    /// Non-maskable interrupt entry: push PC and status (B clear), set I,
    /// vector through `0xFFFA`.
    pub fn nmi(&mut self, bus: &mut dyn CpuBus) -> Result<(), Fault> {
        self.push_u16(bus, self.pc)?;
        self.push(bus, self.status.bits() & !StatusFlags::BREAK.bits())?;
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.pc = bus.read_u16(NMI_VECTOR)?;
        self.cycles += 7;
        Ok(())
    }

    /// Maskable interrupt entry; ignored while I is set.
    pub fn irq(&mut self, bus: &mut dyn CpuBus) -> Result<(), Fault> {
        if self.status.contains(StatusFlags::INTERRUPT_DISABLE) {
            return Ok(());
        }
        self.push_u16(bus, self.pc)?;
        self.push(bus, self.status.bits() & !StatusFlags::BREAK.bits())?;
        self.status.insert(StatusFlags::INTERRUPT_DISABLE);
        self.pc = bus.read_u16(IRQ_VECTOR)?;
        self.cycles += 7;
        Ok(())
    }

    /// Resolve the effective operand address for `mode`, given the address of
    /// the opcode byte. For Relative this is the branch target; Implied and
    /// Accumulator have no operand and resolve to 0, which no semantic reads.
    pub(crate) fn operand_address(
        &self,
        bus: &mut dyn CpuBus,
        mode: AddressingMode,
        opcode_pc: u16,
    ) -> Result<u16, Fault> {
        match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => Ok(0),
            AddressingMode::Immediate => Ok(opcode_pc.wrapping_add(1)),
            AddressingMode::Relative => {
                let offset = bus.read(opcode_pc.wrapping_add(1))? as i8;
                // i8 -> u16 sign-extends, so wrapping_add walks backwards for
                // negative offsets.
                Ok(opcode_pc.wrapping_add(2).wrapping_add(offset as u16))
            }
            AddressingMode::ZeroPage => Ok(bus.read(opcode_pc.wrapping_add(1))? as u16),
            AddressingMode::ZeroPageX => {
                let base = bus.read(opcode_pc.wrapping_add(1))?;
                Ok(base.wrapping_add(self.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                let base = bus.read(opcode_pc.wrapping_add(1))?;
                Ok(base.wrapping_add(self.y) as u16)
            }
            AddressingMode::Absolute => bus.read_u16(opcode_pc.wrapping_add(1)),
            AddressingMode::AbsoluteX => {
                let base = bus.read_u16(opcode_pc.wrapping_add(1))?;
                Ok(base.wrapping_add(self.x as u16))
            }
            AddressingMode::AbsoluteY => {
                let base = bus.read_u16(opcode_pc.wrapping_add(1))?;
                Ok(base.wrapping_add(self.y as u16))
            }
            AddressingMode::Indirect => {
                let ptr = bus.read_u16(opcode_pc.wrapping_add(1))?;
                let low = bus.read(ptr)? as u16;
                // When the pointer sits at the end of a page the high byte is
                // fetched from the start of that same page, not the next one.
                let high = if ptr & 0x00FF == 0x00FF {
                    bus.read(ptr & 0xFF00)? as u16
                } else {
                    bus.read(ptr.wrapping_add(1))? as u16
                };
                Ok((high << 8) | low)
            }
            AddressingMode::IndirectX => {
                let base = bus.read(opcode_pc.wrapping_add(1))?;
                let ptr = base.wrapping_add(self.x);
                let low = bus.read(ptr as u16)? as u16;
                let high = bus.read(ptr.wrapping_add(1) as u16)? as u16;
                Ok((high << 8) | low)
            }
            AddressingMode::IndirectY => {
                let base = bus.read(opcode_pc.wrapping_add(1))?;
                let low = bus.read(base as u16)? as u16;
                let high = bus.read(base.wrapping_add(1) as u16)? as u16;
                Ok(((high << 8) | low).wrapping_add(self.y as u16))
            }
        }
    }

    fn execute(
        &mut self,
        bus: &mut dyn CpuBus,
        op: &OpCode,
        opcode: u8,
        opcode_pc: u16,
        addr: u16,
    ) -> Result<Flow, Fault> {
        let flow = match op.mnemonic {
            // Loads and stores.
            Mnemonic::Lda => {
                self.a = bus.read(addr)?;
                self.set_zero_negative_flags(self.a);
                Flow::Next
            }
            Mnemonic::Ldx => {
                self.x = bus.read(addr)?;
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Ldy => {
                self.y = bus.read(addr)?;
                self.set_zero_negative_flags(self.y);
                Flow::Next
            }
            Mnemonic::Sta => {
                bus.write(addr, self.a)?;
                Flow::Next
            }
            Mnemonic::Stx => {
                bus.write(addr, self.x)?;
                Flow::Next
            }
            Mnemonic::Sty => {
                bus.write(addr, self.y)?;
                Flow::Next
            }

            // Register transfers.
            Mnemonic::Tax => {
                self.x = self.a;
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.set_zero_negative_flags(self.y);
                Flow::Next
            }
            Mnemonic::Tsx => {
                self.x = self.sp;
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.set_zero_negative_flags(self.a);
                Flow::Next
            }
            Mnemonic::Tya => {
                self.a = self.y;
                self.set_zero_negative_flags(self.a);
                Flow::Next
            }
            Mnemonic::Txs => {
                self.sp = self.x;
                Flow::Next
            }

            // Arithmetic.
            Mnemonic::Adc => {
                let value = bus.read(addr)?;
                self.adc(value);
                Flow::Next
            }
            Mnemonic::Sbc => {
                let value = bus.read(addr)?;
                self.adc(!value);
                Flow::Next
            }

            // Logic.
            Mnemonic::And => {
                let value = bus.read(addr)?;
                self.and(value);
                Flow::Next
            }
            Mnemonic::Ora => {
                let value = bus.read(addr)?;
                self.ora(value);
                Flow::Next
            }
            Mnemonic::Eor => {
                let value = bus.read(addr)?;
                self.eor(value);
                Flow::Next
            }
            Mnemonic::Bit => {
                let value = bus.read(addr)?;
                self.status
                    .set(StatusFlags::ZERO, self.a & value == 0);
                self.status.set(StatusFlags::OVERFLOW, value & 0x40 != 0);
                self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
                Flow::Next
            }

            // Shifts and rotates, on A or on memory.
            Mnemonic::Asl => {
                if op.mode == AddressingMode::Accumulator {
                    self.a = self.asl(self.a);
                } else {
                    let value = bus.read(addr)?;
                    let result = self.asl(value);
                    bus.write(addr, result)?;
                }
                Flow::Next
            }
            Mnemonic::Lsr => {
                if op.mode == AddressingMode::Accumulator {
                    self.a = self.lsr(self.a);
                } else {
                    let value = bus.read(addr)?;
                    let result = self.lsr(value);
                    bus.write(addr, result)?;
                }
                Flow::Next
            }
            Mnemonic::Rol => {
                if op.mode == AddressingMode::Accumulator {
                    self.a = self.rol(self.a);
                } else {
                    let value = bus.read(addr)?;
                    let result = self.rol(value);
                    bus.write(addr, result)?;
                }
                Flow::Next
            }
            Mnemonic::Ror => {
                if op.mode == AddressingMode::Accumulator {
                    self.a = self.ror(self.a);
                } else {
                    let value = bus.read(addr)?;
                    let result = self.ror(value);
                    bus.write(addr, result)?;
                }
                Flow::Next
            }

            // Increments and decrements.
            Mnemonic::Inc => {
                let result = bus.read(addr)?.wrapping_add(1);
                bus.write(addr, result)?;
                self.set_zero_negative_flags(result);
                Flow::Next
            }
            Mnemonic::Dec => {
                let result = bus.read(addr)?.wrapping_sub(1);
                bus.write(addr, result)?;
                self.set_zero_negative_flags(result);
                Flow::Next
            }
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_zero_negative_flags(self.y);
                Flow::Next
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_zero_negative_flags(self.y);
                Flow::Next
            }

            // Compares.
            Mnemonic::Cmp => {
                let value = bus.read(addr)?;
                self.compare(self.a, value);
                Flow::Next
            }
            Mnemonic::Cpx => {
                let value = bus.read(addr)?;
                self.compare(self.x, value);
                Flow::Next
            }
            Mnemonic::Cpy => {
                let value = bus.read(addr)?;
                self.compare(self.y, value);
                Flow::Next
            }

            // Branches; `addr` is the precomputed Relative target.
            Mnemonic::Bcc => self.branch(!self.status.contains(StatusFlags::CARRY), addr),
            Mnemonic::Bcs => self.branch(self.status.contains(StatusFlags::CARRY), addr),
            Mnemonic::Bne => self.branch(!self.status.contains(StatusFlags::ZERO), addr),
            Mnemonic::Beq => self.branch(self.status.contains(StatusFlags::ZERO), addr),
            Mnemonic::Bpl => self.branch(!self.status.contains(StatusFlags::NEGATIVE), addr),
            Mnemonic::Bmi => self.branch(self.status.contains(StatusFlags::NEGATIVE), addr),
            Mnemonic::Bvc => self.branch(!self.status.contains(StatusFlags::OVERFLOW), addr),
            Mnemonic::Bvs => self.branch(self.status.contains(StatusFlags::OVERFLOW), addr),

            // Jumps and returns.
            Mnemonic::Jmp => {
                self.pc = addr;
                Flow::Jumped
            }
            Mnemonic::Jsr => {
                let return_addr = opcode_pc.wrapping_add(bytes_consumed(op.mode) - 1);
                self.push_u16(bus, return_addr)?;
                self.pc = addr;
                Flow::Jumped
            }
            Mnemonic::Rts => {
                self.pc = self.pull_u16(bus)?.wrapping_add(1);
                Flow::Jumped
            }
            Mnemonic::Rti => {
                self.pull_status(bus)?;
                self.pc = self.pull_u16(bus)?;
                Flow::Jumped
            }

            // Stack.
            Mnemonic::Pha => {
                self.push(bus, self.a)?;
                Flow::Next
            }
            Mnemonic::Pla => {
                self.a = self.pull(bus)?;
                self.set_zero_negative_flags(self.a);
                Flow::Next
            }
            Mnemonic::Php => {
                // The stack image always carries both break bits set.
                self.push(
                    bus,
                    self.status.bits() | StatusFlags::BREAK.bits() | StatusFlags::UNUSED.bits(),
                )?;
                Flow::Next
            }
            Mnemonic::Plp => {
                self.pull_status(bus)?;
                Flow::Next
            }

            // Flag toggles.
            Mnemonic::Clc => {
                self.status.remove(StatusFlags::CARRY);
                Flow::Next
            }
            Mnemonic::Sec => {
                self.status.insert(StatusFlags::CARRY);
                Flow::Next
            }
            Mnemonic::Cld => {
                self.status.remove(StatusFlags::DECIMAL);
                Flow::Next
            }
            Mnemonic::Sed => {
                self.status.insert(StatusFlags::DECIMAL);
                Flow::Next
            }
            Mnemonic::Cli => {
                self.status.remove(StatusFlags::INTERRUPT_DISABLE);
                Flow::Next
            }
            Mnemonic::Sei => {
                self.status.insert(StatusFlags::INTERRUPT_DISABLE);
                Flow::Next
            }
            Mnemonic::Clv => {
                self.status.remove(StatusFlags::OVERFLOW);
                Flow::Next
            }

            Mnemonic::Nop | Mnemonic::Dop | Mnemonic::Top => Flow::Next,

            Mnemonic::Brk => Flow::Halted,

            // Undocumented opcodes: compositions of the documented semantics.
            Mnemonic::Lax => {
                let value = bus.read(addr)?;
                self.a = value;
                self.x = value;
                self.set_zero_negative_flags(value);
                Flow::Next
            }
            Mnemonic::Sax => {
                bus.write(addr, self.a & self.x)?;
                Flow::Next
            }
            Mnemonic::Dcp => {
                let result = bus.read(addr)?.wrapping_sub(1);
                bus.write(addr, result)?;
                self.compare(self.a, result);
                Flow::Next
            }
            Mnemonic::Isb => {
                let result = bus.read(addr)?.wrapping_add(1);
                bus.write(addr, result)?;
                self.adc(!result);
                Flow::Next
            }
            Mnemonic::Slo => {
                let value = bus.read(addr)?;
                let result = self.asl(value);
                bus.write(addr, result)?;
                self.ora(result);
                Flow::Next
            }
            Mnemonic::Rla => {
                let value = bus.read(addr)?;
                let result = self.rol(value);
                bus.write(addr, result)?;
                self.and(result);
                Flow::Next
            }
            Mnemonic::Sre => {
                let value = bus.read(addr)?;
                let result = self.lsr(value);
                bus.write(addr, result)?;
                self.eor(result);
                Flow::Next
            }
            Mnemonic::Rra => {
                let value = bus.read(addr)?;
                let result = self.ror(value);
                bus.write(addr, result)?;
                self.adc(result);
                Flow::Next
            }
            Mnemonic::Aac => {
                let value = bus.read(addr)?;
                self.and(value);
                self.status.set(
                    StatusFlags::CARRY,
                    self.status.contains(StatusFlags::NEGATIVE),
                );
                Flow::Next
            }
            Mnemonic::Asr => {
                let value = bus.read(addr)?;
                self.and(value);
                self.a = self.lsr(self.a);
                Flow::Next
            }
            Mnemonic::Arr => {
                let value = bus.read(addr)?;
                let carry_in = if self.status.contains(StatusFlags::CARRY) {
                    0x80
                } else {
                    0
                };
                self.a = ((self.a & value) >> 1) | carry_in;
                self.set_zero_negative_flags(self.a);
                self.status.set(StatusFlags::CARRY, self.a & 0x40 != 0);
                self.status.set(
                    StatusFlags::OVERFLOW,
                    ((self.a >> 6) ^ (self.a >> 5)) & 1 != 0,
                );
                Flow::Next
            }
            Mnemonic::Atx => {
                let value = bus.read(addr)?;
                self.and(value);
                self.x = self.a;
                Flow::Next
            }
            Mnemonic::Axs => {
                let value = bus.read(addr)?;
                let masked = self.a & self.x;
                self.x = masked.wrapping_sub(value);
                self.status.set(StatusFlags::CARRY, masked >= value);
                self.set_zero_negative_flags(self.x);
                Flow::Next
            }
            Mnemonic::Axa => {
                let high_plus_1 = ((addr >> 8) as u8).wrapping_add(1);
                bus.write(addr, self.a & self.x & high_plus_1)?;
                Flow::Next
            }
            Mnemonic::Sxa => {
                let high_plus_1 = ((addr >> 8) as u8).wrapping_add(1);
                bus.write(addr, self.x & high_plus_1)?;
                Flow::Next
            }
            Mnemonic::Sya => {
                let high_plus_1 = ((addr >> 8) as u8).wrapping_add(1);
                bus.write(addr, self.y & high_plus_1)?;
                Flow::Next
            }
            Mnemonic::Xas => {
                self.sp = self.a & self.x;
                let high_plus_1 = ((addr >> 8) as u8).wrapping_add(1);
                bus.write(addr, self.sp & high_plus_1)?;
                Flow::Next
            }
            Mnemonic::Lar => {
                let value = bus.read(addr)? & self.sp;
                self.a = value;
                self.x = value;
                self.sp = value;
                self.set_zero_negative_flags(value);
                Flow::Next
            }

            Mnemonic::Kil | Mnemonic::Xaa => {
                return Err(Fault::UnstableOpcode {
                    opcode,
                    pc: opcode_pc,
                });
            }
        };
        Ok(flow)
    }

    // Shared instruction semantics.

    fn set_zero_negative_flags(&mut self, value: u8) {
        self.status.set(StatusFlags::ZERO, value == 0);
        self.status.set(StatusFlags::NEGATIVE, value & 0x80 != 0);
    }

    fn adc(&mut self, value: u8) {
        let carry = if self.status.contains(StatusFlags::CARRY) {
            1
        } else {
            0
        };
        let result = self.a as u16 + value as u16 + carry;

        self.status.set(StatusFlags::CARRY, result > 0xFF);
        self.status.set(
            StatusFlags::OVERFLOW,
            (self.a ^ result as u8) & (value ^ result as u8) & 0x80 != 0,
        );

        self.a = result as u8;
        self.set_zero_negative_flags(self.a);
    }

    fn and(&mut self, value: u8) {
        self.a &= value;
        self.set_zero_negative_flags(self.a);
    }

    fn ora(&mut self, value: u8) {
        self.a |= value;
        self.set_zero_negative_flags(self.a);
    }

    fn eor(&mut self, value: u8) {
        self.a ^= value;
        self.set_zero_negative_flags(self.a);
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = value << 1;
        self.set_zero_negative_flags(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = value >> 1;
        self.set_zero_negative_flags(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry = if self.status.contains(StatusFlags::CARRY) {
            1
        } else {
            0
        };
        self.status.set(StatusFlags::CARRY, value & 0x80 != 0);
        let result = (value << 1) | carry;
        self.set_zero_negative_flags(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry = if self.status.contains(StatusFlags::CARRY) {
            0x80
        } else {
            0
        };
        self.status.set(StatusFlags::CARRY, value & 0x01 != 0);
        let result = (value >> 1) | carry;
        self.set_zero_negative_flags(result);
        result
    }

    fn compare(&mut self, reg: u8, value: u8) {
        let result = reg.wrapping_sub(value);
        self.status.set(StatusFlags::CARRY, reg >= value);
        self.status.set(StatusFlags::ZERO, reg == value);
        self.status.set(StatusFlags::NEGATIVE, result & 0x80 != 0);
    }

    fn branch(&mut self, condition: bool, target: u16) -> Flow {
        if condition {
            self.pc = target;
            Flow::Jumped
        } else {
            Flow::Next
        }
    }

    // Stack discipline: empty-descending at 0x0100..=0x01FF.

    fn push(&mut self, bus: &mut dyn CpuBus, value: u8) -> Result<(), Fault> {
        bus.write(STACK_BASE + self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    fn pull(&mut self, bus: &mut dyn CpuBus) -> Result<u8, Fault> {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE + self.sp as u16)
    }

    fn push_u16(&mut self, bus: &mut dyn CpuBus, value: u16) -> Result<(), Fault> {
        self.push(bus, (value >> 8) as u8)?;
        self.push(bus, value as u8)
    }

    fn pull_u16(&mut self, bus: &mut dyn CpuBus) -> Result<u16, Fault> {
        let low = self.pull(bus)? as u16;
        let high = self.pull(bus)? as u16;
        Ok((high << 8) | low)
    }

    /// PLP/RTI: the running status ignores the pushed break bit and always
    /// has bit 5 set.
    fn pull_status(&mut self, bus: &mut dyn CpuBus) -> Result<(), Fault> {
        let bits = self.pull(bus)?;
        self.status = StatusFlags::from_bits_truncate(bits);
        self.status.remove(StatusFlags::BREAK);
        self.status.insert(StatusFlags::UNUSED);
        Ok(())
    }
}
