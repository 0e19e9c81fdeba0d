//! famicore: the CPU-side core of an NES emulator.
//!
//! A 2A03 (6502) interpreter covering the official and undocumented opcode
//! sets, the address-decoding bus with RAM and PPU-register mirroring, and
//! mapper-0 PRG-ROM windowing. The PPU itself, the APU and controllers are
//! external; the bus exposes a register hook for a PPU to plug into.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod fault;
pub mod nes;
pub mod trace;

pub use bus::{Bus, NullPpu, PpuRegisters};
pub use cartridge::{Cartridge, Mirroring};
pub use cpu::{Cpu, CpuBus, StatusFlags, StepOutcome};
pub use fault::{Access, Fault};
pub use nes::Nes;
