//! Fatal conditions of the interpreter and bus.
//!
//! None of these are recoverable: each one means the ROM or the emulator has
//! done something the hardware model cannot continue from, and the run loop
//! surfaces it with the offending address or opcode byte.

use std::fmt;

/// Direction of a bus access, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Opcode byte with no entry in the decode table.
    UnknownOpcode { opcode: u8, pc: u16 },
    /// KIL jams the processor; XAA has no reliable hardware behavior.
    UnstableOpcode { opcode: u8, pc: u16 },
    /// Access into a region the core does not map (APU/IO/SRAM window).
    UnmappedAddress { addr: u16, access: Access },
    /// Store aimed at the read-only cartridge window.
    PrgRomWrite { addr: u16 },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode ${opcode:02X} at PC ${pc:04X}")
            }
            Fault::UnstableOpcode { opcode, pc } => {
                write!(f, "unstable opcode ${opcode:02X} at PC ${pc:04X}")
            }
            Fault::UnmappedAddress { addr, access } => {
                write!(f, "{access} of unmapped address ${addr:04X}")
            }
            Fault::PrgRomWrite { addr } => {
                write!(f, "write to PRG-ROM address ${addr:04X}")
            }
        }
    }
}

impl std::error::Error for Fault {}
