//! Session aggregate wiring a CPU to its bus for the lifetime of one ROM.

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, StepOutcome};
use crate::fault::Fault;
use crate::trace;

pub struct Nes {
    pub cpu: Cpu,
    pub bus: Bus,
}

impl Nes {
    pub fn new(cartridge: Cartridge) -> Self {
        Nes {
            cpu: Cpu::new(),
            bus: Bus::new(cartridge),
        }
    }

    pub fn from_file(path: &str) -> std::io::Result<Self> {
        Ok(Self::new(Cartridge::load(path)?))
    }

    /// Reset through the `0xFFFC` vector.
    pub fn reset(&mut self) -> Result<(), Fault> {
        self.cpu.reset(&mut self.bus)
    }

    /// Reset with an explicit entry point (test harnesses; nestest uses
    /// `0xC000`).
    pub fn reset_to(&mut self, entry: u16) {
        self.cpu.reset_to(entry);
    }

    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        self.cpu.step(&mut self.bus)
    }

    /// Execute until BRK.
    pub fn run(&mut self) -> Result<(), Fault> {
        loop {
            if let StepOutcome::Halted = self.step()? {
                return Ok(());
            }
        }
    }

    /// Execute until BRK, handing each instruction's trace line to `sink`
    /// before it runs.
    pub fn run_traced(&mut self, sink: &mut dyn FnMut(&str)) -> Result<(), Fault> {
        loop {
            let line = trace::trace_line(&self.cpu, &mut self.bus);
            sink(&line);
            if let StepOutcome::Halted = self.step()? {
                return Ok(());
            }
        }
    }
}
