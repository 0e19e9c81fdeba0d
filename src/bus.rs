use crate::cartridge::Cartridge;
use crate::cpu::CpuBus;
use crate::fault::{Access, Fault};

pub const RAM_SIZE: usize = 0x800;

/// The eight CPU-visible PPU registers, addressed by index `0..8`.
///
/// The core itself has no PPU; a front-end that does plugs one in through this
/// trait. Hooks are synchronous and must not call back into the bus.
pub trait PpuRegisters {
    fn read_register(&mut self, reg: u8) -> u8;
    fn write_register(&mut self, reg: u8, data: u8);
}

/// Stand-in used when no PPU is attached: reads are 0, writes are discarded.
pub struct NullPpu;

impl PpuRegisters for NullPpu {
    fn read_register(&mut self, _reg: u8) -> u8 {
        0
    }

    fn write_register(&mut self, _reg: u8, _data: u8) {}
}

/// The CPU-side address bus.
///
/// Decodes every 16-bit address into internal RAM (with its mirrors), the
/// PPU-register window (with its mirrors), or the cartridge PRG-ROM window.
/// The APU/IO/SRAM range is unmapped in this core and any touch of it is a
/// `Fault`, as is a store aimed at PRG-ROM.
pub struct Bus {
    ram: [u8; RAM_SIZE],
    cartridge: Cartridge,
    ppu: Box<dyn PpuRegisters>,
}

impl Bus {
    pub fn new(cartridge: Cartridge) -> Self {
        Self::with_ppu(cartridge, Box::new(NullPpu))
    }

    pub fn with_ppu(cartridge: Cartridge, ppu: Box<dyn PpuRegisters>) -> Self {
        Bus {
            ram: [0; RAM_SIZE],
            cartridge,
            ppu,
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }
}

impl CpuBus for Bus {
    fn read(&mut self, addr: u16) -> Result<u8, Fault> {
        match addr {
            // 2 KiB of RAM mirrored through 0x1FFF.
            0x0000..=0x1FFF => Ok(self.ram[(addr & 0x07FF) as usize]),
            // PPU registers mirror every 8 bytes up to 0x3FFF.
            0x2000..=0x3FFF => {
                let reg = (addr & 0x0007) as u8;
                Ok(self.ppu.read_register(reg))
            }
            0x4000..=0x7FFF => Err(Fault::UnmappedAddress {
                addr,
                access: Access::Read,
            }),
            0x8000..=0xFFFF => Ok(self.cartridge.read_prg(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), Fault> {
        match addr {
            0x0000..=0x1FFF => {
                self.ram[(addr & 0x07FF) as usize] = data;
                Ok(())
            }
            0x2000..=0x3FFF => {
                let reg = (addr & 0x0007) as u8;
                self.ppu.write_register(reg, data);
                Ok(())
            }
            0x4000..=0x7FFF => Err(Fault::UnmappedAddress {
                addr,
                access: Access::Write,
            }),
            0x8000..=0xFFFF => Err(Fault::PrgRomWrite { addr }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::PRG_ROM_PAGE_SIZE;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_cartridge(prg: &[u8]) -> Cartridge {
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(b"NES\x1a");
        data[4] = (prg.len() / PRG_ROM_PAGE_SIZE) as u8;
        data.extend_from_slice(prg);
        Cartridge::from_bytes(&data).unwrap()
    }

    fn test_bus() -> Bus {
        Bus::new(test_cartridge(&vec![0u8; PRG_ROM_PAGE_SIZE]))
    }

    #[test]
    fn ram_mirrors_every_0x800() {
        let mut bus = test_bus();
        bus.write(0x0042, 0xAB).unwrap();
        assert_eq!(bus.read(0x0042).unwrap(), 0xAB);
        assert_eq!(bus.read(0x0842).unwrap(), 0xAB);
        assert_eq!(bus.read(0x1042).unwrap(), 0xAB);
        assert_eq!(bus.read(0x1842).unwrap(), 0xAB);

        bus.write(0x1F00, 0xCD).unwrap();
        assert_eq!(bus.read(0x0700).unwrap(), 0xCD);
    }

    #[test]
    fn read_u16_is_little_endian() {
        let mut bus = test_bus();
        bus.write(0x0010, 0x34).unwrap();
        bus.write(0x0011, 0x12).unwrap();
        assert_eq!(bus.read_u16(0x0010).unwrap(), 0x1234);

        bus.write_u16(0x0020, 0xBEEF).unwrap();
        assert_eq!(bus.read(0x0020).unwrap(), 0xEF);
        assert_eq!(bus.read(0x0021).unwrap(), 0xBE);
    }

    #[test]
    fn unmapped_region_faults() {
        let mut bus = test_bus();
        assert_eq!(
            bus.read(0x4242),
            Err(Fault::UnmappedAddress {
                addr: 0x4242,
                access: Access::Read
            })
        );
        assert_eq!(
            bus.write(0x6000, 1),
            Err(Fault::UnmappedAddress {
                addr: 0x6000,
                access: Access::Write
            })
        );
    }

    #[test]
    fn prg_rom_write_faults() {
        let mut bus = test_bus();
        assert_eq!(bus.write(0x8000, 1), Err(Fault::PrgRomWrite { addr: 0x8000 }));
        assert_eq!(bus.write(0xFFFF, 1), Err(Fault::PrgRomWrite { addr: 0xFFFF }));
    }

    #[test]
    fn prg_16k_window_mirrors() {
        let mut prg = vec![0u8; PRG_ROM_PAGE_SIZE];
        prg[0] = 0xAA;
        let mut bus = Bus::new(test_cartridge(&prg));
        assert_eq!(bus.read(0x8000).unwrap(), 0xAA);
        assert_eq!(bus.read(0xC000).unwrap(), 0xAA);
    }

    struct RecordingPpu {
        log: Rc<RefCell<Vec<(u8, u8)>>>,
    }

    impl PpuRegisters for RecordingPpu {
        fn read_register(&mut self, reg: u8) -> u8 {
            reg | 0x40
        }

        fn write_register(&mut self, reg: u8, data: u8) {
            self.log.borrow_mut().push((reg, data));
        }
    }

    #[test]
    fn ppu_registers_mirror_every_8_bytes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let ppu = RecordingPpu { log: log.clone() };
        let mut bus = Bus::with_ppu(test_cartridge(&vec![0u8; PRG_ROM_PAGE_SIZE]), Box::new(ppu));

        // 0x2008 and 0x3FF9 collapse onto registers 0 and 1.
        bus.write(0x2008, 0x11).unwrap();
        bus.write(0x3FF9, 0x22).unwrap();
        assert_eq!(*log.borrow(), vec![(0, 0x11), (1, 0x22)]);

        assert_eq!(bus.read(0x2002).unwrap(), 0x42);
        assert_eq!(bus.read(0x3FFA).unwrap(), 0x42);
    }

    #[test]
    fn null_ppu_reads_zero() {
        let mut bus = test_bus();
        bus.write(0x2006, 0x3F).unwrap();
        assert_eq!(bus.read(0x2007).unwrap(), 0);
    }
}
