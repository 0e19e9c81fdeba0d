use std::fs::File;
use std::io::{Error, ErrorKind, Read, Result};

pub const PRG_ROM_PAGE_SIZE: usize = 16 * 1024;
pub const CHR_ROM_PAGE_SIZE: usize = 8 * 1024;
const TRAINER_SIZE: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// An iNES-1 cartridge image. Only the PRG side is consumed by the CPU core;
/// CHR, mirroring and mapper number are carried for the PPU-side consumers.
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mapper: u8,
    mirroring: Mirroring,
}

impl Cartridge {
    pub fn load(path: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 16 || &data[0..4] != b"NES\x1a" {
            return Err(Error::new(
                ErrorKind::InvalidData,
                "not an iNES file (bad magic)",
            ));
        }

        let prg_rom_size = data[4] as usize * PRG_ROM_PAGE_SIZE;
        let chr_rom_size = data[5] as usize * CHR_ROM_PAGE_SIZE;
        let flags6 = data[6];
        let flags7 = data[7];

        if flags7 & 0x0C == 0x08 {
            return Err(Error::new(ErrorKind::InvalidData, "iNES 2.0 is not supported"));
        }

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mapper = (flags7 & 0xF0) | (flags6 >> 4);
        if mapper != 0 {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("mapper {mapper} is not supported (NROM only)"),
            ));
        }

        // The CPU-side window only knows how to mirror 16 KiB or map 32 KiB.
        if prg_rom_size != PRG_ROM_PAGE_SIZE && prg_rom_size != 2 * PRG_ROM_PAGE_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("unsupported PRG-ROM size {prg_rom_size} bytes"),
            ));
        }

        let has_trainer = flags6 & 0x04 != 0;
        let prg_rom_start = 16 + if has_trainer { TRAINER_SIZE } else { 0 };
        let chr_rom_start = prg_rom_start + prg_rom_size;

        if data.len() < chr_rom_start + chr_rom_size {
            return Err(Error::new(ErrorKind::InvalidData, "truncated ROM image"));
        }

        let prg_rom = data[prg_rom_start..prg_rom_start + prg_rom_size].to_vec();
        let chr_rom = data[chr_rom_start..chr_rom_start + chr_rom_size].to_vec();

        log::info!(
            "loaded cartridge: PRG {} KiB, CHR {} KiB, mapper {}, {:?} mirroring",
            prg_rom.len() / 1024,
            chr_rom.len() / 1024,
            mapper,
            mirroring
        );

        Ok(Cartridge {
            prg_rom,
            chr_rom,
            mapper,
            mirroring,
        })
    }

    /// Read from the CPU-visible window `0x8000..=0xFFFF`. A 16 KiB image is
    /// mirrored into both halves; a 32 KiB image maps directly.
    pub fn read_prg(&self, addr: u16) -> u8 {
        let rom_addr = (addr - 0x8000) as usize;
        if self.prg_rom.len() == PRG_ROM_PAGE_SIZE {
            self.prg_rom[rom_addr & 0x3FFF]
        } else {
            self.prg_rom[rom_addr & 0x7FFF]
        }
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper(&self) -> u8 {
        self.mapper
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ines_image(prg: &[u8], flags6: u8) -> Vec<u8> {
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(b"NES\x1a");
        data[4] = (prg.len() / PRG_ROM_PAGE_SIZE) as u8;
        data[5] = 0;
        data[6] = flags6;
        data.extend_from_slice(prg);
        data
    }

    #[test]
    fn parses_header_fields() {
        let prg = vec![0u8; PRG_ROM_PAGE_SIZE];
        let cart = Cartridge::from_bytes(&ines_image(&prg, 0x01)).unwrap();
        assert_eq!(cart.prg_rom().len(), PRG_ROM_PAGE_SIZE);
        assert_eq!(cart.chr_rom().len(), 0);
        assert_eq!(cart.mapper(), 0);
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = ines_image(&vec![0u8; PRG_ROM_PAGE_SIZE], 0);
        data[0] = b'X';
        assert!(Cartridge::from_bytes(&data).is_err());
    }

    #[test]
    fn rejects_unsupported_mapper() {
        // Mapper number 1 in the high nibble of flags 6.
        let data = ines_image(&vec![0u8; PRG_ROM_PAGE_SIZE], 0x10);
        assert!(Cartridge::from_bytes(&data).is_err());
    }

    #[test]
    fn skips_trainer() {
        let mut prg = vec![0u8; PRG_ROM_PAGE_SIZE];
        prg[0] = 0xAA;
        let mut data = vec![0u8; 16];
        data[0..4].copy_from_slice(b"NES\x1a");
        data[4] = 1;
        data[6] = 0x04;
        data.extend_from_slice(&[0u8; TRAINER_SIZE]);
        data.extend_from_slice(&prg);

        let cart = Cartridge::from_bytes(&data).unwrap();
        assert_eq!(cart.read_prg(0x8000), 0xAA);
    }

    #[test]
    fn mirrors_16k_prg() {
        let mut prg = vec![0u8; PRG_ROM_PAGE_SIZE];
        prg[0] = 0xAA;
        prg[0x3FFF] = 0x55;
        let cart = Cartridge::from_bytes(&ines_image(&prg, 0)).unwrap();
        assert_eq!(cart.read_prg(0x8000), 0xAA);
        assert_eq!(cart.read_prg(0xC000), 0xAA);
        assert_eq!(cart.read_prg(0xBFFF), 0x55);
        assert_eq!(cart.read_prg(0xFFFF), 0x55);
    }

    #[test]
    fn maps_32k_prg_directly() {
        let mut prg = vec![0u8; 2 * PRG_ROM_PAGE_SIZE];
        prg[0] = 0x11;
        prg[0x4000] = 0x22;
        let cart = Cartridge::from_bytes(&ines_image(&prg, 0)).unwrap();
        assert_eq!(cart.read_prg(0x8000), 0x11);
        assert_eq!(cart.read_prg(0xC000), 0x22);
    }

    #[test]
    fn rejects_truncated_image() {
        let mut data = ines_image(&vec![0u8; PRG_ROM_PAGE_SIZE], 0);
        data.truncate(data.len() - 1);
        assert!(Cartridge::from_bytes(&data).is_err());
    }
}
