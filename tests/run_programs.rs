//! Whole-program tests: synthesized iNES images run through the CPU, bus and
//! cartridge together.

use famicore::{Access, Cartridge, CpuBus, Fault, Nes, StepOutcome};

const PRG_PAGE: usize = 16 * 1024;

/// 16 KiB NROM image with `program` at the start of PRG (0x8000) and the
/// reset vector pointing there.
fn cartridge_with_program(program: &[u8]) -> Cartridge {
    let mut prg = vec![0u8; PRG_PAGE];
    prg[..program.len()].copy_from_slice(program);
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let mut data = vec![0u8; 16];
    data[0..4].copy_from_slice(b"NES\x1a");
    data[4] = 1;
    data.extend_from_slice(&prg);
    Cartridge::from_bytes(&data).unwrap()
}

fn booted(program: &[u8]) -> Nes {
    let mut nes = Nes::new(cartridge_with_program(program));
    nes.reset().unwrap();
    nes
}

#[test]
fn reset_loads_the_vector() {
    let nes = booted(&[0x00]);
    assert_eq!(nes.cpu.pc, 0x8000);
    assert_eq!(nes.cpu.sp, 0xFD);
    assert_eq!(nes.cpu.status.bits(), 0x24);
}

#[test]
fn load_transfer_increment() {
    // LDA #$05, TAX, INX, BRK
    let mut nes = booted(&[0xA9, 0x05, 0xAA, 0xE8, 0x00]);

    nes.run().unwrap();

    assert_eq!(nes.cpu.a, 5);
    assert_eq!(nes.cpu.x, 6);
    assert_eq!(nes.cpu.status.bits() & 0x82, 0); // neither Z nor N
}

#[test]
fn increment_wraps_with_flags() {
    // LDA #$FF, TAX, INX, BRK
    let mut nes = booted(&[0xA9, 0xFF, 0xAA, 0xE8, 0x00]);

    nes.run().unwrap();

    assert_eq!(nes.cpu.a, 0xFF);
    assert_eq!(nes.cpu.x, 0x00);
    assert_eq!(nes.cpu.status.bits() & 0x02, 0x02); // Z set
    assert_eq!(nes.cpu.status.bits() & 0x80, 0x00); // N clear
}

#[test]
fn jsr_rts_returns_past_the_call() {
    // 0x8000: JSR $8005, BRK; 0x8005: INX, RTS
    let mut nes = booted(&[0x20, 0x05, 0x80, 0x00, 0x00, 0xE8, 0x60]);

    nes.run().unwrap();

    assert_eq!(nes.cpu.x, 1);
    // The run loop stopped on the BRK just past the JSR.
    assert_eq!(nes.cpu.pc, 0x8003);
    assert_eq!(nes.cpu.sp, 0xFD);
}

#[test]
fn prg_16k_image_mirrors_into_both_halves() {
    let mut prg = vec![0u8; PRG_PAGE];
    prg[0] = 0xAA;
    let mut data = vec![0u8; 16];
    data[0..4].copy_from_slice(b"NES\x1a");
    data[4] = 1;
    data.extend_from_slice(&prg);

    let mut nes = Nes::new(Cartridge::from_bytes(&data).unwrap());

    assert_eq!(nes.bus.read(0x8000).unwrap(), 0xAA);
    assert_eq!(nes.bus.read(0xC000).unwrap(), 0xAA);
}

#[test]
fn ram_mirrors_are_visible_to_programs() {
    // LDA #$42, STA $0010, LDA $0810, BRK
    let mut nes = booted(&[0xA9, 0x42, 0x8D, 0x10, 0x00, 0xAD, 0x10, 0x08, 0x00]);

    nes.run().unwrap();

    assert_eq!(nes.cpu.a, 0x42);
}

#[test]
fn stores_into_prg_rom_fault() {
    // LDA #$01, STA $8000
    let mut nes = booted(&[0xA9, 0x01, 0x8D, 0x00, 0x80]);

    assert_eq!(nes.run(), Err(Fault::PrgRomWrite { addr: 0x8000 }));
}

#[test]
fn touching_the_unmapped_window_faults() {
    // LDA $4000
    let mut nes = booted(&[0xAD, 0x00, 0x40]);

    assert_eq!(
        nes.run(),
        Err(Fault::UnmappedAddress {
            addr: 0x4000,
            access: Access::Read
        })
    );
}

#[test]
fn ppu_stub_reads_zero() {
    // LDA #$FF, LDA $2002, BRK
    let mut nes = booted(&[0xA9, 0xFF, 0xAD, 0x02, 0x20, 0x00]);

    nes.run().unwrap();

    assert_eq!(nes.cpu.a, 0);
}

#[test]
fn traced_run_matches_execution() {
    // LDA #$05, TAX, BRK
    let mut nes = booted(&[0xA9, 0x05, 0xAA, 0x00]);

    let mut lines = Vec::new();
    nes.run_traced(&mut |line: &str| lines.push(line.to_string()))
        .unwrap();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("8000  A9 05     LDA #$05"));
    assert!(lines[1].starts_with("8002  AA        TAX"));
    assert!(lines[2].starts_with("8003  00        BRK"));
    assert!(lines[1].contains("A:05"));
}

#[test]
fn stepping_reports_halt_exactly_once() {
    let mut nes = booted(&[0xEA, 0x00]); // NOP, BRK

    assert_eq!(nes.step().unwrap(), StepOutcome::Continue(2));
    assert_eq!(nes.step().unwrap(), StepOutcome::Halted);
}
