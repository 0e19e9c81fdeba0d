use clap::Parser;

use famicore::trace;
use famicore::{Cartridge, Nes, StepOutcome};

/// NES 6502 core: load an iNES ROM and interpret it until BRK.
#[derive(Parser, Debug)]
#[command(name = "famicore")]
#[command(about = "NES 6502 core emulator", long_about = None)]
struct Args {
    /// Path to the iNES ROM file
    rom: String,

    /// Print a nestest-format trace line before every instruction
    #[arg(short, long)]
    trace: bool,

    /// Entry point override in hex (e.g. C000); defaults to the reset vector
    #[arg(long, value_parser = parse_hex_addr)]
    entry: Option<u16>,

    /// Stop after this many instructions
    #[arg(short, long)]
    limit: Option<u64>,
}

fn parse_hex_addr(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {s:?}: {e}"))
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let cartridge = match Cartridge::load(&args.rom) {
        Ok(cartridge) => cartridge,
        Err(e) => {
            eprintln!("failed to load {}: {}", args.rom, e);
            std::process::exit(1);
        }
    };

    let mut nes = Nes::new(cartridge);
    match args.entry {
        Some(entry) => nes.reset_to(entry),
        None => {
            if let Err(fault) = nes.reset() {
                eprintln!("reset failed: {fault}");
                std::process::exit(1);
            }
        }
    }

    let mut executed: u64 = 0;
    loop {
        if let Some(limit) = args.limit {
            if executed >= limit {
                log::info!("instruction limit reached after {executed} instructions");
                break;
            }
        }

        if args.trace {
            println!("{}", trace::trace_line(&nes.cpu, &mut nes.bus));
        }

        match nes.step() {
            Ok(StepOutcome::Continue(_)) => executed += 1,
            Ok(StepOutcome::Halted) => {
                log::info!(
                    "BRK after {executed} instructions, {} cycles",
                    nes.cpu.cycles()
                );
                break;
            }
            Err(fault) => {
                eprintln!("fatal: {fault}");
                std::process::exit(1);
            }
        }
    }
}
