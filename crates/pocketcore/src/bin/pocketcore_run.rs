use std::path::PathBuf;

use anyhow::{Context, Result};
use pocketcore::{GameBoy, MachineConfig};

const USAGE: &str = "Usage: pocketcore-run <rom_path> [frames] [--trace]";

fn main() -> Result<()> {
    env_logger::init();

    let mut rom_path: Option<PathBuf> = None;
    let mut frames: u32 = 60;
    let mut trace = false;
    for arg in std::env::args().skip(1) {
        if arg == "--trace" {
            trace = true;
        } else if rom_path.is_none() {
            rom_path = Some(PathBuf::from(arg));
        } else {
            frames = arg
                .parse()
                .with_context(|| format!("invalid frame count '{arg}'\n{USAGE}"))?;
        }
    }
    let Some(rom_path) = rom_path else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;
    let config = MachineConfig::builder().trace_instructions(trace).build();
    let mut gb = GameBoy::with_config(&rom, config)?;

    for frame in 0..frames {
        gb.step_frame();
        if gb.is_crashed() {
            log::warn!("CPU crashed during frame {frame}");
            break;
        }
        if gb.is_stopped() {
            log::info!("machine entered low-power mode during frame {frame}");
            break;
        }
    }

    let regs = &gb.cpu().regs;
    println!(
        "AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
        regs.af(),
        regs.bc(),
        regs.de(),
        regs.hl(),
        regs.sp,
        regs.pc
    );
    println!(
        "state={:?} stopped={} cycles={}",
        gb.cpu().state(),
        gb.is_stopped(),
        gb.cycles()
    );
    Ok(())
}
