pub mod config;
pub mod cpu;
pub mod interrupts;
pub mod machine;

pub use config::MachineConfig;
pub use cpu::{Bus, Cpu, RunState, StepOutcome};
pub use interrupts::{Interrupt, InterruptController, InterruptFlags};
pub use machine::{Button, GameBoy, SystemBus};

/// Fast clock ticks ("T-cycles") per machine cycle.
pub const TCYCLES_PER_MCYCLE: u32 = 4;
/// Machine cycles in one DMG frame (154 lines of 456 dots).
pub const MCYCLES_PER_FRAME: u32 = 17_556;
/// Filler returned for unmapped or blocked reads.
pub const OPEN_BUS: u8 = 0xFF;
