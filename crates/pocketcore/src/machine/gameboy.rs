use anyhow::{Context, Result};

use crate::config::MachineConfig;
use crate::cpu::{Cpu, StepOutcome};
use crate::MCYCLES_PER_FRAME;

use super::{Button, Cartridge, SystemBus};

/// A whole DMG: CPU plus system bus, owned together.
///
/// This is the driver the outer program talks to. It also owns the
/// low-power latch set by STOP: while stopped no machine cycles run, and a
/// button press resumes execution.
pub struct GameBoy {
    cpu: Cpu,
    bus: SystemBus,
    stopped: bool,
    config: MachineConfig,
}

impl GameBoy {
    pub fn new(rom: &[u8]) -> Result<Self> {
        Self::with_config(rom, MachineConfig::default())
    }

    pub fn with_config(rom: &[u8], config: MachineConfig) -> Result<Self> {
        let cartridge = Cartridge::from_rom(rom).context("failed to load cartridge")?;
        let mut bus = SystemBus::new(cartridge, &config);
        let mut cpu = Cpu::with_config(&config);
        cpu.reset(&mut bus);
        Ok(Self {
            cpu,
            bus,
            stopped: false,
            config,
        })
    }

    pub fn reset(&mut self) {
        self.bus.reset();
        self.cpu = Cpu::with_config(&self.config);
        self.cpu.reset(&mut self.bus);
        self.stopped = false;
    }

    /// Run one CPU step. While stopped this does nothing and keeps
    /// reporting [`StepOutcome::EnterLowPower`].
    pub fn step(&mut self) -> StepOutcome {
        if self.stopped {
            return StepOutcome::EnterLowPower;
        }
        let outcome = self.cpu.step(&mut self.bus);
        if outcome == StepOutcome::EnterLowPower {
            self.stopped = true;
        }
        outcome
    }

    /// Run for one frame worth of machine cycles. Returns early when the
    /// machine stops or the CPU crashes. Returns the cycles actually run.
    pub fn step_frame(&mut self) -> u64 {
        let start = self.bus.cycles();
        let target = start + u64::from(MCYCLES_PER_FRAME);
        while self.bus.cycles() < target {
            if self.step() == StepOutcome::EnterLowPower || self.cpu.is_crashed() {
                break;
            }
        }
        self.bus.cycles() - start
    }

    /// Press a button. Also the wake event for the low-power state.
    pub fn press(&mut self, button: Button) {
        self.bus.press(button);
        if self.stopped {
            self.stopped = false;
            log::info!("woken from low-power mode by {button:?}");
        }
    }

    pub fn release(&mut self, button: Button) {
        self.bus.release(button);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        self.cpu.is_crashed()
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.bus.cycles()
    }

    /// Read through the memory map without spending a cycle. DMA blocking
    /// does not apply.
    pub fn peek(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    #[inline]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    #[inline]
    pub fn bus(&self) -> &SystemBus {
        &self.bus
    }

    #[inline]
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}
