use crate::config::MachineConfig;

use super::{Bus, Cpu, Registers, RunState};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        Self::with_config(&MachineConfig::default())
    }

    pub fn with_config(config: &MachineConfig) -> Self {
        Self {
            regs: Registers::post_boot(),
            opcode: 0x00,
            state: RunState::Running,
            halt_bug: false,
            emulate_halt_bug: config.emulate_halt_bug,
            low_power_requested: false,
            trace: config.trace_instructions,
        }
    }

    /// Reset to the post-boot DMG state and prefetch the opcode at 0x0100.
    ///
    /// Clears the interrupt controller as well. Costs one bus cycle.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs = Registers::post_boot();
        self.state = RunState::Running;
        self.halt_bug = false;
        self.low_power_requested = false;
        bus.interrupts().reset();
        self.prefetch(bus);
    }
}
