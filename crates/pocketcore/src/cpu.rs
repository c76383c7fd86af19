mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;
mod table;

pub use bus::Bus;
pub use regs::{Flag, Reg16, Reg8, Registers};

/// Execution state of the core.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RunState {
    #[default]
    Running,
    /// HALT executed with IME clear; resolved on the next cycle.
    HaltPrepare,
    Halted,
    /// Terminal. The core keeps burning idle cycles so the rest of the
    /// machine advances, but never decodes again.
    Crashed,
}

/// Result of one [`Cpu::step`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Continue,
    /// STOP executed: the driver should suspend cycle generation until a
    /// wake event.
    EnterLowPower,
}

/// SM83 execution engine.
///
/// The engine always holds the opcode at `regs.pc` already fetched
/// ("prefetched"). A step executes that opcode, performs its bus accesses,
/// and fetches the next one. Time is measured only by bus traffic: each
/// `read8`, `write8` and `idle` is one machine cycle.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Prefetched opcode, or the CB sub-opcode while a CB handler runs.
    opcode: u8,
    state: RunState,
    /// HALT bug armed: the next opcode is executed without advancing PC
    /// past it, so its first byte is read twice.
    halt_bug: bool,
    emulate_halt_bug: bool,
    /// Set by STOP; drained by `step` into [`StepOutcome::EnterLowPower`].
    low_power_requested: bool,
    trace: bool,
}

impl Cpu {
    #[inline]
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_crashed(&self) -> bool {
        self.state == RunState::Crashed
    }

    /// True once HALT has executed, including the prepare cycle that
    /// decides between halting and the HALT bug.
    #[inline]
    pub fn is_halted(&self) -> bool {
        matches!(self.state, RunState::Halted | RunState::HaltPrepare)
    }
}

#[cfg(test)]
mod tests;
