use super::table::BASE_OPS;
use super::{Bus, Cpu, RunState, StepOutcome};

impl Cpu {
    /// Advance the core by one unit of work.
    ///
    /// Depending on the run state this is a single idle cycle (halted,
    /// crashed, resolving HALT), an interrupt dispatch, or one whole
    /// instruction including the prefetch of its successor.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> StepOutcome {
        let bus: &mut dyn Bus = bus;

        match self.state {
            RunState::Crashed => {
                bus.idle();
                return StepOutcome::Continue;
            }
            RunState::HaltPrepare => {
                self.resolve_halt_prepare(bus);
                return StepOutcome::Continue;
            }
            RunState::Halted => {
                if !bus.interrupts().has_pending() {
                    bus.idle();
                    return StepOutcome::Continue;
                }
                self.state = RunState::Running;
            }
            RunState::Running => {}
        }

        if self.service_interrupt(bus) {
            return StepOutcome::Continue;
        }

        // EI takes effect after the instruction that follows it.
        let enable_after = bus.interrupts().enable_queued;
        self.execute(bus);
        let ic = bus.interrupts();
        if enable_after && ic.enable_queued {
            ic.enable_queued = false;
            ic.master_enable = true;
        }

        if std::mem::take(&mut self.low_power_requested) {
            StepOutcome::EnterLowPower
        } else {
            StepOutcome::Continue
        }
    }

    /// Execute the prefetched opcode, then prefetch the next one.
    pub(super) fn execute(&mut self, bus: &mut dyn Bus) {
        if self.trace {
            log::trace!(
                "{:04X}: {:02X}  AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                self.regs.pc,
                self.opcode,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp
            );
        }

        if self.halt_bug {
            // PC fails to advance past the opcode, so its byte is read again.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }

        let handler = BASE_OPS[usize::from(self.opcode)];
        handler(self, bus);

        if self.state != RunState::Crashed {
            self.prefetch(bus);
        }
    }

    fn resolve_halt_prepare(&mut self, bus: &mut dyn Bus) {
        bus.idle();
        if bus.interrupts().has_pending() {
            self.state = RunState::Running;
            self.halt_bug = self.emulate_halt_bug;
        } else {
            self.state = RunState::Halted;
        }
    }

    /// Enter the terminal state. The caller must not prefetch afterwards.
    pub(super) fn crash(&mut self, reason: &str) {
        self.state = RunState::Crashed;
        log::error!(
            "CPU crashed: {} (PC={:04X} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X})",
            reason,
            self.regs.pc,
            self.regs.af(),
            self.regs.bc(),
            self.regs.de(),
            self.regs.hl(),
            self.regs.sp
        );
    }
}
