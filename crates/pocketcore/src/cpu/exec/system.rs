use crate::cpu::table::CB_OPS;
use crate::cpu::{Bus, Cpu, RunState};

impl Cpu {
    /// HALT. With IME set the core halts outright; with IME clear it goes
    /// through the one-cycle prepare state that decides on the HALT bug.
    pub(in crate::cpu) fn op_halt(&mut self, bus: &mut dyn Bus) {
        self.state = if bus.interrupts().master_enable {
            RunState::Halted
        } else {
            RunState::HaltPrepare
        };
    }

    /// STOP is two bytes; a non-zero second byte is treated as a fault.
    pub(in crate::cpu) fn op_stop(&mut self, bus: &mut dyn Bus) {
        let padding = self.fetch8(bus);
        if padding != 0x00 {
            self.crash(&format!("STOP followed by {padding:#04x}"));
            return;
        }
        log::info!("STOP at {:#06x}: entering low-power mode", self.regs.pc.wrapping_sub(2));
        self.low_power_requested = true;
    }

    pub(in crate::cpu) fn op_di(&mut self, bus: &mut dyn Bus) {
        let ic = bus.interrupts();
        ic.master_enable = false;
        ic.enable_queued = false;
    }

    pub(in crate::cpu) fn op_ei(&mut self, bus: &mut dyn Bus) {
        bus.interrupts().enable_queued = true;
    }

    /// Fetch the sub-opcode and run its CB handler.
    pub(in crate::cpu) fn op_prefix_cb(&mut self, bus: &mut dyn Bus) {
        let cb = self.fetch8(bus);
        self.opcode = cb;
        CB_OPS[usize::from(cb)](self, bus);
    }
}
