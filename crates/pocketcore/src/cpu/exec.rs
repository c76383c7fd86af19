//! Base-page instruction handlers.
//!
//! Every handler runs with PC already past the opcode byte and decodes its
//! operands from `self.opcode`. The trailing prefetch is issued by
//! `Cpu::execute`, so a handler only spends the cycles of its own operand
//! fetches, data accesses and internal delays.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};

impl Cpu {
    pub(in crate::cpu) fn op_nop(&mut self, _bus: &mut dyn Bus) {}

    /// D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD.
    pub(in crate::cpu) fn op_undefined(&mut self, bus: &mut dyn Bus) {
        bus.idle();
        self.crash(&format!("undefined opcode {:#04x}", self.opcode));
    }
}
