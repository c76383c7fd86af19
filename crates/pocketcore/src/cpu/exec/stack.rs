use crate::cpu::helpers::field_p;
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(in crate::cpu) fn op_push(&mut self, bus: &mut dyn Bus) {
        let value = self.regs.read16(Reg16::from_rp2(field_p(self.opcode)));
        bus.idle();
        self.push_u16(bus, value);
    }

    /// POP AF drops the low nibble of F through `write16`.
    pub(in crate::cpu) fn op_pop(&mut self, bus: &mut dyn Bus) {
        let value = self.pop_u16(bus);
        self.regs.write16(Reg16::from_rp2(field_p(self.opcode)), value);
    }
}
