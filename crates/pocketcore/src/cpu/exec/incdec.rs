use crate::cpu::helpers::{field_p, field_y, Operand8};
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(in crate::cpu) fn op_inc_r(&mut self, bus: &mut dyn Bus) {
        let operand = Operand8::decode(field_y(self.opcode));
        let value = self.read_operand(bus, operand);
        let result = self.alu_inc8(value);
        self.write_operand(bus, operand, result);
    }

    pub(in crate::cpu) fn op_dec_r(&mut self, bus: &mut dyn Bus) {
        let operand = Operand8::decode(field_y(self.opcode));
        let value = self.read_operand(bus, operand);
        let result = self.alu_dec8(value);
        self.write_operand(bus, operand, result);
    }

    /// INC rr. No flags.
    pub(in crate::cpu) fn op_inc_rr(&mut self, bus: &mut dyn Bus) {
        let reg = Reg16::from_rp(field_p(self.opcode));
        bus.idle();
        self.regs.write16(reg, self.regs.read16(reg).wrapping_add(1));
    }

    /// DEC rr. No flags.
    pub(in crate::cpu) fn op_dec_rr(&mut self, bus: &mut dyn Bus) {
        let reg = Reg16::from_rp(field_p(self.opcode));
        bus.idle();
        self.regs.write16(reg, self.regs.read16(reg).wrapping_sub(1));
    }
}
