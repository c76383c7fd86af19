use crate::cpu::helpers::{field_p, field_y, field_z, Operand8};
use crate::cpu::{Bus, Cpu, Flag, Reg16};

impl Cpu {
    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r (0x80-0xBF).
    pub(in crate::cpu) fn op_alu_a_r(&mut self, bus: &mut dyn Bus) {
        let value = self.read_operand(bus, Operand8::decode(field_z(self.opcode)));
        self.alu_op(field_y(self.opcode), value);
    }

    /// Immediate forms (0xC6, 0xCE, ... 0xFE).
    pub(in crate::cpu) fn op_alu_a_d8(&mut self, bus: &mut dyn Bus) {
        let value = self.fetch8(bus);
        self.alu_op(field_y(self.opcode), value);
    }

    pub(in crate::cpu) fn op_add_hl_rr(&mut self, bus: &mut dyn Bus) {
        let value = self.regs.read16(Reg16::from_rp(field_p(self.opcode)));
        bus.idle();
        self.alu_add16_hl(value);
    }

    pub(in crate::cpu) fn op_add_sp_e(&mut self, bus: &mut dyn Bus) {
        let offset = self.fetch8(bus);
        let value = self.alu_sp_offset(offset);
        bus.idle();
        bus.idle();
        self.regs.sp = value;
    }

    /// RLCA, RRCA, RLA, RRA: the CB shift with Z forced clear.
    pub(in crate::cpu) fn op_rotate_a(&mut self, _bus: &mut dyn Bus) {
        self.regs.a = self.shift(field_y(self.opcode), self.regs.a);
        self.set_flag(Flag::Z, false);
    }

    pub(in crate::cpu) fn op_daa(&mut self, _bus: &mut dyn Bus) {
        self.alu_daa();
    }

    pub(in crate::cpu) fn op_cpl(&mut self, _bus: &mut dyn Bus) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(in crate::cpu) fn op_scf(&mut self, _bus: &mut dyn Bus) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(in crate::cpu) fn op_ccf(&mut self, _bus: &mut dyn Bus) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }
}
