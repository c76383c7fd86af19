use crate::cpu::helpers::{field_p, field_y, field_z, Operand8};
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    /// LD r,r' including the (HL) forms (0x40-0x7F except 0x76).
    pub(in crate::cpu) fn op_ld_r_r(&mut self, bus: &mut dyn Bus) {
        let src = Operand8::decode(field_z(self.opcode));
        let dst = Operand8::decode(field_y(self.opcode));
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
    }

    /// LD r,d8 and LD (HL),d8.
    pub(in crate::cpu) fn op_ld_r_d8(&mut self, bus: &mut dyn Bus) {
        let value = self.fetch8(bus);
        let dst = Operand8::decode(field_y(self.opcode));
        self.write_operand(bus, dst, value);
    }

    /// LD rr,d16.
    pub(in crate::cpu) fn op_ld_rr_d16(&mut self, bus: &mut dyn Bus) {
        let value = self.fetch16(bus);
        self.regs.write16(Reg16::from_rp(field_p(self.opcode)), value);
    }

    /// Pointer for LD (rr),A / LD A,(rr): BC, DE, HL+, HL-.
    fn indirect_address(&mut self) -> u16 {
        match field_p(self.opcode) {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    /// 0x02, 0x12, 0x22, 0x32.
    pub(in crate::cpu) fn op_ld_indirect_a(&mut self, bus: &mut dyn Bus) {
        let addr = self.indirect_address();
        bus.write8(addr, self.regs.a);
    }

    /// 0x0A, 0x1A, 0x2A, 0x3A.
    pub(in crate::cpu) fn op_ld_a_indirect(&mut self, bus: &mut dyn Bus) {
        let addr = self.indirect_address();
        self.regs.a = bus.read8(addr);
    }

    /// LD (a16),SP: low byte first.
    pub(in crate::cpu) fn op_ld_a16_sp(&mut self, bus: &mut dyn Bus) {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
    }

    /// LDH (a8),A.
    pub(in crate::cpu) fn op_ldh_a8_a(&mut self, bus: &mut dyn Bus) {
        let offset = self.fetch8(bus);
        bus.write8(0xFF00 | u16::from(offset), self.regs.a);
    }

    /// LDH A,(a8).
    pub(in crate::cpu) fn op_ldh_a_a8(&mut self, bus: &mut dyn Bus) {
        let offset = self.fetch8(bus);
        self.regs.a = bus.read8(0xFF00 | u16::from(offset));
    }

    /// LD (C),A.
    pub(in crate::cpu) fn op_ld_c_a(&mut self, bus: &mut dyn Bus) {
        bus.write8(0xFF00 | u16::from(self.regs.c), self.regs.a);
    }

    /// LD A,(C).
    pub(in crate::cpu) fn op_ld_a_c(&mut self, bus: &mut dyn Bus) {
        self.regs.a = bus.read8(0xFF00 | u16::from(self.regs.c));
    }

    pub(in crate::cpu) fn op_ld_a16_a(&mut self, bus: &mut dyn Bus) {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
    }

    pub(in crate::cpu) fn op_ld_a_a16(&mut self, bus: &mut dyn Bus) {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
    }

    /// LD HL,SP+e.
    pub(in crate::cpu) fn op_ld_hl_sp_e(&mut self, bus: &mut dyn Bus) {
        let offset = self.fetch8(bus);
        let value = self.alu_sp_offset(offset);
        bus.idle();
        self.regs.set_hl(value);
    }

    pub(in crate::cpu) fn op_ld_sp_hl(&mut self, bus: &mut dyn Bus) {
        bus.idle();
        self.regs.sp = self.regs.hl();
    }
}
