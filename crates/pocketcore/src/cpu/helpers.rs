use super::{Bus, Cpu, Flag, Reg8};

/// 8-bit operand selected by a 3-bit opcode field.
///
/// Encoding: 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Operand8 {
    Reg(Reg8),
    /// Memory at HL; each access is a bus cycle.
    IndirectHl,
}

impl Operand8 {
    #[inline]
    pub(super) const fn decode(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Operand8::Reg(Reg8::B),
            1 => Operand8::Reg(Reg8::C),
            2 => Operand8::Reg(Reg8::D),
            3 => Operand8::Reg(Reg8::E),
            4 => Operand8::Reg(Reg8::H),
            5 => Operand8::Reg(Reg8::L),
            7 => Operand8::Reg(Reg8::A),
            _ => Operand8::IndirectHl,
        }
    }
}

/// Opcode fields in the usual x/y/z/p/q split.
#[inline]
pub(super) const fn field_y(opcode: u8) -> u8 {
    (opcode >> 3) & 0x07
}

#[inline]
pub(super) const fn field_z(opcode: u8) -> u8 {
    opcode & 0x07
}

#[inline]
pub(super) const fn field_p(opcode: u8) -> u8 {
    (opcode >> 4) & 0x03
}

impl Cpu {
    /// Load the opcode at PC without advancing PC.
    #[inline]
    pub(super) fn prefetch(&mut self, bus: &mut dyn Bus) {
        self.opcode = bus.read8(self.regs.pc);
    }

    #[inline]
    pub(super) fn fetch8(&mut self, bus: &mut dyn Bus) -> u8 {
        let value = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(super) fn fetch16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Two write cycles: high byte at SP-1, then low byte at SP-2.
    #[inline]
    pub(super) fn push_u16(&mut self, bus: &mut dyn Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16(&mut self, bus: &mut dyn Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read_operand(&mut self, bus: &mut dyn Bus, operand: Operand8) -> u8 {
        match operand {
            Operand8::Reg(reg) => self.regs.read8(reg),
            Operand8::IndirectHl => bus.read8(self.regs.hl()),
        }
    }

    #[inline]
    pub(super) fn write_operand(&mut self, bus: &mut dyn Bus, operand: Operand8, value: u8) {
        match operand {
            Operand8::Reg(reg) => self.regs.write8(reg, value),
            Operand8::IndirectHl => bus.write8(self.regs.hl(), value),
        }
    }

    /// Branch condition from a 2-bit field: NZ, Z, NC, C.
    #[inline]
    pub(super) fn condition(&self, cc: u8) -> bool {
        match cc & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }
}
