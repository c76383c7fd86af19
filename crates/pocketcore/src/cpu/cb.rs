//! CB-prefixed page. One helper per operation class; the target operand
//! and the bit/shift selector are decoded from the sub-opcode.

use super::helpers::{field_y, field_z, Operand8};
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Rotate/shift/swap selected by the `y` field:
    /// RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL. Sets Z from the result.
    pub(super) fn shift(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry) = match kind & 0x07 {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_znhc(result == 0, false, false, carry);
        result
    }

    pub(in crate::cpu) fn cb_shift(&mut self, bus: &mut dyn Bus) {
        let operand = Operand8::decode(field_z(self.opcode));
        let value = self.read_operand(bus, operand);
        let result = self.shift(field_y(self.opcode), value);
        self.write_operand(bus, operand, result);
    }

    /// BIT b: Z = !bit, N=0, H=1, C kept. (HL) is read but not written.
    pub(in crate::cpu) fn cb_bit(&mut self, bus: &mut dyn Bus) {
        let operand = Operand8::decode(field_z(self.opcode));
        let value = self.read_operand(bus, operand);
        let set = value & (1 << field_y(self.opcode)) != 0;
        self.set_flag(Flag::Z, !set);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }

    pub(in crate::cpu) fn cb_res(&mut self, bus: &mut dyn Bus) {
        let mask = !(1u8 << field_y(self.opcode));
        self.modify_cb_operand(bus, |value| value & mask);
    }

    pub(in crate::cpu) fn cb_set(&mut self, bus: &mut dyn Bus) {
        let mask = 1u8 << field_y(self.opcode);
        self.modify_cb_operand(bus, |value| value | mask);
    }

    #[inline]
    fn modify_cb_operand(&mut self, bus: &mut dyn Bus, f: impl FnOnce(u8) -> u8) {
        let operand = Operand8::decode(field_z(self.opcode));
        let value = self.read_operand(bus, operand);
        self.write_operand(bus, operand, f(value));
    }
}
