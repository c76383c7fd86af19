use super::{Cpu, Flag};

impl Cpu {
    /// Dispatch one of the eight accumulator operations by its opcode
    /// field: ADD, ADC, SUB, SBC, AND, XOR, OR, CP.
    pub(super) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => {
                self.alu_compare(value);
            }
        }
    }

    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(use_carry && self.get_flag(Flag::C));
        let full = u16::from(a) + u16::from(value) + u16::from(carry_in);
        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let result = full as u8;

        self.regs.a = result;
        self.set_znhc(result == 0, false, half > 0x0F, full > 0xFF);
    }

    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flag::C);
        self.regs.a = self.subtract(value, carry_in);
    }

    /// CP: flags as for SUB, A unchanged.
    #[inline]
    pub(super) fn alu_compare(&mut self, value: u8) -> u8 {
        self.subtract(value, false)
    }

    fn subtract(&mut self, value: u8, carry_in: bool) -> u8 {
        let a = self.regs.a;
        let borrow = i16::from(carry_in);
        let full = i16::from(a) - i16::from(value) - borrow;
        let half = i16::from(a & 0x0F) - i16::from(value & 0x0F) - borrow;
        let result = full as u8;

        self.set_znhc(result == 0, true, half < 0, full < 0);
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_znhc(self.regs.a == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_znhc(self.regs.a == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_znhc(self.regs.a == 0, false, false, false);
    }

    /// Decimal adjust after BCD addition/subtraction.
    ///
    /// The correction byte is keyed off N, H and C (and, after an
    /// addition, off the digits of A itself). N is preserved, H cleared.
    pub(super) fn alu_daa(&mut self) {
        let mut correction = 0u8;
        let mut carry = self.get_flag(Flag::C);
        let subtract = self.get_flag(Flag::N);
        let a = self.regs.a;

        if self.get_flag(Flag::H) || (!subtract && (a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        let result = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };

        self.regs.a = result;
        self.set_znhc(result == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// ADD HL,rr: Z untouched, H from bit 11, C from bit 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// SP plus a signed immediate, shared by ADD SP,e and LD HL,SP+e.
    /// H and C come from the unsigned low-byte addition; Z and N clear.
    pub(super) fn alu_sp_offset(&mut self, offset: u8) -> u16 {
        let sp = self.regs.sp;
        let half = (sp & 0x000F) + u16::from(offset & 0x0F) > 0x000F;
        let carry = (sp & 0x00FF) + u16::from(offset) > 0x00FF;
        self.set_znhc(false, false, half, carry);
        sp.wrapping_add(offset as i8 as u16)
    }
}
