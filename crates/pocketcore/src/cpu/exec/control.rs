use crate::cpu::helpers::field_y;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Shared tail of JR/JR cc: the offset byte is always fetched, the
    /// extra cycle is only spent when the branch is taken.
    fn jump_relative(&mut self, bus: &mut dyn Bus, taken: bool) {
        let offset = self.fetch8(bus) as i8;
        if taken {
            bus.idle();
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
        }
    }

    fn jump_absolute(&mut self, bus: &mut dyn Bus, taken: bool) {
        let addr = self.fetch16(bus);
        if taken {
            bus.idle();
            self.regs.pc = addr;
        }
    }

    fn call(&mut self, bus: &mut dyn Bus, taken: bool) {
        let addr = self.fetch16(bus);
        if taken {
            bus.idle();
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
    }

    fn ret(&mut self, bus: &mut dyn Bus) {
        let addr = self.pop_u16(bus);
        bus.idle();
        self.regs.pc = addr;
    }

    pub(in crate::cpu) fn op_jr(&mut self, bus: &mut dyn Bus) {
        self.jump_relative(bus, true);
    }

    pub(in crate::cpu) fn op_jr_cc(&mut self, bus: &mut dyn Bus) {
        let taken = self.condition(field_y(self.opcode));
        self.jump_relative(bus, taken);
    }

    pub(in crate::cpu) fn op_jp(&mut self, bus: &mut dyn Bus) {
        self.jump_absolute(bus, true);
    }

    pub(in crate::cpu) fn op_jp_cc(&mut self, bus: &mut dyn Bus) {
        let taken = self.condition(field_y(self.opcode));
        self.jump_absolute(bus, taken);
    }

    /// JP HL: no extra cycle.
    pub(in crate::cpu) fn op_jp_hl(&mut self, _bus: &mut dyn Bus) {
        self.regs.pc = self.regs.hl();
    }

    pub(in crate::cpu) fn op_call(&mut self, bus: &mut dyn Bus) {
        self.call(bus, true);
    }

    pub(in crate::cpu) fn op_call_cc(&mut self, bus: &mut dyn Bus) {
        let taken = self.condition(field_y(self.opcode));
        self.call(bus, taken);
    }

    pub(in crate::cpu) fn op_ret(&mut self, bus: &mut dyn Bus) {
        self.ret(bus);
    }

    /// RET cc spends a cycle evaluating the condition before popping.
    pub(in crate::cpu) fn op_ret_cc(&mut self, bus: &mut dyn Bus) {
        bus.idle();
        if self.condition(field_y(self.opcode)) {
            self.ret(bus);
        }
    }

    /// RETI enables interrupts immediately, without the EI delay.
    pub(in crate::cpu) fn op_reti(&mut self, bus: &mut dyn Bus) {
        self.ret(bus);
        let ic = bus.interrupts();
        ic.master_enable = true;
        ic.enable_queued = false;
    }

    pub(in crate::cpu) fn op_rst(&mut self, bus: &mut dyn Bus) {
        bus.idle();
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = u16::from(self.opcode & 0x38);
    }
}
