use super::{Bus, Cpu};

impl Cpu {
    /// Service the highest-priority interrupt if IME is set and one is
    /// ready. Returns `true` if a dispatch took place.
    ///
    /// The sequence is five machine cycles: idle, push PC high, push PC
    /// low, idle, then prefetch at the vector. The prefetched opcode that
    /// was waiting at PC is discarded and re-fetched after RETI.
    pub(super) fn service_interrupt(&mut self, bus: &mut dyn Bus) -> bool {
        let ic = bus.interrupts();
        if !ic.master_enable {
            return false;
        }
        let Some(source) = ic.take() else {
            return false;
        };
        ic.master_enable = false;
        ic.enable_queued = false;

        // HALT bug under EI;HALT: the handler returns to the HALT itself.
        let resume = if std::mem::take(&mut self.halt_bug) {
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };

        bus.idle();
        self.push_u16(bus, resume);
        self.regs.pc = source.vector();
        bus.idle();
        self.prefetch(bus);

        log::debug!(
            "interrupt {:?} -> {:#06x} (return {:#06x}, SP={:#06x})",
            source,
            source.vector(),
            resume,
            self.regs.sp
        );
        true
    }
}
