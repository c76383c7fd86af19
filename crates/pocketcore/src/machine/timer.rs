use crate::interrupts::{Interrupt, InterruptController};

use super::Ticking;

/// Timer / divider unit (0xFF04-0xFF07).
///
/// A 16-bit counter advances once per machine cycle and DIV exposes its
/// bits 13:6. TIMA increments on the falling edge of the counter bit
/// selected by TAC. An overflow leaves TIMA at 0x00 for one cycle; the
/// reload from TMA and the interrupt request happen on the next tick.
pub(crate) struct Timer {
    /// Hidden system counter; DIV exposes its upper bits.
    counter: u16,
    tima: u8,
    tma: u8,
    /// TAC, lower 3 bits.
    tac: u8,
    /// Reload + interrupt due on the next tick.
    overflow: bool,
}

impl Timer {
    /// DMG state at PC=0x0100: DIV reads back 0xAB.
    pub(crate) fn new() -> Self {
        Self {
            counter: 0x2AC0,
            tima: 0x00,
            tma: 0x00,
            tac: 0x00,
            overflow: false,
        }
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Selected input bit: 00 -> bit 7, 01 -> bit 1, 10 -> bit 3, 11 -> bit 5.
    #[inline]
    fn input(&self) -> bool {
        let bit = match self.tac & 0x03 {
            0x00 => 7,
            0x01 => 1,
            0x02 => 3,
            _ => 5,
        };
        self.enabled() && self.counter & (1 << bit) != 0
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        self.overflow |= overflow;
    }

    /// Register read; `offset` is relative to 0xFF04.
    pub(crate) fn read(&self, offset: u16) -> u8 {
        match offset {
            0 => (self.counter >> 6) as u8,
            1 => self.tima,
            2 => self.tma,
            _ => self.tac | 0xF8,
        }
    }

    pub(crate) fn write(&mut self, offset: u16, value: u8) {
        match offset {
            0 => {
                // Clearing the counter can itself produce a falling edge.
                let before = self.input();
                self.counter = 0;
                if before {
                    self.increment_tima();
                }
            }
            1 => {
                // A write during the overflow cycle cancels the reload.
                self.tima = value;
                self.overflow = false;
            }
            2 => self.tma = value,
            _ => {
                let before = self.input();
                self.tac = value & 0x07;
                if before && !self.input() {
                    self.increment_tima();
                }
            }
        }
    }
}

impl Ticking for Timer {
    fn tick(&mut self, interrupts: &mut InterruptController) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            interrupts.request(Interrupt::Timer);
        }

        let before = self.input();
        self.counter = self.counter.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
