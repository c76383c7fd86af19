//! Interrupt controller: the IE/IF register pair plus the IME latch.
//!
//! Peripherals raise requests with [`InterruptController::request`]; the CPU
//! drains them in priority order with [`InterruptController::take`]. Bit
//! numbering and jump vectors are fixed by the instruction set.

use bitflags::bitflags;

bitflags! {
    /// Bit layout shared by the IE (0xFFFF) and IF (0xFF0F) registers.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// One of the five interrupt sources, ordered from highest to lowest
/// priority.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    /// All sources in priority order (lowest bit wins).
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_retain(1 << self.bit())
    }

    /// Handler address: 0x40, 0x48, 0x50, 0x58 or 0x60.
    #[inline]
    pub const fn vector(self) -> u16 {
        0x40 + 8 * self as u16
    }
}

/// IF bits 5-7 are unused and read back as 1.
const IF_UNUSED_BITS: u8 = 0xE0;

#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// IE. All eight bits are stored; only the low five can fire.
    enabled: InterruptFlags,
    /// IF, always a subset of the five defined sources.
    pending: InterruptFlags,
    /// IME.
    pub master_enable: bool,
    /// Set by EI; promoted to `master_enable` after the next instruction.
    pub enable_queued: bool,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both masks and the IME latches.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn request(&mut self, source: Interrupt) {
        self.pending |= source.flag();
    }

    /// Highest-priority source that is both requested and enabled.
    /// Leaves the pending bit untouched.
    pub fn poll(&self) -> Option<Interrupt> {
        let ready = self.pending & self.enabled;
        Interrupt::ALL
            .into_iter()
            .find(|source| ready.contains(source.flag()))
    }

    /// Like [`poll`](Self::poll), but acknowledges the returned source by
    /// clearing its pending bit.
    pub fn take(&mut self) -> Option<Interrupt> {
        let source = self.poll()?;
        self.pending.remove(source.flag());
        Some(source)
    }

    /// Whether any enabled source is pending, regardless of IME. This is
    /// the wake condition for HALT.
    #[inline]
    pub fn has_pending(&self) -> bool {
        !(self.pending & self.enabled).is_empty()
    }

    #[inline]
    pub fn pending(&self) -> InterruptFlags {
        self.pending
    }

    #[inline]
    pub fn enabled(&self) -> InterruptFlags {
        self.enabled
    }

    #[inline]
    pub fn read_enable(&self) -> u8 {
        self.enabled.bits()
    }

    #[inline]
    pub fn write_enable(&mut self, value: u8) {
        self.enabled = InterruptFlags::from_bits_retain(value);
    }

    #[inline]
    pub fn read_flags(&self) -> u8 {
        self.pending.bits() | IF_UNUSED_BITS
    }

    #[inline]
    pub fn write_flags(&mut self, value: u8) {
        self.pending = InterruptFlags::from_bits_truncate(value);
    }
}
