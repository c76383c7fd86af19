use crate::interrupts::InterruptController;

/// The CPU's view of the system bus.
///
/// Every `read8`/`write8` is one machine cycle: implementations perform the
/// access and then advance every ticking peripheral by exactly one cycle.
/// `idle` spends a cycle without touching memory.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
    /// One machine cycle with no memory access.
    fn idle(&mut self);
    /// The interrupt controller peripherals report into.
    fn interrupts(&mut self) -> &mut InterruptController;
}
