mod bus;
mod cartridge;
mod gameboy;
mod joypad;
mod ram;
mod timer;
mod video;

use crate::interrupts::InterruptController;

pub use bus::{Region, SystemBus, MEMORY_MAP};
pub use cartridge::Cartridge;
pub use gameboy::GameBoy;
pub use joypad::Button;

/// A peripheral clocked once per machine cycle by the system bus.
///
/// Interrupt requests go straight into the controller handed in for the
/// tick, so they are visible at the CPU's next poll point.
pub(crate) trait Ticking {
    fn tick(&mut self, interrupts: &mut InterruptController);
}
