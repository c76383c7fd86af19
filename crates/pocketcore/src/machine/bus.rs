use crate::config::MachineConfig;
use crate::cpu::Bus;
use crate::interrupts::InterruptController;
use crate::{OPEN_BUS, TCYCLES_PER_MCYCLE};

use super::cartridge::Cartridge;
use super::joypad::{Button, Joypad};
use super::ram::{Ram, HRAM_SIZE, WRAM_SIZE};
use super::timer::Timer;
use super::video::Video;
use super::Ticking;

mod dma;
mod io;
mod map;

use dma::Dma;
pub use map::{Region, MEMORY_MAP};

/// The machine's shared bus.
///
/// Owns every peripheral and the interrupt controller. Each CPU access
/// resolves its address through [`MEMORY_MAP`], performs the access and
/// then runs exactly one machine cycle of peripheral time.
pub struct SystemBus {
    interrupts: InterruptController,
    cartridge: Cartridge,
    video: Video,
    timer: Timer,
    joypad: Joypad,
    wram: Ram,
    hram: Ram,
    dma: Dma,
    /// Machine cycles elapsed since construction or reset.
    cycles: u64,
    joypad_poll_interval: u32,
    joypad_countdown: u32,
}

impl SystemBus {
    pub fn new(cartridge: Cartridge, config: &MachineConfig) -> Self {
        let interval = config.joypad_poll_interval.max(1);
        Self {
            interrupts: InterruptController::new(),
            cartridge,
            video: Video::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            wram: Ram::new(WRAM_SIZE),
            hram: Ram::new(HRAM_SIZE),
            dma: Dma::default(),
            cycles: 0,
            joypad_poll_interval: interval,
            joypad_countdown: interval,
        }
    }

    /// Return every peripheral to its power-on state. Cartridge contents
    /// and controller registers are kept.
    pub fn reset(&mut self) {
        self.interrupts.reset();
        self.video = Video::new();
        self.timer = Timer::new();
        self.joypad = Joypad::new();
        self.wram = Ram::new(WRAM_SIZE);
        self.hram = Ram::new(HRAM_SIZE);
        self.dma = Dma::default();
        self.cycles = 0;
        self.joypad_countdown = self.joypad_poll_interval;
    }

    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn interrupt_controller(&self) -> &InterruptController {
        &self.interrupts
    }

    /// Read without DMA blocking or any passage of time.
    pub fn peek(&self, addr: u16) -> u8 {
        self.read_routed(addr)
    }

    pub fn press(&mut self, button: Button) {
        self.joypad.press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.joypad.release(button);
    }

    /// Resolve `addr` through the memory map and read it. No time passes.
    fn read_routed(&self, addr: u16) -> u8 {
        let Some(region) = Region::of(addr) else {
            return OPEN_BUS;
        };
        let offset = addr - region.start();
        match region {
            Region::Rom => self.cartridge.rom_read(offset),
            Region::VideoRam => self.video.read_vram(offset),
            Region::CartridgeRam => self.cartridge.ram_read(offset),
            Region::WorkRam | Region::Echo => self.wram.read(offset),
            Region::Oam => self.video.read_oam(offset),
            Region::Unusable => OPEN_BUS,
            Region::Io => self.io_read(addr),
            Region::HighRam => self.hram.read(offset),
            Region::InterruptEnable => self.interrupts.read_enable(),
        }
    }

    fn write_routed(&mut self, addr: u16, value: u8) {
        let Some(region) = Region::of(addr) else {
            return;
        };
        let offset = addr - region.start();
        match region {
            Region::Rom => self.cartridge.rom_write(offset, value),
            Region::VideoRam => self.video.write_vram(offset, value),
            Region::CartridgeRam => self.cartridge.ram_write(offset, value),
            Region::WorkRam | Region::Echo => self.wram.write(offset, value),
            Region::Oam => self.video.write_oam(offset, value),
            Region::Unusable => {}
            Region::Io => self.io_write(addr, value),
            Region::HighRam => self.hram.write(offset, value),
            Region::InterruptEnable => self.interrupts.write_enable(value),
        }
    }

    /// One machine cycle of peripheral time, in fixed order: video, timer,
    /// four DMA ticks, joypad poll.
    fn cycle(&mut self) {
        self.video.tick(&mut self.interrupts);
        self.timer.tick(&mut self.interrupts);
        for _ in 0..TCYCLES_PER_MCYCLE {
            self.tick_dma();
        }
        if let Some(source_high) = self.dma.take_pending() {
            self.start_dma(source_high);
        }

        self.joypad_countdown -= 1;
        if self.joypad_countdown == 0 {
            self.joypad_countdown = self.joypad_poll_interval;
            self.joypad.poll(&mut self.interrupts);
        }

        self.cycles += 1;
    }
}

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        let value = if self.dma.blocks(addr) {
            OPEN_BUS
        } else {
            self.read_routed(addr)
        };
        self.cycle();
        value
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if !self.dma.blocks(addr) {
            self.write_routed(addr, value);
        }
        self.cycle();
    }

    fn idle(&mut self) {
        self.cycle();
    }

    fn interrupts(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}
