use crate::OPEN_BUS;

use super::SystemBus;

const P1: u16 = 0xFF00;
const DIV: u16 = 0xFF04;
const TAC: u16 = 0xFF07;
const IF: u16 = 0xFF0F;
const LCDC: u16 = 0xFF40;
const LYC: u16 = 0xFF45;
const DMA: u16 = 0xFF46;
const BGP: u16 = 0xFF47;
const WX: u16 = 0xFF4B;

impl SystemBus {
    /// 0xFF00-0xFF7F. Registers without a collaborator read open bus.
    pub(super) fn io_read(&self, addr: u16) -> u8 {
        match addr {
            P1 => self.joypad.read(),
            DIV..=TAC => self.timer.read(addr - DIV),
            IF => self.interrupts.read_flags(),
            LCDC..=LYC | BGP..=WX => self.video.read_register(addr),
            DMA => self.dma.register(),
            _ => OPEN_BUS,
        }
    }

    pub(super) fn io_write(&mut self, addr: u16, value: u8) {
        match addr {
            P1 => self.joypad.write(value, &mut self.interrupts),
            DIV..=TAC => self.timer.write(addr - DIV, value),
            IF => self.interrupts.write_flags(value),
            LCDC..=LYC | BGP..=WX => self.video.write_register(addr, value, &mut self.interrupts),
            DMA => self.dma.request(value),
            _ => {}
        }
    }
}
