//! LCD controller surface: VRAM, OAM, the 0xFF40-0xFF4B registers and the
//! scanline timing that drives LY, STAT and the VBlank/STAT interrupts.
//! No pixels are produced.

use crate::interrupts::{Interrupt, InterruptController};
use crate::{OPEN_BUS, TCYCLES_PER_MCYCLE};

use super::Ticking;

pub(crate) const VRAM_SIZE: usize = 0x2000;
pub(crate) const OAM_SIZE: usize = 0xA0;

const DOTS_PER_LINE: u16 = 456;
const LINES_PER_FRAME: u8 = 154;
const VBLANK_LINE: u8 = 144;
/// Mode 2 ends at dot 80, mode 3 at dot 252 (fixed-length transfer).
const OAM_SCAN_END: u16 = 80;
const TRANSFER_END: u16 = OAM_SCAN_END + 172;

const LCDC_ENABLE: u8 = 0x80;
const STAT_WRITABLE: u8 = 0x78;
const STAT_LYC_SELECT: u8 = 0x40;
const STAT_MODE2_SELECT: u8 = 0x20;
const STAT_MODE1_SELECT: u8 = 0x10;
const STAT_MODE0_SELECT: u8 = 0x08;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

pub(crate) struct Video {
    vram: Box<[u8; VRAM_SIZE]>,
    oam: [u8; OAM_SIZE],
    lcdc: u8,
    /// STAT interrupt selects (bits 3-6 only).
    stat_select: u8,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,
    /// Dot position within the current line.
    dot: u16,
    mode: Mode,
    /// OR of the enabled STAT sources as of the last update; the
    /// interrupt fires on its rising edge.
    stat_line: bool,
}

impl Video {
    /// Post-boot DMG state: LCD on, BGP=0xFC, top of frame.
    pub(crate) fn new() -> Self {
        let mut video = Self {
            vram: Box::new([0; VRAM_SIZE]),
            oam: [0; OAM_SIZE],
            lcdc: 0x91,
            stat_select: 0x00,
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            wy: 0,
            wx: 0,
            dot: 0,
            mode: Mode::OamScan,
            stat_line: false,
        };
        video.mode = video.current_mode();
        video
    }

    #[inline]
    fn lcd_enabled(&self) -> bool {
        self.lcdc & LCDC_ENABLE != 0
    }

    fn current_mode(&self) -> Mode {
        if !self.lcd_enabled() {
            Mode::HBlank
        } else if self.ly >= VBLANK_LINE {
            Mode::VBlank
        } else if self.dot < OAM_SCAN_END {
            Mode::OamScan
        } else if self.dot < TRANSFER_END {
            Mode::Transfer
        } else {
            Mode::HBlank
        }
    }

    fn vram_accessible(&self) -> bool {
        self.mode != Mode::Transfer
    }

    fn oam_accessible(&self) -> bool {
        matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }

    pub(crate) fn read_vram(&self, offset: u16) -> u8 {
        if !self.vram_accessible() {
            return OPEN_BUS;
        }
        self.vram[usize::from(offset) % VRAM_SIZE]
    }

    pub(crate) fn write_vram(&mut self, offset: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[usize::from(offset) % VRAM_SIZE] = value;
        }
    }

    pub(crate) fn read_oam(&self, offset: u16) -> u8 {
        if !self.oam_accessible() {
            return OPEN_BUS;
        }
        self.oam.get(usize::from(offset)).copied().unwrap_or(OPEN_BUS)
    }

    pub(crate) fn write_oam(&mut self, offset: u16, value: u8) {
        if self.oam_accessible() {
            self.write_oam_raw(offset, value);
        }
    }

    /// OAM write that ignores mode blocking (used by DMA).
    pub(crate) fn write_oam_raw(&mut self, offset: u16, value: u8) {
        if let Some(slot) = self.oam.get_mut(usize::from(offset)) {
            *slot = value;
        }
    }

    /// Read one of 0xFF40-0xFF45 / 0xFF47-0xFF4B.
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc,
            0xFF41 => {
                let coincidence = if self.ly == self.lyc { 0x04 } else { 0x00 };
                0x80 | self.stat_select | coincidence | self.mode as u8
            }
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => OPEN_BUS,
        }
    }

    pub(crate) fn write_register(
        &mut self,
        addr: u16,
        value: u8,
        interrupts: &mut InterruptController,
    ) {
        match addr {
            0xFF40 => {
                let was_enabled = self.lcd_enabled();
                self.lcdc = value;
                if was_enabled != self.lcd_enabled() {
                    // Either edge restarts the frame at LY 0.
                    self.ly = 0;
                    self.dot = 0;
                    self.stat_line = false;
                }
            }
            0xFF41 => self.stat_select = value & STAT_WRITABLE,
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => self.lyc = value,
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
        self.update_stat(interrupts);
    }

    /// Recompute the mode and the STAT interrupt line, requesting
    /// LCD_STAT on a rising edge.
    fn update_stat(&mut self, interrupts: &mut InterruptController) {
        self.mode = self.current_mode();
        if !self.lcd_enabled() {
            self.stat_line = false;
            return;
        }

        let select = self.stat_select;
        let line = (select & STAT_LYC_SELECT != 0 && self.ly == self.lyc)
            || (select & STAT_MODE2_SELECT != 0 && self.mode == Mode::OamScan)
            || (select & STAT_MODE1_SELECT != 0 && self.mode == Mode::VBlank)
            || (select & STAT_MODE0_SELECT != 0 && self.mode == Mode::HBlank);

        if line && !self.stat_line {
            interrupts.request(Interrupt::LcdStat);
        }
        self.stat_line = line;
    }
}

impl Ticking for Video {
    fn tick(&mut self, interrupts: &mut InterruptController) {
        if !self.lcd_enabled() {
            return;
        }

        self.dot += TCYCLES_PER_MCYCLE as u16;
        if self.dot >= DOTS_PER_LINE {
            self.dot -= DOTS_PER_LINE;
            self.ly = (self.ly + 1) % LINES_PER_FRAME;
            if self.ly == VBLANK_LINE {
                interrupts.request(Interrupt::VBlank);
                log::trace!("VBlank");
            }
        }
        self.update_stat(interrupts);
    }
}
