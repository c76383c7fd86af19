use super::super::video::OAM_SIZE;
use super::SystemBus;

/// Fast clock ticks per byte copied.
const TICKS_PER_BYTE: u8 = 4;
/// High RAM and IE stay reachable by the CPU during a transfer.
const HIGH_RAM_START: u16 = 0xFF80;

/// OAM DMA engine state.
#[derive(Default)]
pub(super) struct Dma {
    active: bool,
    bytes_remaining: u8,
    source_address: u16,
    sub_tick: u8,
    /// Source page written to 0xFF46, armed at the end of the cycle.
    pending: Option<u8>,
    /// Last value written to 0xFF46.
    register: u8,
}

impl Dma {
    #[inline]
    pub(super) fn blocks(&self, addr: u16) -> bool {
        self.active && self.bytes_remaining > 0 && addr < HIGH_RAM_START
    }

    #[inline]
    pub(super) fn register(&self) -> u8 {
        self.register
    }

    pub(super) fn request(&mut self, source_high: u8) {
        self.register = source_high;
        self.pending = Some(source_high);
    }

    #[inline]
    pub(super) fn take_pending(&mut self) -> Option<u8> {
        self.pending.take()
    }
}

impl SystemBus {
    /// Arm a 160-byte transfer from `source_high << 8` into OAM. A transfer
    /// already in flight restarts.
    pub fn start_dma(&mut self, source_high: u8) {
        let dma = &mut self.dma;
        dma.active = true;
        dma.bytes_remaining = OAM_SIZE as u8;
        dma.source_address = u16::from(source_high) << 8;
        dma.sub_tick = 0;
        log::debug!("OAM DMA from {:#06x}", dma.source_address);
    }

    /// One fast clock tick of the DMA engine. Copies at most one byte.
    pub fn tick_dma(&mut self) {
        if !self.dma.active {
            return;
        }
        self.dma.sub_tick += 1;
        if self.dma.sub_tick < TICKS_PER_BYTE {
            return;
        }
        self.dma.sub_tick = 0;

        let index = OAM_SIZE as u16 - u16::from(self.dma.bytes_remaining);
        let value = self.read_routed(self.dma.source_address.wrapping_add(index));
        self.video.write_oam_raw(index, value);

        self.dma.bytes_remaining -= 1;
        if self.dma.bytes_remaining == 0 {
            self.dma.active = false;
        }
    }

    #[inline]
    pub fn dma_active(&self) -> bool {
        self.dma.active
    }
}
