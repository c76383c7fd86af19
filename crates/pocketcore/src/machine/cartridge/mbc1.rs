use crate::OPEN_BUS;

use super::{RAM_BANK_SIZE, RAM_SIZE_CODE};

const ROM_BANK_SIZE: usize = 0x4000;

/// MBC1 controller state.
///
/// ROM banking through the 5-bit low register (0 remaps to 1) plus the
/// 2-bit high register, and up to four 8 KiB RAM banks. In mode 1 the high
/// register also selects the bank mapped at 0x0000 and the RAM bank.
/// Battery persistence is not modelled.
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    bank_low: u8,
    bank_high: u8,
    ram_enabled: bool,
    mode: u8,
}

impl Mbc1 {
    pub(super) fn new(rom: &[u8]) -> Self {
        let rom_banks = (rom.len() / ROM_BANK_SIZE).max(1);
        let ram_banks = match rom.get(RAM_SIZE_CODE).copied().unwrap_or(0) {
            // 2 KiB rounds up to a full bank.
            0x01 | 0x02 => 1,
            0x03 => 4,
            _ => 0,
        };

        Self {
            rom: rom.to_vec(),
            ram: vec![0; ram_banks * RAM_BANK_SIZE],
            rom_banks,
            ram_banks,
            bank_low: 1,
            bank_high: 0,
            ram_enabled: false,
            mode: 0,
        }
    }

    fn rom_bank(&self, offset: u16) -> usize {
        let bank = if offset < 0x4000 {
            if self.mode == 1 {
                usize::from(self.bank_high) << 5
            } else {
                0
            }
        } else {
            (usize::from(self.bank_high) << 5) | usize::from(self.bank_low)
        };
        bank % self.rom_banks
    }

    fn ram_index(&self, offset: u16) -> Option<usize> {
        if !self.ram_enabled || self.ram_banks == 0 {
            return None;
        }
        let bank = if self.mode == 1 {
            usize::from(self.bank_high) % self.ram_banks
        } else {
            0
        };
        Some(bank * RAM_BANK_SIZE + usize::from(offset) % RAM_BANK_SIZE)
    }

    pub(super) fn rom_read(&self, offset: u16) -> u8 {
        let index = self.rom_bank(offset) * ROM_BANK_SIZE + usize::from(offset) % ROM_BANK_SIZE;
        self.rom.get(index).copied().unwrap_or(OPEN_BUS)
    }

    pub(super) fn rom_write(&mut self, offset: u16, value: u8) {
        match offset {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.bank_low = value & 0x1F;
                if self.bank_low == 0 {
                    self.bank_low = 1;
                }
            }
            0x4000..=0x5FFF => self.bank_high = value & 0x03,
            _ => self.mode = value & 0x01,
        }
    }

    pub(super) fn ram_read(&self, offset: u16) -> u8 {
        self.ram_index(offset)
            .and_then(|index| self.ram.get(index).copied())
            .unwrap_or(OPEN_BUS)
    }

    pub(super) fn ram_write(&mut self, offset: u16, value: u8) {
        if let Some(index) = self.ram_index(offset) {
            if let Some(slot) = self.ram.get_mut(index) {
                *slot = value;
            }
        }
    }
}
