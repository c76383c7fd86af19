mod mbc1;

use anyhow::{bail, Result};

use crate::OPEN_BUS;

pub use mbc1::Mbc1;

/// Header offset of the cartridge type byte.
const CARTRIDGE_TYPE: usize = 0x0147;
/// Header offset of the RAM size code.
const RAM_SIZE_CODE: usize = 0x0149;
/// The header ends at 0x014F.
const HEADER_END: usize = 0x0150;
const RAM_BANK_SIZE: usize = 0x2000;

/// Cartridge controller behind 0x0000-0x7FFF and 0xA000-0xBFFF.
///
/// Offsets passed in are relative to the start of the window.
pub enum Cartridge {
    RomOnly(RomOnly),
    Mbc1(Mbc1),
}

impl Cartridge {
    /// Pick a controller from the header's cartridge type byte.
    pub fn from_rom(rom: &[u8]) -> Result<Self> {
        if rom.is_empty() {
            bail!("ROM image is empty");
        }
        if rom.len() < HEADER_END {
            bail!(
                "ROM image is {} bytes, too short to hold a cartridge header",
                rom.len()
            );
        }

        let kind = rom[CARTRIDGE_TYPE];
        let cartridge = match kind {
            0x00 => Cartridge::RomOnly(RomOnly::new(rom, false)),
            0x08 | 0x09 => Cartridge::RomOnly(RomOnly::new(rom, true)),
            0x01..=0x03 => Cartridge::Mbc1(Mbc1::new(rom)),
            other => bail!("unsupported cartridge type {other:#04x}"),
        };
        log::debug!("cartridge type {kind:#04x}, {} bytes", rom.len());
        Ok(cartridge)
    }

    pub fn rom_read(&self, offset: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.rom_read(offset),
            Cartridge::Mbc1(c) => c.rom_read(offset),
        }
    }

    /// Writes into the ROM window go to the controller's registers.
    pub fn rom_write(&mut self, offset: u16, value: u8) {
        match self {
            Cartridge::RomOnly(_) => {}
            Cartridge::Mbc1(c) => c.rom_write(offset, value),
        }
    }

    pub fn ram_read(&self, offset: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.ram_read(offset),
            Cartridge::Mbc1(c) => c.ram_read(offset),
        }
    }

    pub fn ram_write(&mut self, offset: u16, value: u8) {
        match self {
            Cartridge::RomOnly(c) => c.ram_write(offset, value),
            Cartridge::Mbc1(c) => c.ram_write(offset, value),
        }
    }
}

/// 32 KiB ROM with an optional, always-enabled 8 KiB RAM.
pub struct RomOnly {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnly {
    fn new(rom: &[u8], with_ram: bool) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: if with_ram {
                vec![0; RAM_BANK_SIZE]
            } else {
                Vec::new()
            },
        }
    }

    fn rom_read(&self, offset: u16) -> u8 {
        self.rom.get(usize::from(offset)).copied().unwrap_or(OPEN_BUS)
    }

    fn ram_read(&self, offset: u16) -> u8 {
        self.ram.get(usize::from(offset)).copied().unwrap_or(OPEN_BUS)
    }

    fn ram_write(&mut self, offset: u16, value: u8) {
        if let Some(slot) = self.ram.get_mut(usize::from(offset)) {
            *slot = value;
        }
    }
}
