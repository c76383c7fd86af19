/// A window of the 16-bit address space owned by one collaborator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Region {
    Rom,
    VideoRam,
    CartridgeRam,
    WorkRam,
    /// Mirror of the first 0x1E00 bytes of work RAM.
    Echo,
    Oam,
    /// Reads open bus, writes are dropped.
    Unusable,
    Io,
    HighRam,
    InterruptEnable,
}

/// `(first, last, owner)`, inclusive, in address order.
pub const MEMORY_MAP: [(u16, u16, Region); 10] = [
    (0x0000, 0x7FFF, Region::Rom),
    (0x8000, 0x9FFF, Region::VideoRam),
    (0xA000, 0xBFFF, Region::CartridgeRam),
    (0xC000, 0xDFFF, Region::WorkRam),
    (0xE000, 0xFDFF, Region::Echo),
    (0xFE00, 0xFE9F, Region::Oam),
    (0xFEA0, 0xFEFF, Region::Unusable),
    (0xFF00, 0xFF7F, Region::Io),
    (0xFF80, 0xFFFE, Region::HighRam),
    (0xFFFF, 0xFFFF, Region::InterruptEnable),
];

impl Region {
    pub fn of(addr: u16) -> Option<Region> {
        MEMORY_MAP
            .iter()
            .find(|(first, last, _)| (*first..=*last).contains(&addr))
            .map(|&(_, _, region)| region)
    }

    /// First address of the window; offsets handed to collaborators are
    /// relative to it.
    pub fn start(self) -> u16 {
        MEMORY_MAP
            .iter()
            .find(|(_, _, region)| *region == self)
            .map_or(0, |&(first, _, _)| first)
    }
}
