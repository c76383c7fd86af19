pub(crate) const WRAM_SIZE: usize = 0x2000;
pub(crate) const HRAM_SIZE: usize = 0x7F;

/// Plain byte-addressed RAM. Offsets wrap at the block size so the echo
/// window can share the work RAM block.
pub(crate) struct Ram {
    bytes: Vec<u8>,
}

impl Ram {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    #[inline]
    pub(crate) fn read(&self, offset: u16) -> u8 {
        self.bytes[usize::from(offset) % self.bytes.len()]
    }

    #[inline]
    pub(crate) fn write(&mut self, offset: u16, value: u8) {
        let len = self.bytes.len();
        self.bytes[usize::from(offset) % len] = value;
    }
}
