use crate::interrupts::{Interrupt, InterruptController};

/// The eight DMG buttons.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// Bit in the active-low nibble of its group.
    #[inline]
    fn bit(self) -> u8 {
        match self {
            Button::Right | Button::A => 0x01,
            Button::Left | Button::B => 0x02,
            Button::Up | Button::Select => 0x04,
            Button::Down | Button::Start => 0x08,
        }
    }

    #[inline]
    fn is_dpad(self) -> bool {
        matches!(self, Button::Right | Button::Left | Button::Up | Button::Down)
    }
}

/// P1 / JOYP (0xFF00).
pub(crate) struct Joypad {
    /// Selection bits 4 (d-pad) and 5 (buttons); 0 selects.
    select: u8,
    /// Pressed masks, bit=1 means pressed.
    dpad: u8,
    buttons: u8,
    /// Visible low nibble at the last evaluation.
    last_nibble: u8,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Self {
            select: 0x30,
            dpad: 0,
            buttons: 0,
            last_nibble: 0x0F,
        }
    }

    fn nibble(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.dpad;
        }
        if self.select & 0x20 == 0 {
            low &= !self.buttons;
        }
        low & 0x0F
    }

    pub(crate) fn read(&self) -> u8 {
        0xC0 | self.select | self.nibble()
    }

    pub(crate) fn write(&mut self, value: u8, interrupts: &mut InterruptController) {
        self.select = value & 0x30;
        self.poll(interrupts);
    }

    pub(crate) fn press(&mut self, button: Button) {
        if button.is_dpad() {
            self.dpad |= button.bit();
        } else {
            self.buttons |= button.bit();
        }
    }

    pub(crate) fn release(&mut self, button: Button) {
        if button.is_dpad() {
            self.dpad &= !button.bit();
        } else {
            self.buttons &= !button.bit();
        }
    }

    /// Request the Joypad interrupt if any visible line went high to low
    /// since the last evaluation.
    pub(crate) fn poll(&mut self, interrupts: &mut InterruptController) {
        let nibble = self.nibble();
        if self.last_nibble & !nibble != 0 {
            interrupts.request(Interrupt::Joypad);
        }
        self.last_nibble = nibble;
    }
}
