//! Joypad matrix. Split out of the teacher's `Mmu`, which kept the
//! `P1` register and button latches as bare fields and resolved the
//! interrupt condition inline in `write_reg`.

use crate::interrupts::{Interrupt, InterruptController};
use crate::regs::{ActionButtons, DPad, JoyPad};

#[derive(Default, Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct Joypad {
    #[bincode(with_serde)]
    p1: JoyPad,
    #[bincode(with_serde)]
    dpad: DPad,
    #[bincode(with_serde)]
    buttons: ActionButtons,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn read_p1(&self) -> u8 {
        self.p1.read() | !mask(6)
    }

    pub(crate) fn write_p1(&mut self, v: u8) {
        let combined = (self.p1.read() & mask(4)) | (v & !mask(4));
        self.p1.write(combined);
        self.refresh_state(None);
    }

    /// Latches a new host button state. Raises a Joypad interrupt if
    /// any currently-selected line transitions from released to pressed.
    pub(crate) fn set_buttons(&mut self, dpad: DPad, buttons: ActionButtons, ic: &mut InterruptController) {
        self.refresh_state(Some((dpad, buttons)));
        if self.falling_edge_on_selected_line(dpad, buttons) {
            ic.request(Interrupt::Joypad);
        }
        self.dpad = dpad;
        self.buttons = buttons;
    }

    fn falling_edge_on_selected_line(&self, new_dpad: DPad, new_buttons: ActionButtons) -> bool {
        let old = self.selected_lines(self.dpad, self.buttons);
        let new = self.selected_lines(new_dpad, new_buttons);
        // A selected line falls (released -> pressed, i.e. 1 -> 0).
        (old & !new) & mask(4) != 0
    }

    fn selected_lines(&self, dpad: DPad, buttons: ActionButtons) -> u8 {
        let mut lines = mask(4); // 0 means pressed.
        if self.p1.select_dpad == 0 {
            lines &= !dpad.read();
        }
        if self.p1.select_buttons == 0 {
            lines &= !buttons.read();
        }
        lines
    }

    fn refresh_state(&mut self, new: Option<(DPad, ActionButtons)>) {
        let (dpad, buttons) = new.unwrap_or((self.dpad, self.buttons));
        self.p1.write((self.p1.read() & !mask(4)) | self.selected_lines(dpad, buttons));
    }
}

#[inline(always)]
const fn mask(bit_cnt: u32) -> u8 {
    u8::MAX >> (8 - bit_cnt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressing_a_selected_dpad_button_raises_joypad_interrupt() {
        let mut jp = Joypad::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        jp.write_p1(0b0010_0000); // select dpad (bit4=0)

        let pressed = DPad { right: 1, ..Default::default() };
        jp.set_buttons(pressed, Default::default(), &mut ic);

        assert_eq!(ic.pending(), Some(Interrupt::Joypad));
    }

    #[test]
    fn unselected_lines_do_not_raise_interrupt() {
        let mut jp = Joypad::new();
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        jp.write_p1(0b0001_0000); // select buttons only, dpad deselected

        let pressed = DPad { right: 1, ..Default::default() };
        jp.set_buttons(pressed, Default::default(), &mut ic);

        assert_eq!(ic.pending(), None);
    }
}
