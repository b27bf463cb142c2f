//! The interrupt controller: IF/IE registers and priority resolution.
//!
//! Split out of the teacher's `Mmu`, which inlined `iflag`/`ienable` as
//! plain fields and resolved priority inline in the CPU's interrupt
//! dispatch. Kept as its own component so the CPU can ask "what's
//! pending" without reaching into the bus for two registers.

use crate::regs::IntrBits;

/// The five interrupt sources, in priority order (lower variants win
/// when more than one is pending at once).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub(crate) fn vector(self) -> u16 {
        use crate::info::*;
        match self {
            Interrupt::VBlank => INT_VBLANK_VEC,
            Interrupt::Stat => INT_STAT_VEC,
            Interrupt::Timer => INT_TIMER_VEC,
            Interrupt::Serial => INT_SERIAL_VEC,
            Interrupt::Joypad => INT_JOYPAD_VEC,
        }
    }

    const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    fn bit(self, bits: IntrBits) -> u8 {
        match self {
            Interrupt::VBlank => bits.vblank,
            Interrupt::Stat => bits.stat,
            Interrupt::Timer => bits.timer,
            Interrupt::Serial => bits.serial,
            Interrupt::Joypad => bits.joypad,
        }
    }

    fn set(self, bits: &mut IntrBits, val: u8) {
        match self {
            Interrupt::VBlank => bits.vblank = val,
            Interrupt::Stat => bits.stat = val,
            Interrupt::Timer => bits.timer = val,
            Interrupt::Serial => bits.serial = val,
            Interrupt::Joypad => bits.joypad = val,
        }
    }
}

#[derive(Default, Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct InterruptController {
    #[bincode(with_serde)]
    iflag: IntrBits,
    #[bincode(with_serde)]
    ienable: IntrBits,
}

impl InterruptController {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Raises a request; it stays pending until `ack`ed regardless of IE.
    pub(crate) fn request(&mut self, kind: Interrupt) {
        kind.set(&mut self.iflag, 1);
    }

    pub(crate) fn ack(&mut self, kind: Interrupt) {
        kind.set(&mut self.iflag, 0);
    }

    /// Highest-priority interrupt that is both requested and enabled,
    /// regardless of IME — callers decide whether IME gates dispatch.
    /// HALT wake-up and the interrupt vector jump both call this, just
    /// with different reactions to `Some`.
    pub(crate) fn pending(&self) -> Option<Interrupt> {
        Interrupt::ALL
            .into_iter()
            .find(|&i| i.bit(self.iflag) == 1 && i.bit(self.ienable) == 1)
    }

    pub(crate) fn any_requested_and_enabled(&self) -> bool {
        self.pending().is_some()
    }

    pub(crate) fn read_if(&self) -> u8 {
        self.iflag.read()
    }

    pub(crate) fn write_if(&mut self, v: u8) {
        self.iflag.write(v | !mask(5));
    }

    pub(crate) fn read_ie(&self) -> u8 {
        self.ienable.read()
    }

    pub(crate) fn write_ie(&mut self, v: u8) {
        self.ienable.write(v);
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
    fn vblank_outranks_joypad() {
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        ic.request(Interrupt::Joypad);
        ic.request(Interrupt::VBlank);
        assert_eq!(ic.pending(), Some(Interrupt::VBlank));
    }

    #[test]
    fn disabled_interrupt_does_not_surface() {
        let mut ic = InterruptController::new();
        ic.write_ie(0x00);
        ic.request(Interrupt::Timer);
        assert_eq!(ic.pending(), None);
    }

    #[test]
    fn ack_clears_the_flag() {
        let mut ic = InterruptController::new();
        ic.write_ie(0x1F);
        ic.request(Interrupt::Stat);
        ic.ack(Interrupt::Stat);
        assert_eq!(ic.pending(), None);
    }

    #[test]
    fn unused_if_bits_read_back_as_one() {
        let mut ic = InterruptController::new();
        ic.write_if(0x00);
        assert_eq!(ic.read_if() & 0xE0, 0xE0);
    }
}
