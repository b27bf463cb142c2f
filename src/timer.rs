use crate::regs::TimerCtrl;

/// DIV/TIMA/TMA/TAC. Rebased to run off a T-cycle counter directly —
/// DIV is just its high byte — rather than the teacher's M-cycle
/// granular 14-bit `sys_clock` (no CGB double-speed mode here, so
/// there is no reason to keep the extra division step).
#[derive(Default, Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct Timer {
    #[bincode(with_serde)]
    pub(crate) tac: TimerCtrl,
    pub(crate) tma: u8,
    pub(crate) tima: u8,

    /// Internal 16-bit counter incremented every T-cycle. DIV reads its
    /// high byte.
    div_counter: u16,
    apu_event: bool,
    div_reset: bool,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    /// Advances the timer by `t_cycles` T-cycles.
    /// Returns true if a TIMER interrupt should be requested.
    pub(crate) fn tick(&mut self, t_cycles: u32) -> bool {
        let t_cycles = if self.div_reset {
            self.div_reset = false;
            t_cycles.saturating_sub(1)
        } else {
            t_cycles
        };

        let mut timer_intr = false;

        for _ in 0..t_cycles {
            let new = self.div_counter.wrapping_add(1);
            timer_intr = self.tick_from_to(self.div_counter, new) || timer_intr;
            self.div_counter = new;
        }

        timer_intr
    }

    pub(crate) fn set_div(&mut self, _val: u8) {
        self.div_counter = 0;
        self.div_reset = true;
    }

    pub(crate) fn get_div(&self) -> u8 {
        (self.div_counter >> 8) as u8
    }

    /// True on the T-cycle the APU's 512 Hz frame sequencer should step.
    pub(crate) fn is_apu_event(&self) -> bool {
        self.apu_event
    }

    fn tick_from_to(&mut self, old: u16, new: u16) -> bool {
        self.apu_event = has_fallen(old, new, APU_EVENT_BIT);

        if self.tac.enable == 0 {
            return false;
        }

        if !has_fallen(old, new, get_clock_fall_bit(self.tac.clock_select)) {
            return false;
        }

        if self.tima == 0xFF {
            self.tima = self.tma;
            true
        } else {
            self.tima += 1;
            false
        }
    }
}

/// 512 Hz: one fall of bit 12 of a T-cycle counter every 8192 T-cycles.
const APU_EVENT_BIT: u32 = 12;

/// Which bit of the T-cycle counter should fall for TIMA to increment.
#[inline]
fn get_clock_fall_bit(clock_select: u8) -> u32 {
    match clock_select {
        1 => 3,
        2 => 5,
        3 => 7,
        0 => 9,
        _ => unreachable!(),
    }
}

#[inline]
fn has_fallen(old: u16, new: u16, fall_bit: u32) -> bool {
    (old >> fall_bit) & 1 == 1 && (new >> fall_bit) & 1 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_increments_every_256_t_cycles() {
        let mut t = Timer::new();
        t.tick(255);
        assert_eq!(t.get_div(), 0);
        t.tick(1);
        assert_eq!(t.get_div(), 1);
    }

    #[test]
    fn writing_div_resets_it_to_zero() {
        let mut t = Timer::new();
        t.tick(300);
        assert!(t.get_div() > 0);
        t.set_div(0xFF);
        assert_eq!(t.get_div(), 0);
    }

    #[test]
    fn tima_increments_at_selected_rate_when_enabled() {
        let mut t = Timer::new();
        t.tac.enable = 1;
        t.tac.clock_select = 3; // fall bit 7, every 256 T-cycles
        t.tick(256);
        assert_eq!(t.tima, 1);
    }

    #[test]
    fn tima_overflow_loads_tma_and_requests_interrupt_in_same_tick() {
        let mut t = Timer::new();
        t.tac.enable = 1;
        t.tac.clock_select = 3; // fall bit 7, every 256 T-cycles
        t.tma = 0x10;
        t.tima = 0xFF;
        let fired = t.tick(256);
        assert!(fired);
        assert_eq!(t.tima, 0x10);
    }

    #[test]
    fn tima_overflow_with_period_16_reloads_within_one_tick_call() {
        let mut t = Timer::new();
        t.tac.enable = 1;
        t.tac.clock_select = 1; // fall bit 3, every 16 T-cycles
        t.tma = 0xAB;
        t.tima = 0xFF;
        let fired = t.tick(16);
        assert!(fired);
        assert_eq!(t.tima, 0xAB);
    }

    #[test]
    fn disabled_timer_never_increments_tima() {
        let mut t = Timer::new();
        t.tac.enable = 0;
        t.tick(10_000);
        assert_eq!(t.tima, 0);
    }
}
