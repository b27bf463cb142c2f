//! Real-time pacing, kept out of the CPU step entirely. The teacher's
//! `Emulator::run` busy-waits against `Instant::elapsed` after a batch
//! of steps; this collaborator owns the same epoch/accumulator idea
//! but is its own type so the step loop only has to call `account`
//! and `maybe_sleep`.

use std::thread;
use std::time::{Duration, Instant};

use crate::info::FREQUENCY;

/// How the emulator's step loop should track real time.
#[derive(Clone, Copy, Debug)]
pub enum PaceMode {
    /// Sleep to track 4.194304 MHz.
    RealTime,
    /// Never sleep; run as fast as the host allows.
    MaxSpeed,
    /// Sleep to track `multiplier` times real-time speed.
    Multiplier(f64),
    /// Sleep to land on 1/60s frame boundaries rather than tracking
    /// per-cycle, which smooths out scheduling jitter within a frame.
    FrameWall,
}

/// Tracks accumulated T-cycles against an `Instant` epoch and sleeps
/// off any surplus. Knows nothing about the CPU, MMU, or any other
/// subsystem.
pub struct Clock {
    mode: PaceMode,
    epoch: Instant,
    tcycles: u64,
}

impl Clock {
    pub fn new(mode: PaceMode) -> Self {
        Self { mode, epoch: Instant::now(), tcycles: 0 }
    }

    pub fn set_mode(&mut self, mode: PaceMode) {
        self.mode = mode;
    }

    pub(crate) fn mode(&self) -> PaceMode {
        self.mode
    }

    /// Resets the epoch and accumulator; call after a pause/resume or
    /// any discontinuity (save-state load) so pacing doesn't try to
    /// catch up on cycles that were never really spent.
    pub(crate) fn reset(&mut self) {
        self.epoch = Instant::now();
        self.tcycles = 0;
    }

    pub(crate) fn account(&mut self, tcycles: u32) {
        self.tcycles += tcycles as u64;
    }

    /// Sleeps off however far ahead of real time the emulator has run,
    /// per the current `PaceMode`. A no-op in `MaxSpeed`.
    pub(crate) fn maybe_sleep(&mut self) {
        let target_freq = match self.mode {
            PaceMode::MaxSpeed => return,
            PaceMode::RealTime => FREQUENCY as f64,
            PaceMode::Multiplier(m) => FREQUENCY as f64 * m,
            PaceMode::FrameWall => {
                self.sleep_to_frame_wall();
                return;
            }
        };

        let elapsed = self.epoch.elapsed().as_secs_f64();
        let expected = self.tcycles as f64 / target_freq;

        if expected > elapsed {
            thread::sleep(Duration::from_secs_f64(expected - elapsed));
        }
    }

    fn sleep_to_frame_wall(&mut self) {
        const FRAME_SECS: f64 = 1.0 / 60.0;

        let elapsed = self.epoch.elapsed().as_secs_f64();
        let frame_idx = (self.tcycles as f64 / FREQUENCY as f64 / FRAME_SECS).floor();
        let next_wall = (frame_idx + 1.0) * FRAME_SECS;

        if next_wall > elapsed {
            thread::sleep(Duration::from_secs_f64(next_wall - elapsed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_speed_never_sleeps() {
        let mut clock = Clock::new(PaceMode::MaxSpeed);
        clock.account(1_000_000);
        let before = Instant::now();
        clock.maybe_sleep();
        assert!(before.elapsed() < Duration::from_millis(5));
    }

    #[test]
    fn reset_clears_accumulated_cycles() {
        let mut clock = Clock::new(PaceMode::RealTime);
        clock.account(1000);
        clock.reset();
        assert_eq!(clock.tcycles, 0);
    }
}
