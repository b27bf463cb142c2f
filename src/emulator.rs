//! The top-level orchestrator. Owns every subsystem directly (flat
//! ownership, no `Mmu` struct holding them a level down) and builds a
//! `Bus` fresh for the span of a single CPU step, the way the crate's
//! `bus.rs`/`mmu.rs` doc comments describe. The teacher's own
//! `emulator.rs` wires a `Cpu`-that-owns-an-`Mmu` straight into
//! `macroquad`/channel plumbing; this version keeps the teacher's
//! batch-steps-then-pace loop shape but drives the subsystems through
//! the trait boundary in `sinks.rs` instead.

use log::{debug, warn};

use crate::apu::Apu;
use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::clock::{Clock, PaceMode};
use crate::cpu::{decoder, Cpu};
use crate::dma::Dma;
use crate::error::EmulatorError;
use crate::info::{self, FREQUENCY, SIZE_HRAM, SIZE_WRAM_BANK, WRAM_BANKS};
use crate::interrupts::{Interrupt, InterruptController};
use crate::joypad::Joypad;
use crate::mmu;
use crate::ppu::Ppu;
use crate::serial::Serial;
use crate::sinks::{self, AudioSink, ButtonState, InputSource, SinkError, VideoSink};
use crate::timer::Timer;

const WRAM_SIZE: usize = SIZE_WRAM_BANK * WRAM_BANKS;

/// Everything a save state needs to resume play: every subsystem that
/// holds persistent machine state. Deliberately excludes `clock`
/// (real-time pacing, meaningless across a save/load boundary), the
/// sinks and input source (host-supplied, not emulator state), and the
/// last-polled `buttons` snapshot (re-derived on the next poll).
#[derive(bincode::Encode, bincode::Decode)]
struct SavedState {
    cart: Cartridge,
    ppu: Ppu,
    apu: Apu,
    timer: Timer,
    ic: InterruptController,
    joypad: Joypad,
    dma: Dma,
    serial: Serial,
    wram: [u8; WRAM_SIZE],
    hram: [u8; SIZE_HRAM],
    cpu: Cpu,
}

/// A fully assembled Game Boy: every owned subsystem plus the external
/// sinks a host frontend supplied at construction.
pub struct Emulator {
    cart: Cartridge,
    ppu: Ppu,
    apu: Apu,
    timer: Timer,
    ic: InterruptController,
    joypad: Joypad,
    dma: Dma,
    serial: Serial,
    wram: [u8; WRAM_SIZE],
    hram: [u8; SIZE_HRAM],
    cpu: Cpu,
    clock: Clock,

    video_sink: Box<dyn VideoSink>,
    audio_sink: Box<dyn AudioSink>,
    input_source: Box<dyn InputSource>,
    buttons: ButtonState,

    sample_period_dots: u32,
    stop_requested: bool,
}

/// Borrows exactly the fields the MMU's routing functions need, for
/// the span of the call site that builds it. A free function, not a
/// `&mut self` method: a method's receiver borrows all of `self` as
/// far as the type system is concerned, which would make `self.cpu`
/// unreachable for the rest of the step. Calling this with explicit
/// `&mut self.field` arguments instead borrows only those fields,
/// mirroring the `test_bus` helper in `mmu.rs`'s own test module.
fn assemble_bus<'a>(
    cart: &'a mut Cartridge,
    ppu: &'a mut Ppu,
    apu: &'a mut Apu,
    timer: &'a mut Timer,
    ic: &'a mut InterruptController,
    joypad: &'a mut Joypad,
    dma: &'a mut Dma,
    serial: &'a mut Serial,
    wram: &'a mut [u8],
    hram: &'a mut [u8; SIZE_HRAM],
) -> Bus<'a> {
    Bus { cart, ppu, apu, timer, ic, joypad, dma, serial, wram, hram }
}

macro_rules! bus {
    ($self:ident) => {
        assemble_bus(
            &mut $self.cart,
            &mut $self.ppu,
            &mut $self.apu,
            &mut $self.timer,
            &mut $self.ic,
            &mut $self.joypad,
            &mut $self.dma,
            &mut $self.serial,
            &mut $self.wram,
            &mut $self.hram,
        )
    };
}

impl Emulator {
    /// Loads `rom`, wires up the given sinks and input source, and
    /// brings every subsystem to the post-boot register state (no
    /// boot ROM is executed, per SPEC_FULL §4.1/Non-goals).
    pub fn new(
        rom: &[u8],
        video_sink: Box<dyn VideoSink>,
        audio_sink: Box<dyn AudioSink>,
        input_source: Box<dyn InputSource>,
        pace_mode: PaceMode,
        sample_rate_hz: u32,
    ) -> Result<Self, EmulatorError> {
        let cart = Cartridge::new(rom)?;
        let sample_period_dots = FREQUENCY / sample_rate_hz.max(1);

        let mut emu = Self {
            cart,
            ppu: Ppu::new(),
            apu: Apu::new(),
            timer: Timer::new(),
            ic: InterruptController::new(),
            joypad: Joypad::new(),
            dma: Dma::new(),
            serial: Serial::new(),
            wram: [0; WRAM_SIZE],
            hram: [0; SIZE_HRAM],
            cpu: Cpu::new(),
            clock: Clock::new(pace_mode),

            video_sink,
            audio_sink,
            input_source,
            buttons: ButtonState::default(),

            sample_period_dots,
            stop_requested: false,
        };
        emu.init_post_boot_registers();
        Ok(emu)
    }

    /// Runs steps until a video frame completes or a stop is
    /// requested, whichever comes first. The natural unit of work for
    /// a frontend's render loop.
    pub fn run_until_frame(&mut self) -> Result<(), EmulatorError> {
        while !self.stop_requested {
            if self.step()? {
                break;
            }
        }
        Ok(())
    }

    /// Runs one CPU step (either one fetched instruction, one
    /// serviced interrupt, or 4 idle T-cycles while halted/stopped),
    /// then advances every other subsystem by the T-cycles consumed.
    /// Returns `true` if this step completed a video frame.
    pub fn step(&mut self) -> Result<bool, EmulatorError> {
        let was_pending = self.cpu.ime_pending();

        let tcycles = {
            let mut bus = bus!(self);
            if let Some(c) = self.cpu.service_interrupts(&mut bus) {
                c
            } else if self.cpu.is_halted() || self.cpu.is_stopped() {
                4
            } else {
                let pc_before = self.cpu.pc();
                let (ins, next_pc) = decoder::decode(&mut bus, pc_before);
                self.cpu.set_pc(next_pc);
                let consumed = self.cpu.execute_instruction(&mut bus, ins)?;
                if self.cpu.take_halt_bug() {
                    self.cpu.set_pc(pc_before);
                }
                consumed
            }
        };
        self.cpu.finish_step(was_pending);

        self.advance_subsystems(tcycles);
        self.clock.account(tcycles);

        let frame_ready = self.ppu.take_frame_ready();
        if frame_ready {
            self.present_frame()?;
        }
        self.drain_audio()?;

        self.clock.maybe_sleep();
        Ok(frame_ready)
    }

    /// Re-derives every owned subsystem to its post-boot state,
    /// regardless of how long the emulator has been running (SPEC_FULL
    /// §8 invariant 6). Cartridge external RAM is included: rebuilding
    /// the `Cartridge` from its original ROM image re-zeroes it the
    /// same way a fresh `Cartridge::new` would.
    pub fn reset(&mut self) -> Result<(), EmulatorError> {
        let rom = self.cart.rom_bytes().to_vec();
        self.cart = Cartridge::new(&rom)?;
        self.ppu = Ppu::new();
        self.apu = Apu::new();
        self.timer = Timer::new();
        self.ic = InterruptController::new();
        self.joypad = Joypad::new();
        self.dma = Dma::new();
        self.serial = Serial::new();
        self.wram = [0; WRAM_SIZE];
        self.hram = [0; SIZE_HRAM];
        self.cpu = Cpu::new();
        self.clock.reset();
        self.stop_requested = false;

        self.init_post_boot_registers();
        Ok(())
    }

    /// Signals that the step loop should stop at the next step
    /// boundary. Checked at the top of `run_until_frame`'s loop.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Routes an input event straight through to the input source.
    /// Only meaningful for an event-driven `InputSource`; a polling
    /// one can ignore it.
    pub fn process_input_event(&mut self, button: sinks::Button, pressed: bool) {
        self.input_source.process_event(button, pressed);
    }

    /// Access to the cartridge, for save-RAM persistence between runs.
    pub fn cartridge(&self) -> &Cartridge {
        &self.cart
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.cart
    }

    pub fn set_pace_mode(&mut self, mode: PaceMode) {
        self.clock.set_mode(mode);
        self.clock.reset();
    }

    /// Snapshots every persistent subsystem into a save-state blob. The
    /// sinks, input source, and real-time pacing clock a frontend wires
    /// up are not part of the blob; `from_saved` re-supplies them.
    pub fn save_state(&self) -> Result<Vec<u8>, EmulatorError> {
        let snapshot = SavedState {
            cart: self.cart.clone(),
            ppu: self.ppu.clone(),
            apu: self.apu.clone(),
            timer: self.timer.clone(),
            ic: self.ic.clone(),
            joypad: self.joypad.clone(),
            dma: self.dma.clone(),
            serial: self.serial.clone(),
            wram: self.wram,
            hram: self.hram,
            cpu: self.cpu.clone(),
        };
        Ok(bincode::encode_to_vec(&snapshot, bincode::config::standard())?)
    }

    /// Restores an `Emulator` from a blob produced by `save_state`,
    /// wiring up freshly supplied sinks/input/pace rather than trying
    /// to serialize those. The cartridge's ROM travels inside the save
    /// state itself, so unlike `new` this doesn't take a `rom` argument.
    pub fn from_saved(
        data: &[u8],
        video_sink: Box<dyn VideoSink>,
        audio_sink: Box<dyn AudioSink>,
        input_source: Box<dyn InputSource>,
        pace_mode: PaceMode,
        sample_rate_hz: u32,
    ) -> Result<Self, EmulatorError> {
        let (saved, _): (SavedState, usize) =
            bincode::decode_from_slice(data, bincode::config::standard())?;
        let sample_period_dots = FREQUENCY / sample_rate_hz.max(1);

        Ok(Self {
            cart: saved.cart,
            ppu: saved.ppu,
            apu: saved.apu,
            timer: saved.timer,
            ic: saved.ic,
            joypad: saved.joypad,
            dma: saved.dma,
            serial: saved.serial,
            wram: saved.wram,
            hram: saved.hram,
            cpu: saved.cpu,
            clock: Clock::new(pace_mode),

            video_sink,
            audio_sink,
            input_source,
            buttons: ButtonState::default(),

            sample_period_dots,
            stop_requested: false,
        })
    }

    /// Pulls just the cartridge ROM image back out of a save-state
    /// blob, for a frontend's `extract-rom` command. Avoids requiring
    /// callers to reconstruct a whole `Emulator` just to recover the
    /// ROM bytes a save file was made from.
    pub fn rom_from_saved(data: &[u8]) -> Result<Vec<u8>, EmulatorError> {
        let (saved, _): (SavedState, usize) =
            bincode::decode_from_slice(data, bincode::config::standard())?;
        Ok(saved.cart.rom_bytes().to_vec())
    }

    /// Advances Timer, PPU, APU, DMA, and the cartridge's RTC by the
    /// cycles the CPU phase just consumed. Per SPEC_FULL §4.1 these do
    /// not interact within a step, so the order between them doesn't
    /// matter; interrupts any of them raise land in `ic` for the next
    /// step's `service_interrupts` call to see.
    fn advance_subsystems(&mut self, tcycles: u32) {
        if self.timer.tick(tcycles) {
            self.ic.request(Interrupt::Timer);
        }
        let apu_ticks = self.timer.is_apu_event() as u8;
        self.apu.tick(tcycles, apu_ticks);

        let ppu_intrs = self.ppu.tick(tcycles as u16);
        mmu::request_interrupt(&mut self.ic, ppu_intrs);

        self.dma.tick(&self.cart, &mut self.ppu, &self.wram, &self.hram, tcycles);
        self.cart.tick(tcycles);

        let new_buttons = sinks::poll(&*self.input_source);
        if new_buttons != self.buttons {
            let (dpad, action) = new_buttons.to_internal_repr();
            self.joypad.set_buttons(dpad, action, &mut self.ic);
            self.buttons = new_buttons;
        }
    }

    fn present_frame(&mut self) -> Result<(), EmulatorError> {
        match self.video_sink.present(self.ppu.framebuffer()) {
            Ok(()) => Ok(()),
            Err(SinkError::BufferFull) => {
                warn!("emulator: video sink reported buffer full, frame dropped");
                Ok(())
            }
            Err(SinkError::Other(source)) => Err(EmulatorError::HostSinkFailure { source }),
        }
    }

    fn drain_audio(&mut self) -> Result<(), EmulatorError> {
        let samples = self.apu.drain_samples();
        if samples.is_empty() {
            return Ok(());
        }
        let samples: Vec<i16> = samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
            .collect();

        match self.audio_sink.push_samples(&samples) {
            Ok(()) => Ok(()),
            Err(SinkError::BufferFull) => {
                warn!("emulator: audio sink full, dropping {} samples", samples.len());
                Ok(())
            }
            Err(SinkError::Other(source)) => Err(EmulatorError::HostSinkFailure { source }),
        }
    }

    /// Sets every I/O register to its documented post-boot value (no
    /// boot ROM runs). `Cpu::new`/`Ppu::new` already construct their
    /// registers at post-boot defaults; this fills in the registers
    /// routed through the MMU, which otherwise start zeroed.
    ///
    /// NR52 must be written before any other NRxx/NR5x register:
    /// `mmu::write_reg` drops those writes while the APU's master
    /// switch is off, the same as real hardware.
    fn init_post_boot_registers(&mut self) {
        use info::*;

        let mut bus = bus!(self);
        let mut w = |addr: usize, val: u8| mmu::write(&mut bus, addr as u16, val);

        w(IO_NR52, 0xF1);
        w(IO_NR10, 0x80);
        w(IO_NR11, 0xBF);
        w(IO_NR12, 0xF3);
        w(IO_NR13, 0xFF);
        w(IO_NR14, 0xBF);
        w(IO_NR21, 0x3F);
        w(IO_NR22, 0x00);
        w(IO_NR23, 0xFF);
        w(IO_NR24, 0xBF);
        w(IO_NR30, 0x7F);
        w(IO_NR31, 0xFF);
        w(IO_NR32, 0x9F);
        w(IO_NR33, 0xFF);
        w(IO_NR34, 0xBF);
        w(IO_NR41, 0xFF);
        w(IO_NR42, 0x00);
        w(IO_NR43, 0x00);
        w(IO_NR44, 0xBF);
        w(IO_NR50, 0x77);
        w(IO_NR51, 0xF3);

        w(IO_JOYPAD, 0xCF);
        w(IO_SB, 0x00);
        w(IO_SC, 0x7E);
        w(IO_TIMA, 0x00);
        w(IO_TMA, 0x00);
        w(IO_TAC, 0xF8);
        w(IO_IF, 0xE1);

        w(IO_LCDC, 0x91);
        w(IO_STAT, 0x85);
        w(IO_SCY, 0x00);
        w(IO_SCX, 0x00);
        w(IO_LYC, 0x00);
        w(IO_BGP, 0xFC);
        w(IO_OBP0, 0xFF);
        w(IO_OBP1, 0xFF);
        w(IO_WY, 0x00);
        w(IO_WX, 0x00);
        w(IO_IE, 0x00);

        self.apu.start_new_sampling(self.sample_period_dots);
        debug!(
            "emulator: post-boot registers initialized, sample period {} dots",
            self.sample_period_dots
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{SCREEN_HEIGHT, SCREEN_WIDTH, SIZE_ROM_BANK};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn blank_rom() -> Vec<u8> {
        vec![0u8; SIZE_ROM_BANK * 2]
    }

    #[derive(Default)]
    struct RecordingVideoSink {
        frames: Rc<RefCell<u32>>,
    }

    impl VideoSink for RecordingVideoSink {
        fn present(&mut self, _fb: &[[u8; SCREEN_WIDTH]; SCREEN_HEIGHT]) -> Result<(), SinkError> {
            *self.frames.borrow_mut() += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct NullAudioSink;

    impl AudioSink for NullAudioSink {
        fn push_samples(&mut self, _samples: &[i16]) -> Result<(), SinkError> {
            Ok(())
        }
    }

    fn new_emulator() -> Emulator {
        Emulator::new(
            &blank_rom(),
            Box::new(RecordingVideoSink::default()),
            Box::new(NullAudioSink),
            Box::new(()),
            PaceMode::MaxSpeed,
            44_100,
        )
        .unwrap()
    }

    #[test]
    fn new_starts_with_post_boot_register_values() {
        let mut emu = new_emulator();
        let mut bus = bus!(emu);
        assert_eq!(mmu::read(&mut bus, 0xFF40), 0x91); // LCDC
        assert_eq!(mmu::read(&mut bus, 0xFF26) & 0x80, 0x80); // NR52 power bit
        assert_eq!(mmu::read(&mut bus, 0xFF24), 0x77); // NR50
    }

    #[test]
    fn step_runs_a_single_nop_in_four_tcycles() {
        let mut emu = new_emulator();
        // ROM is all zeroed, opcode 0x00 at 0x0100 is NOP.
        let before = emu.cpu.pc();
        emu.step().unwrap();
        assert_eq!(emu.cpu.pc(), before.wrapping_add(1));
    }

    #[test]
    fn illegal_opcode_is_fatal() {
        let mut rom = blank_rom();
        rom[0x100] = 0xD3; // one of the gaps in the LR35902 opcode table
        let mut emu = Emulator::new(
            &rom,
            Box::new(RecordingVideoSink::default()),
            Box::new(NullAudioSink),
            Box::new(()),
            PaceMode::MaxSpeed,
            44_100,
        )
        .unwrap();
        assert!(matches!(emu.step(), Err(EmulatorError::IllegalOpcode { .. })));
    }

    #[test]
    fn reset_restores_post_boot_state_after_execution() {
        let mut emu = new_emulator();
        for _ in 0..1000 {
            if emu.step().unwrap() {
                break;
            }
        }
        emu.reset().unwrap();
        let mut bus = bus!(emu);
        assert_eq!(mmu::read(&mut bus, 0xFF40), 0x91);
        assert_eq!(emu.cpu.pc(), 0x0100);
    }

    #[test]
    fn reset_rezeroes_external_ram() {
        let mut rom = blank_rom();
        rom[crate::info::CART_TYPE] = 0x03; // MBC1+RAM+BATTERY
        rom[crate::info::CART_RAM_SIZE] = 0x02;
        let mut emu = Emulator::new(
            &rom,
            Box::new(RecordingVideoSink::default()),
            Box::new(NullAudioSink),
            Box::new(()),
            PaceMode::MaxSpeed,
            44_100,
        )
        .unwrap();

        emu.cartridge_mut().write(0x0000, 0x0A); // enable RAM
        emu.cartridge_mut().write(0xA000, 0x42);
        assert_eq!(emu.cartridge().read(0xA000), 0x42);

        emu.reset().unwrap();
        emu.cartridge_mut().write(0x0000, 0x0A);
        assert_eq!(emu.cartridge().read(0xA000), 0x00);
    }

    #[test]
    fn run_until_frame_stops_as_soon_as_stop_is_requested() {
        let mut emu = new_emulator();
        emu.request_stop();
        emu.run_until_frame().unwrap();
    }

    #[test]
    fn save_state_round_trips_cpu_and_ppu_state() {
        let mut emu = new_emulator();
        for _ in 0..2000 {
            if emu.step().unwrap() {
                break;
            }
        }
        let pc_before = emu.cpu.pc();
        let blob = emu.save_state().unwrap();

        let mut restored = Emulator::from_saved(
            &blob,
            Box::new(RecordingVideoSink::default()),
            Box::new(NullAudioSink),
            Box::new(()),
            PaceMode::MaxSpeed,
            44_100,
        )
        .unwrap();
        assert_eq!(restored.cpu.pc(), pc_before);

        restored.step().unwrap();
    }

    #[test]
    fn rom_from_saved_recovers_the_original_rom_bytes() {
        let rom = blank_rom();
        let emu = new_emulator();
        let blob = emu.save_state().unwrap();
        assert_eq!(Emulator::rom_from_saved(&blob).unwrap(), rom);
    }

    struct FailingAudioSink;

    impl AudioSink for FailingAudioSink {
        fn push_samples(&mut self, _samples: &[i16]) -> Result<(), SinkError> {
            Err(SinkError::Other("disk full".into()))
        }
    }

    #[test]
    fn host_sink_failure_propagates_as_fatal() {
        let mut emu = Emulator::new(
            &blank_rom(),
            Box::new(RecordingVideoSink::default()),
            Box::new(FailingAudioSink),
            Box::new(()),
            PaceMode::MaxSpeed,
            44_100,
        )
        .unwrap();

        // Run enough steps to cross a sample-period boundary.
        let mut saw_failure = false;
        for _ in 0..1000 {
            if let Err(EmulatorError::HostSinkFailure { .. }) = emu.step() {
                saw_failure = true;
                break;
            }
        }
        assert!(saw_failure);
    }
}
