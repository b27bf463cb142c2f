mod apu;
mod bus;
mod cartridge;
mod clock;
mod counter;
mod cpu;
mod dma;
mod emulator;
mod error;
mod info;
mod interrupts;
mod joypad;
mod macros;
mod mmu;
mod ppu;
mod regs;
mod serial;
mod sinks;
mod timer;

pub use cartridge::Cartridge;
pub use clock::PaceMode;
pub use emulator::Emulator;
pub use error::EmulatorError;
pub use info::{FREQUENCY, SCREEN_RESOLUTION};
pub use sinks::{AudioSink, Button, ButtonState, InputSource, SinkError, VideoSink};
