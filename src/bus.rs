//! Per-call borrow aggregate the `mmu` routing functions dispatch
//! against. The teacher's `Mmu` owns every subsystem directly and
//! reads `self.field`; here the `Emulator` owns everything flat and
//! builds a `Bus` fresh at the top of every `step()`, borrowing what
//! it needs for that one call. Nothing outlives the call.

use crate::cartridge::Cartridge;
use crate::dma::Dma;
use crate::info::SIZE_HRAM;
use crate::interrupts::InterruptController;
use crate::joypad::Joypad;
use crate::apu::Apu;
use crate::ppu::Ppu;
use crate::serial::Serial;
use crate::timer::Timer;

pub(crate) struct Bus<'a> {
    pub(crate) cart: &'a mut Cartridge,
    pub(crate) ppu: &'a mut Ppu,
    pub(crate) apu: &'a mut Apu,
    pub(crate) timer: &'a mut Timer,
    pub(crate) ic: &'a mut InterruptController,
    pub(crate) joypad: &'a mut Joypad,
    pub(crate) dma: &'a mut Dma,
    pub(crate) serial: &'a mut Serial,
    pub(crate) wram: &'a mut [u8],
    pub(crate) hram: &'a mut [u8; SIZE_HRAM],
}
