//! OAM DMA. The teacher's `do_dma` runs the whole 160-byte transfer
//! synchronously inside the register write — here it is spread over
//! real T-cycles so the CPU actually runs concurrently with it and the
//! bus-contention rule (only HRAM reachable mid-transfer) has
//! something to bite on.
//!
//! `Dma` is itself one of `Bus`'s borrowed fields (for its `IO_DMA`
//! register), so `tick` cannot take a `&mut Bus` without borrowing
//! `Dma` twice; it instead takes the handful of source regions it
//! actually copies from directly.

use log::debug;

use crate::cartridge::Cartridge;
use crate::info;
use crate::ppu::Ppu;

#[derive(Default, Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct Dma {
    reg: u8,
    active: bool,
    src_base: usize,
    byte_idx: usize,
}

impl Dma {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn read_reg(&self) -> u8 {
        self.reg
    }

    /// Starts (or restarts) a transfer. Source high byte wraps at 0xDF
    /// as on real hardware.
    pub(crate) fn write_reg(&mut self, addr: u8) {
        if self.active {
            debug!("dma: restarting transfer before the previous one finished");
        }
        self.reg = addr;
        self.src_base = ((addr as usize) % (0xDF + 1)) << 8;
        self.byte_idx = 0;
        self.active = true;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// One byte per T-cycle, 160 T-cycles for the whole transfer.
    pub(crate) fn tick(&mut self, cart: &Cartridge, ppu: &mut Ppu, wram: &[u8], hram: &[u8], t_cycles: u32) {
        if !self.active {
            return;
        }

        for _ in 0..t_cycles {
            if !self.active {
                break;
            }
            let addr = self.src_base + self.byte_idx;
            let byte = read_source(cart, ppu, wram, hram, addr);
            ppu.write_oam(0xFE00 + self.byte_idx, byte);
            self.byte_idx += 1;
            if self.byte_idx >= info::SIZE_OAM {
                self.active = false;
            }
        }
    }
}

/// DMA's own view of the address space: unlike the CPU, it is never
/// blocked by PPU mode and reads VRAM/OAM unconditionally.
fn read_source(cart: &Cartridge, ppu: &Ppu, wram: &[u8], hram: &[u8], addr: usize) -> u8 {
    use crate::info::*;

    if in_cart_range(addr) {
        return cart.read(addr);
    }
    match addr {
        a if ADDR_VRAM.contains(&a) => ppu.read_vram(a),
        a if ADDR_WRAM0.contains(&a) => wram[a - *ADDR_WRAM0.start()],
        a if ADDR_WRAM1.contains(&a) => wram[a - *ADDR_WRAM0.start()],
        a if ADDR_ECHO_RAM.contains(&a) => wram[(a & ECHO_RAM_ADDR_MASK)],
        a if ADDR_OAM.contains(&a) => ppu.read_oam(a),
        a if ADDR_HRAM.contains(&a) => hram[a - *ADDR_HRAM.start()],
        _ => 0xFF,
    }
}

#[inline]
fn in_cart_range(addr: usize) -> bool {
    use crate::info::*;
    ADDR_ROM0.contains(&addr) || ADDR_ROM1.contains(&addr) || ADDR_EXT_RAM.contains(&addr)
}
