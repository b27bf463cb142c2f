//! Address-space router. The teacher's `Mmu` (`mem.rs`) owns every
//! subsystem and dispatches through `self.field`; this one owns
//! nothing and dispatches through a `Bus` borrowed fresh by the
//! caller, using the same `match_range!`/masked-register idiom.

use crate::bus::Bus;
use crate::info::*;
use crate::interrupts::{Interrupt, InterruptController};
use crate::macros::{in_ranges, match_range};
use crate::regs::IntrBits;

/// Reads one byte, honoring DMA bus contention and PPU mode restrictions.
pub(crate) fn read(bus: &mut Bus, addr: u16) -> u8 {
    let addr = addr as usize;

    if bus.dma.is_active() && !can_cpu_access(addr) {
        return 0xFF;
    }

    if is_cart_addr(addr) {
        return bus.cart.read(addr);
    }

    match_range! { a@addr {
        ADDR_AUDIO_WAVE_RAM => { bus.apu.ch3.wave_ram[a] }

        ADDR_VRAM => { if bus.ppu.can_access_vram() { bus.ppu.read_vram(addr) } else { 0xFF } }
        ADDR_WRAM0 => { bus.wram[a] }
        ADDR_WRAM1 => { bus.wram[a + SIZE_WRAM_BANK] }
        ADDR_ECHO_RAM => { bus.wram[echo_wram_idx(a)] }
        ADDR_OAM => { if bus.ppu.can_access_oam() { bus.ppu.read_oam(addr) } else { 0xFF } }
        ADDR_UNUSABLE => { 0xFF }
        ADDR_HRAM => { bus.hram[a] }
        ADDR_IO_REGS => { read_reg(bus, addr) }
        ADDR_IE => { read_reg(bus, addr) }

        _ => { unreachable!() }
    }}
}

/// Writes one byte, honoring DMA bus contention and PPU mode restrictions.
pub(crate) fn write(bus: &mut Bus, addr: u16, val: u8) {
    let addr = addr as usize;

    if bus.dma.is_active() && !can_cpu_access(addr) {
        return;
    }

    if is_cart_addr(addr) {
        bus.cart.write(addr, val);
        return;
    }

    match_range! { a@addr {
        ADDR_AUDIO_WAVE_RAM => { bus.apu.ch3.wave_ram[a] = val }

        ADDR_VRAM => { if bus.ppu.can_access_vram() { bus.ppu.write_vram(addr, val) } }
        ADDR_WRAM0 => { bus.wram[a] = val }
        ADDR_WRAM1 => { bus.wram[a + SIZE_WRAM_BANK] = val }
        ADDR_ECHO_RAM => { bus.wram[echo_wram_idx(a)] = val }
        ADDR_OAM => { if bus.ppu.can_access_oam() { bus.ppu.write_oam(addr, val) } }
        ADDR_UNUSABLE => {}
        ADDR_HRAM => { bus.hram[a] = val }
        ADDR_IO_REGS => { write_reg(bus, addr, val) }
        ADDR_IE => { write_reg(bus, addr, val) }

        _ => { unreachable!() }
    }}
}

/// True iff the CPU may still reach `addr` while DMA is active: I/O
/// registers and HRAM, the only regions not routed through the bus
/// DMA itself is copying from.
pub(crate) fn can_cpu_access(addr: usize) -> bool {
    in_ranges!(addr, ADDR_IO_REGS, ADDR_HRAM)
}

fn read_reg(bus: &mut Bus, addr: usize) -> u8 {
    match addr {
        IO_JOYPAD => bus.joypad.read_p1(),
        IO_SB => bus.serial.sb,
        IO_SC => bus.serial.sc.read(),
        IO_DIV => bus.timer.get_div(),
        IO_TIMA => bus.timer.tima,
        IO_TMA => bus.timer.tma,
        IO_TAC => bus.timer.tac.read(),
        IO_IF => bus.ic.read_if(),
        IO_IE => bus.ic.read_ie(),

        IO_NR10 => bus.apu.ch1.nx0.read(),
        IO_NR11 => bus.apu.ch1.nx1.read(),
        IO_NR12 => bus.apu.ch1.nx2.read(),
        IO_NR13 => bus.apu.ch1.nx3.period_low,
        IO_NR14 => bus.apu.ch1.nx4.read(),
        IO_NR21 => bus.apu.ch2.nx1.read(),
        IO_NR22 => bus.apu.ch2.nx2.read(),
        IO_NR23 => bus.apu.ch2.nx3.period_low,
        IO_NR24 => bus.apu.ch2.nx4.read(),
        IO_NR30 => bus.apu.ch3.n30.read(),
        IO_NR31 => bus.apu.ch3.n31.length_period,
        IO_NR32 => bus.apu.ch3.n32.read(),
        IO_NR33 => bus.apu.ch3.n33.period_low,
        IO_NR34 => bus.apu.ch3.n34.read(),
        IO_NR41 => bus.apu.ch4.n41.read(),
        IO_NR42 => bus.apu.ch4.n42.read(),
        IO_NR43 => bus.apu.ch4.read_n43(),
        IO_NR44 => bus.apu.ch4.n44.read(),
        IO_NR50 => bus.apu.nr50.read(),
        IO_NR51 => bus.apu.nr51.read(),
        IO_NR52 => bus.apu.nr52.read(),

        IO_DMA => bus.dma.read_reg(),

        IO_LCDC..=IO_WX => bus.ppu.read_reg(addr),

        _ => 0xFF,
    }
}

fn write_reg(bus: &mut Bus, addr: usize, v: u8) {
    macro_rules! set {
        ($target:expr, $val:expr, $keep_mask:expr) => {{
            let combined = ($target.read() & $keep_mask) | ($val & !$keep_mask);
            $target.write(combined);
        }};
    }

    // APU writes other than NR52 are ignored while the master switch is off.
    let apu_off = bus.apu.nr52.audio_on == 0;
    let blocked_while_off = matches!(
        addr,
        IO_NR10..=IO_NR44 | IO_NR50 | IO_NR51
    );
    if apu_off && blocked_while_off {
        return;
    }

    match addr {
        IO_JOYPAD => bus.joypad.write_p1(v),
        IO_SB => bus.serial.sb = v,
        IO_SC => set!(bus.serial.sc, v, mask(5) << 2),
        IO_DIV => bus.timer.set_div(v),
        IO_TIMA => bus.timer.tima = v,
        IO_TMA => bus.timer.tma = v,
        IO_TAC => bus.timer.tac.write(v),
        IO_IF => bus.ic.write_if(v),
        IO_IE => bus.ic.write_ie(v),

        IO_NR10 => set!(bus.apu.ch1.nx0, v, 1 << 7),
        IO_NR11 => bus.apu.ch1.nx1.write(v),
        IO_NR12 => bus.apu.ch1.nx2.write(v),
        IO_NR13 => bus.apu.ch1.nx3.period_low = v,
        IO_NR14 => set!(bus.apu.ch1.nx4, v, mask(3) << 3),

        IO_NR21 => bus.apu.ch2.nx1.write(v),
        IO_NR22 => bus.apu.ch2.nx2.write(v),
        IO_NR23 => bus.apu.ch2.nx3.period_low = v,
        IO_NR24 => set!(bus.apu.ch2.nx4, v, mask(3) << 3),

        IO_NR30 => set!(bus.apu.ch3.n30, v, mask(7)),
        IO_NR31 => bus.apu.ch3.n31.length_period = v,
        IO_NR32 => set!(bus.apu.ch3.n32, v, 1 << 7 | mask(5)),
        IO_NR33 => bus.apu.ch3.n33.period_low = v,
        IO_NR34 => set!(bus.apu.ch3.n34, v, mask(3) << 3),

        IO_NR41 => set!(bus.apu.ch4.n41, v, mask(2) << 6),
        IO_NR42 => bus.apu.ch4.n42.write(v),
        IO_NR43 => bus.apu.ch4.write_n43(v),
        IO_NR44 => set!(bus.apu.ch4.n44, v, mask(6)),

        IO_NR50 => bus.apu.nr50.write(v),
        IO_NR51 => bus.apu.nr51.write(v),
        IO_NR52 => set!(bus.apu.nr52, v, mask(7)),

        IO_DMA => bus.dma.write_reg(v),

        IO_LCDC..=IO_WX => bus.ppu.write_reg(addr, v),

        _ => (),
    }
}

/// Raises `kind` in IF — used by subsystems (Timer, PPU, Joypad, DMA
/// completion) that do not themselves hold the `InterruptController`.
pub(crate) fn request_interrupt(ic: &mut InterruptController, bits: IntrBits) {
    if bits.vblank == 1 {
        ic.request(Interrupt::VBlank);
    }
    if bits.stat == 1 {
        ic.request(Interrupt::Stat);
    }
    if bits.timer == 1 {
        ic.request(Interrupt::Timer);
    }
    if bits.serial == 1 {
        ic.request(Interrupt::Serial);
    }
    if bits.joypad == 1 {
        ic.request(Interrupt::Joypad);
    }
}

#[inline]
fn is_cart_addr(addr: usize) -> bool {
    in_ranges!(addr, ADDR_ROM0, ADDR_ROM1, ADDR_EXT_RAM)
}

/// Echo RAM mirrors WRAM, masked to 13 bits, as an index into the
/// flat (non-banked) `wram` array.
#[inline]
fn echo_wram_idx(rel_addr: usize) -> usize {
    rel_addr & ECHO_RAM_ADDR_MASK
}

#[inline(always)]
const fn mask(bit_cnt: u32) -> u8 {
    u8::MAX >> (8 - bit_cnt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apu::Apu;
    use crate::cartridge::Cartridge;
    use crate::dma::Dma;
    use crate::joypad::Joypad;
    use crate::ppu::Ppu;
    use crate::serial::Serial;
    use crate::timer::Timer;

    fn test_bus<'a>(
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

    fn rom_only() -> Cartridge {
        let rom = vec![0u8; SIZE_ROM_BANK * 2];
        Cartridge::new(&rom).unwrap()
    }

    #[test]
    fn wram_write_then_read_round_trips() {
        let mut cart = rom_only();
        let mut ppu = Ppu::new();
        let mut apu = Apu::new();
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        let mut joypad = Joypad::new();
        let mut dma = Dma::new();
        let mut serial = Serial::new();
        let mut wram = [0u8; SIZE_WRAM_BANK * 2];
        let mut hram = [0u8; SIZE_HRAM];

        let mut bus = test_bus(
            &mut cart, &mut ppu, &mut apu, &mut timer, &mut ic, &mut joypad, &mut dma, &mut serial,
            &mut wram, &mut hram,
        );
        write(&mut bus, 0xC010, 0x42);
        assert_eq!(read(&mut bus, 0xC010), 0x42);
    }

    #[test]
    fn echo_ram_mirrors_wram() {
        let mut cart = rom_only();
        let mut ppu = Ppu::new();
        let mut apu = Apu::new();
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        let mut joypad = Joypad::new();
        let mut dma = Dma::new();
        let mut serial = Serial::new();
        let mut wram = [0u8; SIZE_WRAM_BANK * 2];
        let mut hram = [0u8; SIZE_HRAM];

        let mut bus = test_bus(
            &mut cart, &mut ppu, &mut apu, &mut timer, &mut ic, &mut joypad, &mut dma, &mut serial,
            &mut wram, &mut hram,
        );
        write(&mut bus, 0xC001, 0x7A);
        assert_eq!(read(&mut bus, 0xE001), 0x7A);
    }

    #[test]
    fn dma_active_blocks_non_hram_non_io_access() {
        let mut cart = rom_only();
        let mut ppu = Ppu::new();
        let mut apu = Apu::new();
        let mut timer = Timer::new();
        let mut ic = InterruptController::new();
        let mut joypad = Joypad::new();
        let mut dma = Dma::new();
        let mut serial = Serial::new();
        let mut wram = [0u8; SIZE_WRAM_BANK * 2];
        let mut hram = [0u8; SIZE_HRAM];

        dma.write_reg(0xC0);
        let mut bus = test_bus(
            &mut cart, &mut ppu, &mut apu, &mut timer, &mut ic, &mut joypad, &mut dma, &mut serial,
            &mut wram, &mut hram,
        );
        assert_eq!(read(&mut bus, 0xC000), 0xFF);
        assert_eq!(read(&mut bus, 0xFF80), 0);
    }
}
