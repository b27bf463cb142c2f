//! Pixel-processing unit: mode-timing state machine plus scanline
//! compositing. The mode state machine (`step_scan`/`step_draw`/
//! `step_hblank`/`step_vblank`/`update_lcd_state`/`eat_dots`) is kept
//! close to the teacher's dot-accurate version; only the rendering
//! itself moved from a per-2-dots pixel FIFO to a whole-line call into
//! `ppu::scanline` at the moment Drawing mode is entered.

pub(crate) mod scanline;
mod tile;

use scanline::Pixel;

use crate::info::*;
use crate::regs::{IntrBits, LcdCtrl, LcdStat};

#[derive(Clone, bincode::Encode, bincode::Decode)]
pub(crate) struct Ppu {
    pub(crate) vram: [u8; SIZE_VRAM_BANK],
    pub(crate) oam: [u8; SIZE_OAM],

    #[bincode(with_serde)]
    pub(crate) lcdc: LcdCtrl,
    #[bincode(with_serde)]
    pub(crate) stat: LcdStat,
    pub(crate) ly: u8,
    pub(crate) lyc: u8,
    pub(crate) scy: u8,
    pub(crate) scx: u8,
    pub(crate) wy: u8,
    pub(crate) wx: u8,
    pub(crate) bgp: u8,
    pub(crate) obp0: u8,
    pub(crate) obp1: u8,

    /// Current PPU mode; updates are carried to the STAT register.
    mode: PpuMode,
    /// 2-bit shade per pixel (0=white .. 3=black), post-palette.
    framebuffer: [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT],
    frame_ready: bool,
    /// Amount of dots left, which determines how much to advance.
    dots_left: u16,
    /// Number of dots consumed for the current scan-line `LY`.
    dots_in_line: u16,
    /// Internal window line counter; only advances on lines the window
    /// actually renders on, reset at the start of every frame.
    window_line: Option<u8>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, bincode::Encode, bincode::Decode)]
#[repr(u8)]
enum PpuMode {
    HBlank = MODE_HBLANK,
    VBlank = MODE_VBLANK,
    #[default]
    Scan = MODE_SCAN,
    Draw = MODE_DRAW,
}

impl Ppu {
    pub(crate) fn new() -> Self {
        Self {
            vram: [0; SIZE_VRAM_BANK],
            oam: [0; SIZE_OAM],
            lcdc: Default::default(),
            stat: Default::default(),
            ly: 0,
            lyc: 0,
            scy: 0,
            scx: 0,
            wy: 0,
            wx: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            mode: PpuMode::Scan,
            framebuffer: [[0; SCREEN_WIDTH]; SCREEN_HEIGHT],
            frame_ready: false,
            dots_left: 0,
            dots_in_line: 0,
            window_line: None,
        }
    }

    /// 2-bit shade indices (0 white .. 3 black), one per pixel.
    pub(crate) fn framebuffer(&self) -> &[[u8; SCREEN_WIDTH]; SCREEN_HEIGHT] {
        &self.framebuffer
    }

    /// Returns true once per completed frame and clears the flag.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    pub(crate) fn can_access_vram(&self) -> bool {
        self.mode != PpuMode::Draw
    }

    pub(crate) fn can_access_oam(&self) -> bool {
        !matches!(self.mode, PpuMode::Scan | PpuMode::Draw)
    }

    pub(crate) fn read_vram(&self, addr: usize) -> u8 {
        self.vram[addr - *ADDR_VRAM.start()]
    }

    pub(crate) fn write_vram(&mut self, addr: usize, val: u8) {
        self.vram[addr - *ADDR_VRAM.start()] = val;
    }

    pub(crate) fn read_oam(&self, addr: usize) -> u8 {
        self.oam[addr - *ADDR_OAM.start()]
    }

    pub(crate) fn write_oam(&mut self, addr: usize, val: u8) {
        self.oam[addr - *ADDR_OAM.start()] = val;
    }

    pub(crate) fn read_reg(&self, addr: usize) -> u8 {
        match addr {
            IO_LCDC => self.lcdc.read(),
            IO_STAT => self.stat.read() | 0x80,
            IO_SCY => self.scy,
            IO_SCX => self.scx,
            IO_LY => self.ly,
            IO_LYC => self.lyc,
            IO_BGP => self.bgp,
            IO_OBP0 => self.obp0,
            IO_OBP1 => self.obp1,
            IO_WY => self.wy,
            IO_WX => self.wx,
            _ => unreachable!("ppu does not own register at {addr:#06X}"),
        }
    }

    pub(crate) fn write_reg(&mut self, addr: usize, val: u8) {
        match addr {
            IO_LCDC => {
                let was_enabled = self.lcdc.ppu_enable == 1;
                self.lcdc.write(val);
                if was_enabled && self.lcdc.ppu_enable == 0 {
                    self.framebuffer = [[0; SCREEN_WIDTH]; SCREEN_HEIGHT];
                }
            }
            // Bits 0-2 (mode, LYC==LY) are read-only, set by the PPU itself.
            IO_STAT => self.stat.write((self.stat.read() & 0x7) | (val & !0x7)),
            IO_SCY => self.scy = val,
            IO_SCX => self.scx = val,
            IO_LY => (),
            IO_LYC => self.lyc = val,
            IO_BGP => self.bgp = val,
            IO_OBP0 => self.obp0 = val,
            IO_OBP1 => self.obp1 = val,
            IO_WY => self.wy = val,
            IO_WX => self.wx = val,
            _ => unreachable!("ppu does not own register at {addr:#06X}"),
        }
    }

    /// Run for `dots` T-cycles, `dots` must be an even number.
    pub(crate) fn tick(&mut self, dots: u16) -> IntrBits {
        if self.lcdc.ppu_enable == 0 {
            self.reset();
            return IntrBits::new(0);
        }

        assert!(dots % 2 == 0);
        self.dots_left += dots;
        let mut ret = IntrBits::default();

        while self.dots_left > 0 {
            let mode = match self.mode {
                PpuMode::HBlank => self.step_hblank(),
                PpuMode::VBlank => self.step_vblank(),
                PpuMode::Scan => self.step_scan(),
                PpuMode::Draw => self.step_draw(),
            };

            let new_intrps = self.update_lcd_state(mode);
            ret.write(ret.read() | new_intrps.read());
        }

        ret
    }

    fn reset(&mut self) {
        self.stat.ppu_mode = MODE_HBLANK;
        self.ly = 0;
        self.dots_in_line = 0;
        self.mode = PpuMode::Scan;
        self.window_line = None;
    }

    /// OAM scan: object selection happens inside `render_line` at
    /// Drawing-mode entry, so this phase only accounts for its 80 dots.
    fn step_scan(&mut self) -> PpuMode {
        let take = (PPU_OAM_SCAN_DOTS - self.dots_in_line).min(self.dots_left);
        self.eat_dots(take);

        if self.dots_in_line >= PPU_OAM_SCAN_DOTS {
            PpuMode::Draw
        } else {
            PpuMode::Scan
        }
    }

    fn step_draw(&mut self) -> PpuMode {
        if self.dots_in_line == PPU_OAM_SCAN_DOTS {
            self.render_current_line();
        }

        let draw_end = PPU_OAM_SCAN_DOTS + PPU_DRAW_MIN_DOTS;
        let take = (draw_end - self.dots_in_line).min(self.dots_left);
        self.eat_dots(take);

        if self.dots_in_line >= draw_end {
            PpuMode::HBlank
        } else {
            PpuMode::Draw
        }
    }

    fn step_hblank(&mut self) -> PpuMode {
        // If current scan-line finishes and it was last draw line then
        // goto VBlank, if not last line then just go back to OAM-Scan mode.
        if self.eat_dots(self.dots_left) {
            if self.ly == PPU_DRAW_LINES {
                PpuMode::VBlank
            } else {
                PpuMode::Scan
            }
        } else {
            PpuMode::HBlank
        }
    }

    fn step_vblank(&mut self) -> PpuMode {
        self.eat_dots(self.dots_left);

        if self.ly == PPU_DRAW_LINES + PPU_VBLANK_LINES {
            self.dots_in_line = 0;
            self.ly = 0;
            self.window_line = None;
            PpuMode::Scan // Start next frame.
        } else {
            PpuMode::VBlank
        }
    }

    /// Update STAT and LY registers and raise interrupts if any.
    /// Must be called after each step.
    fn update_lcd_state(&mut self, new_mode: PpuMode) -> IntrBits {
        let mut iflag = IntrBits::new(0);

        // For interrupt on condition: LYC == LY.
        // It is trigerred at the begining of a scan line only.
        if self.dots_in_line == 0 && self.stat.lyc_int == 1 && self.lyc == self.ly {
            iflag.stat = 1;
        }
        // If mode changes and interrupt condition is met then interrupt.
        if new_mode != self.mode {
            iflag.vblank = matches!(new_mode, PpuMode::VBlank) as u8;
            if iflag.vblank == 1 {
                self.frame_ready = true;
            }
            iflag.stat = match self.mode {
                PpuMode::HBlank if self.stat.mode0_int == 1 => 1,
                PpuMode::VBlank if self.stat.mode1_int == 1 => 1,
                PpuMode::Scan if self.stat.mode2_int == 1 => 1,
                _ => iflag.stat,
            };
        }

        self.stat.ppu_mode = new_mode as u8;
        self.stat.ly_eq_lyc = (self.lyc == self.ly) as u8;
        self.mode = new_mode;
        iflag
    }

    /// Consume as much dots as possible from `dots_left` without overflowing
    /// into the next scan-line. Return true if current scan-line finished.
    fn eat_dots(&mut self, dots: u16) -> bool {
        assert!(dots <= PPU_HSCAN_DOTS);
        assert!(dots <= self.dots_left);
        let r = self.dots_in_line + dots;

        if r >= PPU_HSCAN_DOTS {
            self.dots_left -= dots - (r - PPU_HSCAN_DOTS);
            self.dots_in_line = 0;
            self.ly += 1;
            true
        } else {
            self.dots_in_line += dots;
            self.dots_left -= dots;
            false
        }
    }

    fn render_current_line(&mut self) {
        let window_active = self.lcdc.win_enable == 1 && self.wy <= self.ly;
        let win_line = window_active.then(|| self.window_line.unwrap_or(0));

        let pixels = scanline::render_line(
            &self.vram, &self.oam, self.lcdc, self.scx, self.scy, self.wx, self.wy, self.ly, win_line,
        );

        for (x, px) in pixels.iter().enumerate() {
            self.framebuffer[self.ly as usize][x] = self.pixel_to_shade(*px);
        }

        if let Some(wl) = win_line {
            self.window_line = Some(wl + 1);
        }
    }

    fn pixel_to_shade(&self, px: Pixel) -> u8 {
        // In non-CGB mode colors are stored per color-id as:
        // [MSB] 33-22-11-00 [LSB]
        let palette = if px.is_obj {
            if px.palette == 0 {
                self.obp0
            } else {
                self.obp1
            }
        } else {
            self.bgp
        };

        (palette >> (px.color_id * 2)) & 0b11
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_ppu() -> Ppu {
        let mut ppu = Ppu::new();
        ppu.write_reg(IO_LCDC, 0x80); // ppu_enable only
        ppu
    }

    #[test]
    fn ly_advances_one_per_scanline() {
        let mut ppu = enabled_ppu();
        ppu.tick(PPU_HSCAN_DOTS * 3);
        assert_eq!(ppu.ly, 3);
    }

    #[test]
    fn full_frame_wraps_ly_and_marks_frame_ready() {
        let mut ppu = enabled_ppu();
        ppu.tick(DOTS_PER_FRAME as u16);
        assert_eq!(ppu.ly, 0);
        assert!(ppu.take_frame_ready());
    }

    #[test]
    fn vblank_interrupt_fires_once_on_143_to_144_transition() {
        let mut ppu = enabled_ppu();
        // Drive up to just before the 143->144 transition.
        ppu.tick(PPU_HSCAN_DOTS * 143);
        assert_eq!(ppu.ly, 143);
        let ints = ppu.tick(PPU_HSCAN_DOTS);
        assert_eq!(ppu.ly, 144);
        assert_eq!(ints.vblank, 1);
    }

    #[test]
    fn lyc_match_sets_stat_coincidence_flag() {
        let mut ppu = enabled_ppu();
        ppu.write_reg(IO_LYC, 5);
        ppu.tick(PPU_HSCAN_DOTS * 5);
        assert_eq!(ppu.stat.ly_eq_lyc, 1);
    }

    #[test]
    fn disabling_lcd_resets_ly_and_mode() {
        let mut ppu = enabled_ppu();
        ppu.tick(PPU_HSCAN_DOTS * 10);
        ppu.write_reg(IO_LCDC, 0x00);
        ppu.tick(4);
        assert_eq!(ppu.ly, 0);
        assert_eq!(ppu.stat.ppu_mode, MODE_HBLANK);
    }

    #[test]
    fn vram_access_blocked_only_during_drawing() {
        let mut ppu = enabled_ppu();
        assert!(ppu.can_access_vram()); // Scan
        ppu.tick(PPU_OAM_SCAN_DOTS);
        assert!(!ppu.can_access_vram()); // Draw
    }
}
