mod mbc;
mod rtc;

use log::warn;

use crate::error::EmulatorError;
use crate::info::*;
use crate::macros::match_range;

/// A loaded ROM image together with its memory bank controller and
/// external RAM. Owned directly by the `Emulator`; the MMU only ever
/// borrows it for the duration of a single read or write.
#[derive(Clone, bincode::Encode, bincode::Decode)]
pub struct Cartridge {
    mbc: mbc::Mbc,
    /// Cartridge ROM, fixed size on load.
    rom: Box<[u8]>,
    /// External RAM, sized from the header's declared RAM size code.
    ram: Vec<u8>,
}

impl Cartridge {
    /// Parses the header, validates declared sizes against the image,
    /// and constructs the matching MBC. Rejects ROMs whose header is
    /// missing, inconsistent, or names an unsupported cartridge type.
    pub fn new(rom: &[u8]) -> Result<Self, EmulatorError> {
        if rom.len() <= CART_HEADER_CSUM {
            return Err(EmulatorError::RomTooSmall { len: rom.len() });
        }

        let expected_len = decode_rom_size(rom[CART_ROM_SIZE])
            .ok_or(EmulatorError::UnknownRomSizeCode { code: rom[CART_ROM_SIZE] })?;
        if rom.len() != expected_len {
            return Err(EmulatorError::RomSizeMismatch {
                expected: expected_len,
                actual: rom.len(),
            });
        }

        let ram_size = decode_ram_size(rom[CART_RAM_SIZE])
            .ok_or(EmulatorError::UnknownRamSizeCode { code: rom[CART_RAM_SIZE] })?;

        if matches!(rom[CART_CGB_FLAG], CART_CGB_TOO | CART_CGB_ONLY) {
            warn!("cartridge: header advertises CGB support, running in DMG-compatibility mode");
        }

        let mbc = mbc::Mbc::new(rom[CART_TYPE])?;
        let ram = vec![0; ram_size.max(SIZE_EXT_RAM_BANK)];

        Ok(Self { mbc, rom: rom.to_vec().into_boxed_slice(), ram })
    }

    pub(crate) fn read(&self, addr: usize) -> u8 {
        // Some ROM sizes may not be multiples of SIZE_ROM_BANK, in such cases
        // an address might overflow on last ROM bank.
        let safe_read = |addr: usize| if addr < self.rom.len() { self.rom[addr] } else { 0xFF };

        match_range! { v@addr {
            ADDR_ROM0 => { safe_read(self.mbc.rom0_addr(v)) }
            ADDR_ROM1 => { safe_read(self.mbc.rom1_addr(v)) }
            ADDR_EXT_RAM => {
                if self.mbc.ram_enabled {
                    if let Some(reg) = self.mbc.kind.get_mbc3_rtc_reg_if_set() {
                        self.mbc.rtc.read(reg)
                    } else {
                        self.ram[self.mbc.ram_addr(v) % self.ram.len()]
                    }
                } else {
                    0xFF
                }
            }
            _ => { unreachable!() }
        }}
    }

    pub(crate) fn write(&mut self, addr: usize, val: u8) {
        match_range! { v@addr {
            ADDR_ROM0 => { self.mbc.write(addr, val) }
            ADDR_ROM1 => { self.mbc.write(addr, val) }
            ADDR_EXT_RAM => {
                if self.mbc.ram_enabled {
                    if let Some(reg) = self.mbc.kind.get_mbc3_rtc_reg_if_set() {
                        self.mbc.rtc.write(reg, val);
                    } else {
                        let len = self.ram.len();
                        self.ram[self.mbc.ram_addr(v) % len] = val;
                    }
                }
            }
            _ => { unreachable!() }
        }}
    }

    /// Advances the MBC3 RTC, if this cartridge has one. A no-op for
    /// every other cartridge type.
    pub(crate) fn tick(&mut self, t_cycles: u32) {
        self.mbc.rtc.tick(t_cycles);
    }

    pub(crate) fn mbc_name(&self) -> &'static str {
        self.mbc.kind.name()
    }

    /// The game title from the header, stripped of trailing NUL padding.
    /// Falls back to "Unknown" for a header with no printable title.
    pub fn title(&self) -> String {
        let bytes = &self.rom[CART_TITLE];
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let title = String::from_utf8_lossy(&bytes[..end]).trim().to_string();
        if title.is_empty() {
            "Unknown".to_string()
        } else {
            title
        }
    }

    /// The raw ROM image this cartridge was built from, so `reset()`
    /// can rebuild a cartridge from scratch (zeroed RAM, MBC state
    /// re-derived from the header) without the orchestrator keeping
    /// its own copy of the ROM around.
    pub(crate) fn rom_bytes(&self) -> &[u8] {
        &self.rom
    }

    /// Battery-backed external RAM, for a host frontend to persist
    /// across sessions. Empty for cartridges with no external RAM.
    pub fn external_ram(&self) -> &[u8] {
        &self.ram
    }

    /// Restores previously-saved external RAM. Fails if `data`'s
    /// length does not match this cartridge's RAM size, since that
    /// indicates the save file belongs to a different cartridge.
    pub fn load_external_ram(&mut self, data: &[u8]) -> Result<(), EmulatorError> {
        if data.len() != self.ram.len() {
            return Err(EmulatorError::SaveFileCorrupted);
        }
        self.ram.copy_from_slice(data);
        Ok(())
    }
}

fn decode_rom_size(code: u8) -> Option<usize> {
    match code {
        0x00..=0x08 => Some(SIZE_ROM_BANK * 2 * (1usize << code)),
        _ => None,
    }
}

fn decode_ram_size(code: u8) -> Option<usize> {
    match code {
        0x00 => Some(0),
        0x02 => Some(SIZE_EXT_RAM_BANK),
        0x03 => Some(4 * SIZE_EXT_RAM_BANK),
        0x04 => Some(16 * SIZE_EXT_RAM_BANK),
        0x05 => Some(8 * SIZE_EXT_RAM_BANK),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_of(len: usize, cart_type: u8, rom_size_code: u8, ram_size_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; len];
        rom[CART_TYPE] = cart_type;
        rom[CART_ROM_SIZE] = rom_size_code;
        rom[CART_RAM_SIZE] = ram_size_code;
        rom
    }

    #[test]
    fn rejects_rom_too_small_for_header() {
        let rom = vec![0u8; 0x10];
        assert!(matches!(Cartridge::new(&rom), Err(EmulatorError::RomTooSmall { .. })));
    }

    #[test]
    fn rejects_rom_size_mismatch() {
        let rom = rom_of(SIZE_ROM_BANK * 2, 0x00, 0x01, 0x00);
        assert!(matches!(
            Cartridge::new(&rom),
            Err(EmulatorError::RomSizeMismatch { .. })
        ));
    }

    #[test]
    fn loads_rom_only_cartridge() {
        let rom = rom_of(SIZE_ROM_BANK * 2, 0x00, 0x00, 0x00);
        let cart = Cartridge::new(&rom).unwrap();
        assert_eq!(cart.mbc_name(), "None");
    }

    #[test]
    fn title_reads_header_bytes_and_strips_nul_padding() {
        let mut rom = rom_of(SIZE_ROM_BANK * 2, 0x00, 0x00, 0x00);
        rom[CART_TITLE].copy_from_slice(b"TETRIS\0\0\0\0\0\0\0\0\0\0");
        let cart = Cartridge::new(&rom).unwrap();
        assert_eq!(cart.title(), "TETRIS");
    }

    #[test]
    fn title_falls_back_to_unknown_for_blank_header() {
        let rom = rom_of(SIZE_ROM_BANK * 2, 0x00, 0x00, 0x00);
        let cart = Cartridge::new(&rom).unwrap();
        assert_eq!(cart.title(), "Unknown");
    }

    #[test]
    fn reads_fall_through_to_0xff_past_oversized_rom1_addr() {
        // MBC1 with only 2 physical banks; selecting bank 5 maps
        // rom1_addr() past the end of the ROM image.
        let rom = rom_of(SIZE_ROM_BANK * 2, 0x01, 0x00, 0x00);
        let mut cart = Cartridge::new(&rom).unwrap();
        cart.write(0x2000, 0x05);
        assert_eq!(cart.read(0x4000), 0xFF);
    }

    #[test]
    fn ram_disabled_reads_as_0xff() {
        let rom = rom_of(SIZE_ROM_BANK * 4, 0x01, 0x01, 0x02);
        let cart = Cartridge::new(&rom).unwrap();
        assert_eq!(cart.read(0xA000), 0xFF);
    }

    #[test]
    fn ram_enable_then_write_then_read_round_trips() {
        let rom = rom_of(SIZE_ROM_BANK * 4, 0x01, 0x01, 0x02);
        let mut cart = Cartridge::new(&rom).unwrap();
        cart.write(0x0000, 0x0A); // enable RAM
        cart.write(0xA010, 0x42);
        assert_eq!(cart.read(0xA010), 0x42);
    }

    #[test]
    fn external_ram_round_trips_through_save_and_load() {
        let rom = rom_of(SIZE_ROM_BANK * 4, 0x01, 0x01, 0x02);
        let mut cart = Cartridge::new(&rom).unwrap();
        cart.write(0x0000, 0x0A);
        cart.write(0xA010, 0x99);
        let saved = cart.external_ram().to_vec();

        let mut restored = Cartridge::new(&rom).unwrap();
        restored.load_external_ram(&saved).unwrap();
        restored.write(0x0000, 0x0A);
        assert_eq!(restored.read(0xA010), 0x99);
    }

    #[test]
    fn load_external_ram_rejects_mismatched_length() {
        let rom = rom_of(SIZE_ROM_BANK * 4, 0x01, 0x01, 0x02);
        let mut cart = Cartridge::new(&rom).unwrap();
        assert!(matches!(
            cart.load_external_ram(&[0u8; 4]),
            Err(EmulatorError::SaveFileCorrupted)
        ));
    }
}
