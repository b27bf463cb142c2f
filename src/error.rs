//! Error types surfaced by cartridge loading and by the emulation step loop.

use thiserror::Error;

/// Errors the core distinguishes. See the step-loop / loader contract for
/// which of these are fatal.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("ROM is too small to contain a header ({len} bytes)")]
    RomTooSmall { len: usize },

    #[error("ROM size {actual} bytes does not match header-declared size {expected} bytes")]
    RomSizeMismatch { expected: usize, actual: usize },

    #[error("unknown ROM size code 0x{code:02X} in cartridge header")]
    UnknownRomSizeCode { code: u8 },

    #[error("unknown RAM size code 0x{code:02X} in cartridge header")]
    UnknownRamSizeCode { code: u8 },

    #[error("unknown cartridge type code 0x{code:02X}")]
    UnknownMbcType { code: u8 },

    #[error("cartridge type {name} (0x{code:02X}) is recognized but not implemented")]
    UnimplementedMbc { name: &'static str, code: u8 },

    #[error("save file does not match the loaded cartridge's external RAM size")]
    SaveFileCorrupted,

    #[error("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    #[error("host sink failed: {source}")]
    HostSinkFailure {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("failed to encode save state: {0}")]
    SaveStateEncode(#[from] bincode::error::EncodeError),

    #[error("failed to decode save state: {0}")]
    SaveStateDecode(#[from] bincode::error::DecodeError),
}

/// Convenience alias used throughout the crate's fallible entry points.
pub type Result<T> = std::result::Result<T, EmulatorError>;
