//! Contains decoded instruction indexed by opcodes.
//! This provides us with constant time decoding given how
//! non-uniformly operands are encoded in different instructions and
//! have different number of cycles.
//! This does not require any complex logic to decode and is simple to understand.

use crate::cpu::isa::{Cond, Instr, Operand, Opcode, Reg};

macro_rules! ins {
    ($op:expr) => {
        Instr {
            op: $op,
            op1: Operand::Absent,
            op2: Operand::Absent,
            mcycles: 4,
            branch_mcycles: 4,
        }
    };
    ($op:expr, $op1:expr) => {
        Instr {
            op: $op,
            op1: $op1,
            op2: Operand::Absent,
            mcycles: 4,
            branch_mcycles: 4,
        }
    };
    ($op:expr, $op1:expr, $op2:expr) => {
        Instr {
            op: $op,
            op1: $op1,
            op2: $op2,
            mcycles: 4,
            branch_mcycles: 4,
        }
    };
}

/// Sets the M-cycle cost of a non-branch instruction.
const fn c(ins: Instr, mcycles: u8) -> Instr {
    Instr { mcycles, branch_mcycles: mcycles, ..ins }
}

/// Sets the M-cycle cost of a branch instruction: `taken` when its
/// condition holds, `not_taken` otherwise.
const fn cb(ins: Instr, taken: u8, not_taken: u8) -> Instr {
    Instr { mcycles: not_taken, branch_mcycles: taken, ..ins }
}

use Opcode::*;
type Op = Operand;

// Generated by: gen/genins.py
pub(crate) const INSTR_TABLE: [Instr; 256] = {
    let mut a = [ins!(Illegal); 256];
    a[0x00] = c(ins!(Nop), 4);
    a[0x01] = c(ins!(Ld, Op::Reg(Reg::BC), Op::U16(0)), 12);
    a[0x02] = c(ins!(Ld, Op::RegMem(Reg::BC), Op::Reg(Reg::A)), 8);
    a[0x03] = c(ins!(Inc, Op::Reg(Reg::BC)), 8);
    a[0x04] = c(ins!(Inc, Op::Reg(Reg::B)), 4);
    a[0x05] = c(ins!(Dec, Op::Reg(Reg::B)), 4);
    a[0x06] = c(ins!(Ld, Op::Reg(Reg::B), Op::U8(0)), 8);
    a[0x07] = c(ins!(Rlca), 4);
    a[0x08] = c(ins!(Ld, Op::A16(0), Op::Reg(Reg::SP)), 20);
    a[0x09] = c(ins!(Add, Op::Reg(Reg::HL), Op::Reg(Reg::BC)), 8);
    a[0x0A] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::BC)), 8);
    a[0x0B] = c(ins!(Dec, Op::Reg(Reg::BC)), 8);
    a[0x0C] = c(ins!(Inc, Op::Reg(Reg::C)), 4);
    a[0x0D] = c(ins!(Dec, Op::Reg(Reg::C)), 4);
    a[0x0E] = c(ins!(Ld, Op::Reg(Reg::C), Op::U8(0)), 8);
    a[0x0F] = c(ins!(Rrca), 4);
    a[0x10] = c(ins!(Stop, Op::U8(0)), 4);
    a[0x11] = c(ins!(Ld, Op::Reg(Reg::DE), Op::U16(0)), 12);
    a[0x12] = c(ins!(Ld, Op::RegMem(Reg::DE), Op::Reg(Reg::A)), 8);
    a[0x13] = c(ins!(Inc, Op::Reg(Reg::DE)), 8);
    a[0x14] = c(ins!(Inc, Op::Reg(Reg::D)), 4);
    a[0x15] = c(ins!(Dec, Op::Reg(Reg::D)), 4);
    a[0x16] = c(ins!(Ld, Op::Reg(Reg::D), Op::U8(0)), 8);
    a[0x17] = c(ins!(Rla), 4);
    a[0x18] = c(ins!(Jr, Op::I8(0)), 12);
    a[0x19] = c(ins!(Add, Op::Reg(Reg::HL), Op::Reg(Reg::DE)), 8);
    a[0x1A] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::DE)), 8);
    a[0x1B] = c(ins!(Dec, Op::Reg(Reg::DE)), 8);
    a[0x1C] = c(ins!(Inc, Op::Reg(Reg::E)), 4);
    a[0x1D] = c(ins!(Dec, Op::Reg(Reg::E)), 4);
    a[0x1E] = c(ins!(Ld, Op::Reg(Reg::E), Op::U8(0)), 8);
    a[0x1F] = c(ins!(Rra), 4);
    a[0x20] = cb(ins!(Jr, Op::Cond(Cond::NZ), Op::I8(0)), 12, 8);
    a[0x21] = c(ins!(Ld, Op::Reg(Reg::HL), Op::U16(0)), 12);
    a[0x22] = c(ins!(Ld, Op::RegMem(Reg::HLinc), Op::Reg(Reg::A)), 8);
    a[0x23] = c(ins!(Inc, Op::Reg(Reg::HL)), 8);
    a[0x24] = c(ins!(Inc, Op::Reg(Reg::H)), 4);
    a[0x25] = c(ins!(Dec, Op::Reg(Reg::H)), 4);
    a[0x26] = c(ins!(Ld, Op::Reg(Reg::H), Op::U8(0)), 8);
    a[0x27] = c(ins!(Daa), 4);
    a[0x28] = cb(ins!(Jr, Op::Cond(Cond::Z), Op::I8(0)), 12, 8);
    a[0x29] = c(ins!(Add, Op::Reg(Reg::HL), Op::Reg(Reg::HL)), 8);
    a[0x2A] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::HLinc)), 8);
    a[0x2B] = c(ins!(Dec, Op::Reg(Reg::HL)), 8);
    a[0x2C] = c(ins!(Inc, Op::Reg(Reg::L)), 4);
    a[0x2D] = c(ins!(Dec, Op::Reg(Reg::L)), 4);
    a[0x2E] = c(ins!(Ld, Op::Reg(Reg::L), Op::U8(0)), 8);
    a[0x2F] = c(ins!(Cpl), 4);
    a[0x30] = cb(ins!(Jr, Op::Cond(Cond::NC), Op::I8(0)), 12, 8);
    a[0x31] = c(ins!(Ld, Op::Reg(Reg::SP), Op::U16(0)), 12);
    a[0x32] = c(ins!(Ld, Op::RegMem(Reg::HLdec), Op::Reg(Reg::A)), 8);
    a[0x33] = c(ins!(Inc, Op::Reg(Reg::SP)), 8);
    a[0x34] = c(ins!(Inc, Op::RegMem(Reg::HL)), 12);
    a[0x35] = c(ins!(Dec, Op::RegMem(Reg::HL)), 12);
    a[0x36] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::U8(0)), 12);
    a[0x37] = c(ins!(Scf), 4);
    a[0x38] = cb(ins!(Jr, Op::Cond(Cond::C), Op::I8(0)), 12, 8);
    a[0x39] = c(ins!(Add, Op::Reg(Reg::HL), Op::Reg(Reg::SP)), 8);
    a[0x3A] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::HLdec)), 8);
    a[0x3B] = c(ins!(Dec, Op::Reg(Reg::SP)), 8);
    a[0x3C] = c(ins!(Inc, Op::Reg(Reg::A)), 4);
    a[0x3D] = c(ins!(Dec, Op::Reg(Reg::A)), 4);
    a[0x3E] = c(ins!(Ld, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0x3F] = c(ins!(Ccf), 4);
    a[0x40] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::B)), 4);
    a[0x41] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::C)), 4);
    a[0x42] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::D)), 4);
    a[0x43] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::E)), 4);
    a[0x44] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::H)), 4);
    a[0x45] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::L)), 4);
    a[0x46] = c(ins!(Ld, Op::Reg(Reg::B), Op::RegMem(Reg::HL)), 8);
    a[0x47] = c(ins!(Ld, Op::Reg(Reg::B), Op::Reg(Reg::A)), 4);
    a[0x48] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::B)), 4);
    a[0x49] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::C)), 4);
    a[0x4A] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::D)), 4);
    a[0x4B] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::E)), 4);
    a[0x4C] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::H)), 4);
    a[0x4D] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::L)), 4);
    a[0x4E] = c(ins!(Ld, Op::Reg(Reg::C), Op::RegMem(Reg::HL)), 8);
    a[0x4F] = c(ins!(Ld, Op::Reg(Reg::C), Op::Reg(Reg::A)), 4);
    a[0x50] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::B)), 4);
    a[0x51] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::C)), 4);
    a[0x52] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::D)), 4);
    a[0x53] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::E)), 4);
    a[0x54] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::H)), 4);
    a[0x55] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::L)), 4);
    a[0x56] = c(ins!(Ld, Op::Reg(Reg::D), Op::RegMem(Reg::HL)), 8);
    a[0x57] = c(ins!(Ld, Op::Reg(Reg::D), Op::Reg(Reg::A)), 4);
    a[0x58] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::B)), 4);
    a[0x59] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::C)), 4);
    a[0x5A] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::D)), 4);
    a[0x5B] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::E)), 4);
    a[0x5C] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::H)), 4);
    a[0x5D] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::L)), 4);
    a[0x5E] = c(ins!(Ld, Op::Reg(Reg::E), Op::RegMem(Reg::HL)), 8);
    a[0x5F] = c(ins!(Ld, Op::Reg(Reg::E), Op::Reg(Reg::A)), 4);
    a[0x60] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::B)), 4);
    a[0x61] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::C)), 4);
    a[0x62] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::D)), 4);
    a[0x63] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::E)), 4);
    a[0x64] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::H)), 4);
    a[0x65] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::L)), 4);
    a[0x66] = c(ins!(Ld, Op::Reg(Reg::H), Op::RegMem(Reg::HL)), 8);
    a[0x67] = c(ins!(Ld, Op::Reg(Reg::H), Op::Reg(Reg::A)), 4);
    a[0x68] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::B)), 4);
    a[0x69] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::C)), 4);
    a[0x6A] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::D)), 4);
    a[0x6B] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::E)), 4);
    a[0x6C] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::H)), 4);
    a[0x6D] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::L)), 4);
    a[0x6E] = c(ins!(Ld, Op::Reg(Reg::L), Op::RegMem(Reg::HL)), 8);
    a[0x6F] = c(ins!(Ld, Op::Reg(Reg::L), Op::Reg(Reg::A)), 4);
    a[0x70] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::B)), 8);
    a[0x71] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::C)), 8);
    a[0x72] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::D)), 8);
    a[0x73] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::E)), 8);
    a[0x74] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::H)), 8);
    a[0x75] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::L)), 8);
    a[0x76] = c(ins!(Halt), 4);
    a[0x77] = c(ins!(Ld, Op::RegMem(Reg::HL), Op::Reg(Reg::A)), 8);
    a[0x78] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0x79] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0x7A] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0x7B] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0x7C] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0x7D] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0x7E] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0x7F] = c(ins!(Ld, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0x80] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0x81] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0x82] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0x83] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0x84] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0x85] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0x86] = c(ins!(Add, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0x87] = c(ins!(Add, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0x88] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0x89] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0x8A] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0x8B] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0x8C] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0x8D] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0x8E] = c(ins!(Adc, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0x8F] = c(ins!(Adc, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0x90] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0x91] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0x92] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0x93] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0x94] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0x95] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0x96] = c(ins!(Sub, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0x97] = c(ins!(Sub, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0x98] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0x99] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0x9A] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0x9B] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0x9C] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0x9D] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0x9E] = c(ins!(Sbc, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0x9F] = c(ins!(Sbc, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0xA0] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0xA1] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0xA2] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0xA3] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0xA4] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0xA5] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0xA6] = c(ins!(And, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0xA7] = c(ins!(And, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0xA8] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0xA9] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0xAA] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0xAB] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0xAC] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0xAD] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0xAE] = c(ins!(Xor, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0xAF] = c(ins!(Xor, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0xB0] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0xB1] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0xB2] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0xB3] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0xB4] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0xB5] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0xB6] = c(ins!(Or, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0xB7] = c(ins!(Or, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0xB8] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::B)), 4);
    a[0xB9] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::C)), 4);
    a[0xBA] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::D)), 4);
    a[0xBB] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::E)), 4);
    a[0xBC] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::H)), 4);
    a[0xBD] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::L)), 4);
    a[0xBE] = c(ins!(Cp, Op::Reg(Reg::A), Op::RegMem(Reg::HL)), 8);
    a[0xBF] = c(ins!(Cp, Op::Reg(Reg::A), Op::Reg(Reg::A)), 4);
    a[0xC0] = cb(ins!(Ret, Op::Cond(Cond::NZ)), 20, 8);
    a[0xC1] = c(ins!(Pop, Op::Reg(Reg::BC)), 12);
    a[0xC2] = cb(ins!(Jp, Op::Cond(Cond::NZ), Op::U16(0)), 16, 12);
    a[0xC3] = c(ins!(Jp, Op::U16(0)), 16);
    a[0xC4] = cb(ins!(Call, Op::Cond(Cond::NZ), Op::U16(0)), 24, 12);
    a[0xC5] = c(ins!(Push, Op::Reg(Reg::BC)), 16);
    a[0xC6] = c(ins!(Add, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xC7] = c(ins!(Rst, Op::Tgt(0x00)), 16);
    a[0xC8] = cb(ins!(Ret, Op::Cond(Cond::Z)), 20, 8);
    a[0xC9] = c(ins!(Ret), 16);
    a[0xCA] = cb(ins!(Jp, Op::Cond(Cond::Z), Op::U16(0)), 16, 12);
    a[0xCB] = c(ins!(Prefix), 4);
    a[0xCC] = cb(ins!(Call, Op::Cond(Cond::Z), Op::U16(0)), 24, 12);
    a[0xCD] = c(ins!(Call, Op::U16(0)), 24);
    a[0xCE] = c(ins!(Adc, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xCF] = c(ins!(Rst, Op::Tgt(0x08)), 16);
    a[0xD0] = cb(ins!(Ret, Op::Cond(Cond::NC)), 20, 8);
    a[0xD1] = c(ins!(Pop, Op::Reg(Reg::DE)), 12);
    a[0xD2] = cb(ins!(Jp, Op::Cond(Cond::NC), Op::U16(0)), 16, 12);
    a[0xD3] = c(ins!(Illegal), 4);
    a[0xD4] = cb(ins!(Call, Op::Cond(Cond::NC), Op::U16(0)), 24, 12);
    a[0xD5] = c(ins!(Push, Op::Reg(Reg::DE)), 16);
    a[0xD6] = c(ins!(Sub, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xD7] = c(ins!(Rst, Op::Tgt(0x10)), 16);
    a[0xD8] = cb(ins!(Ret, Op::Cond(Cond::C)), 20, 8);
    a[0xD9] = c(ins!(Reti), 16);
    a[0xDA] = cb(ins!(Jp, Op::Cond(Cond::C), Op::U16(0)), 16, 12);
    a[0xDB] = c(ins!(Illegal), 4);
    a[0xDC] = cb(ins!(Call, Op::Cond(Cond::C), Op::U16(0)), 24, 12);
    a[0xDD] = c(ins!(Illegal), 4);
    a[0xDE] = c(ins!(Sbc, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xDF] = c(ins!(Rst, Op::Tgt(0x18)), 16);
    a[0xE0] = c(ins!(Ldh, Op::A8(0), Op::Reg(Reg::A)), 12);
    a[0xE1] = c(ins!(Pop, Op::Reg(Reg::HL)), 12);
    a[0xE2] = c(ins!(Ld, Op::RegMem(Reg::C), Op::Reg(Reg::A)), 8);
    a[0xE3] = c(ins!(Illegal), 4);
    a[0xE4] = c(ins!(Illegal), 4);
    a[0xE5] = c(ins!(Push, Op::Reg(Reg::HL)), 16);
    a[0xE6] = c(ins!(And, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xE7] = c(ins!(Rst, Op::Tgt(0x20)), 16);
    a[0xE8] = c(ins!(Add, Op::Reg(Reg::SP), Op::I8(0)), 16);
    a[0xE9] = c(ins!(Jp, Op::Reg(Reg::HL)), 4);
    a[0xEA] = c(ins!(Ld, Op::A16(0), Op::Reg(Reg::A)), 16);
    a[0xEB] = c(ins!(Illegal), 4);
    a[0xEC] = c(ins!(Illegal), 4);
    a[0xED] = c(ins!(Illegal), 4);
    a[0xEE] = c(ins!(Xor, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xEF] = c(ins!(Rst, Op::Tgt(0x28)), 16);
    a[0xF0] = c(ins!(Ldh, Op::Reg(Reg::A), Op::A8(0)), 12);
    a[0xF1] = c(ins!(Pop, Op::Reg(Reg::AF)), 12);
    a[0xF2] = c(ins!(Ld, Op::Reg(Reg::A), Op::RegMem(Reg::C)), 8);
    a[0xF3] = c(ins!(Di), 4);
    a[0xF4] = c(ins!(Illegal), 4);
    a[0xF5] = c(ins!(Push, Op::Reg(Reg::AF)), 16);
    a[0xF6] = c(ins!(Or, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xF7] = c(ins!(Rst, Op::Tgt(0x30)), 16);
    a[0xF8] = c(ins!(Ld, Op::Reg(Reg::HL), Op::SPplusI8(0)), 12);
    a[0xF9] = c(ins!(Ld, Op::Reg(Reg::SP), Op::Reg(Reg::HL)), 8);
    a[0xFA] = c(ins!(Ld, Op::Reg(Reg::A), Op::A16(0)), 16);
    a[0xFB] = c(ins!(Ei), 4);
    a[0xFC] = c(ins!(Illegal), 4);
    a[0xFD] = c(ins!(Illegal), 4);
    a[0xFE] = c(ins!(Cp, Op::Reg(Reg::A), Op::U8(0)), 8);
    a[0xFF] = c(ins!(Rst, Op::Tgt(0x38)), 16);

    a
};

// Generated by: gen/genins.py
pub(crate) const PREF_INSTR_TABLE: [Instr; 256] = {
    let mut a = [ins!(Illegal); 256];
    a[0x00] = c(ins!(Rlc, Op::Reg(Reg::B)), 8);
    a[0x01] = c(ins!(Rlc, Op::Reg(Reg::C)), 8);
    a[0x02] = c(ins!(Rlc, Op::Reg(Reg::D)), 8);
    a[0x03] = c(ins!(Rlc, Op::Reg(Reg::E)), 8);
    a[0x04] = c(ins!(Rlc, Op::Reg(Reg::H)), 8);
    a[0x05] = c(ins!(Rlc, Op::Reg(Reg::L)), 8);
    a[0x06] = c(ins!(Rlc, Op::RegMem(Reg::HL)), 16);
    a[0x07] = c(ins!(Rlc, Op::Reg(Reg::A)), 8);
    a[0x08] = c(ins!(Rrc, Op::Reg(Reg::B)), 8);
    a[0x09] = c(ins!(Rrc, Op::Reg(Reg::C)), 8);
    a[0x0A] = c(ins!(Rrc, Op::Reg(Reg::D)), 8);
    a[0x0B] = c(ins!(Rrc, Op::Reg(Reg::E)), 8);
    a[0x0C] = c(ins!(Rrc, Op::Reg(Reg::H)), 8);
    a[0x0D] = c(ins!(Rrc, Op::Reg(Reg::L)), 8);
    a[0x0E] = c(ins!(Rrc, Op::RegMem(Reg::HL)), 16);
    a[0x0F] = c(ins!(Rrc, Op::Reg(Reg::A)), 8);
    a[0x10] = c(ins!(Rl, Op::Reg(Reg::B)), 8);
    a[0x11] = c(ins!(Rl, Op::Reg(Reg::C)), 8);
    a[0x12] = c(ins!(Rl, Op::Reg(Reg::D)), 8);
    a[0x13] = c(ins!(Rl, Op::Reg(Reg::E)), 8);
    a[0x14] = c(ins!(Rl, Op::Reg(Reg::H)), 8);
    a[0x15] = c(ins!(Rl, Op::Reg(Reg::L)), 8);
    a[0x16] = c(ins!(Rl, Op::RegMem(Reg::HL)), 16);
    a[0x17] = c(ins!(Rl, Op::Reg(Reg::A)), 8);
    a[0x18] = c(ins!(Rr, Op::Reg(Reg::B)), 8);
    a[0x19] = c(ins!(Rr, Op::Reg(Reg::C)), 8);
    a[0x1A] = c(ins!(Rr, Op::Reg(Reg::D)), 8);
    a[0x1B] = c(ins!(Rr, Op::Reg(Reg::E)), 8);
    a[0x1C] = c(ins!(Rr, Op::Reg(Reg::H)), 8);
    a[0x1D] = c(ins!(Rr, Op::Reg(Reg::L)), 8);
    a[0x1E] = c(ins!(Rr, Op::RegMem(Reg::HL)), 16);
    a[0x1F] = c(ins!(Rr, Op::Reg(Reg::A)), 8);
    a[0x20] = c(ins!(Sla, Op::Reg(Reg::B)), 8);
    a[0x21] = c(ins!(Sla, Op::Reg(Reg::C)), 8);
    a[0x22] = c(ins!(Sla, Op::Reg(Reg::D)), 8);
    a[0x23] = c(ins!(Sla, Op::Reg(Reg::E)), 8);
    a[0x24] = c(ins!(Sla, Op::Reg(Reg::H)), 8);
    a[0x25] = c(ins!(Sla, Op::Reg(Reg::L)), 8);
    a[0x26] = c(ins!(Sla, Op::RegMem(Reg::HL)), 16);
    a[0x27] = c(ins!(Sla, Op::Reg(Reg::A)), 8);
    a[0x28] = c(ins!(Sra, Op::Reg(Reg::B)), 8);
    a[0x29] = c(ins!(Sra, Op::Reg(Reg::C)), 8);
    a[0x2A] = c(ins!(Sra, Op::Reg(Reg::D)), 8);
    a[0x2B] = c(ins!(Sra, Op::Reg(Reg::E)), 8);
    a[0x2C] = c(ins!(Sra, Op::Reg(Reg::H)), 8);
    a[0x2D] = c(ins!(Sra, Op::Reg(Reg::L)), 8);
    a[0x2E] = c(ins!(Sra, Op::RegMem(Reg::HL)), 16);
    a[0x2F] = c(ins!(Sra, Op::Reg(Reg::A)), 8);
    a[0x30] = c(ins!(Swap, Op::Reg(Reg::B)), 8);
    a[0x31] = c(ins!(Swap, Op::Reg(Reg::C)), 8);
    a[0x32] = c(ins!(Swap, Op::Reg(Reg::D)), 8);
    a[0x33] = c(ins!(Swap, Op::Reg(Reg::E)), 8);
    a[0x34] = c(ins!(Swap, Op::Reg(Reg::H)), 8);
    a[0x35] = c(ins!(Swap, Op::Reg(Reg::L)), 8);
    a[0x36] = c(ins!(Swap, Op::RegMem(Reg::HL)), 16);
    a[0x37] = c(ins!(Swap, Op::Reg(Reg::A)), 8);
    a[0x38] = c(ins!(Srl, Op::Reg(Reg::B)), 8);
    a[0x39] = c(ins!(Srl, Op::Reg(Reg::C)), 8);
    a[0x3A] = c(ins!(Srl, Op::Reg(Reg::D)), 8);
    a[0x3B] = c(ins!(Srl, Op::Reg(Reg::E)), 8);
    a[0x3C] = c(ins!(Srl, Op::Reg(Reg::H)), 8);
    a[0x3D] = c(ins!(Srl, Op::Reg(Reg::L)), 8);
    a[0x3E] = c(ins!(Srl, Op::RegMem(Reg::HL)), 16);
    a[0x3F] = c(ins!(Srl, Op::Reg(Reg::A)), 8);
    a[0x40] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::B)), 8);
    a[0x41] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::C)), 8);
    a[0x42] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::D)), 8);
    a[0x43] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::E)), 8);
    a[0x44] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::H)), 8);
    a[0x45] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::L)), 8);
    a[0x46] = c(ins!(Bit, Op::B3(0), Op::RegMem(Reg::HL)), 12);
    a[0x47] = c(ins!(Bit, Op::B3(0), Op::Reg(Reg::A)), 8);
    a[0x48] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::B)), 8);
    a[0x49] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::C)), 8);
    a[0x4A] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::D)), 8);
    a[0x4B] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::E)), 8);
    a[0x4C] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::H)), 8);
    a[0x4D] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::L)), 8);
    a[0x4E] = c(ins!(Bit, Op::B3(1), Op::RegMem(Reg::HL)), 12);
    a[0x4F] = c(ins!(Bit, Op::B3(1), Op::Reg(Reg::A)), 8);
    a[0x50] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::B)), 8);
    a[0x51] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::C)), 8);
    a[0x52] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::D)), 8);
    a[0x53] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::E)), 8);
    a[0x54] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::H)), 8);
    a[0x55] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::L)), 8);
    a[0x56] = c(ins!(Bit, Op::B3(2), Op::RegMem(Reg::HL)), 12);
    a[0x57] = c(ins!(Bit, Op::B3(2), Op::Reg(Reg::A)), 8);
    a[0x58] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::B)), 8);
    a[0x59] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::C)), 8);
    a[0x5A] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::D)), 8);
    a[0x5B] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::E)), 8);
    a[0x5C] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::H)), 8);
    a[0x5D] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::L)), 8);
    a[0x5E] = c(ins!(Bit, Op::B3(3), Op::RegMem(Reg::HL)), 12);
    a[0x5F] = c(ins!(Bit, Op::B3(3), Op::Reg(Reg::A)), 8);
    a[0x60] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::B)), 8);
    a[0x61] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::C)), 8);
    a[0x62] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::D)), 8);
    a[0x63] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::E)), 8);
    a[0x64] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::H)), 8);
    a[0x65] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::L)), 8);
    a[0x66] = c(ins!(Bit, Op::B3(4), Op::RegMem(Reg::HL)), 12);
    a[0x67] = c(ins!(Bit, Op::B3(4), Op::Reg(Reg::A)), 8);
    a[0x68] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::B)), 8);
    a[0x69] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::C)), 8);
    a[0x6A] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::D)), 8);
    a[0x6B] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::E)), 8);
    a[0x6C] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::H)), 8);
    a[0x6D] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::L)), 8);
    a[0x6E] = c(ins!(Bit, Op::B3(5), Op::RegMem(Reg::HL)), 12);
    a[0x6F] = c(ins!(Bit, Op::B3(5), Op::Reg(Reg::A)), 8);
    a[0x70] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::B)), 8);
    a[0x71] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::C)), 8);
    a[0x72] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::D)), 8);
    a[0x73] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::E)), 8);
    a[0x74] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::H)), 8);
    a[0x75] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::L)), 8);
    a[0x76] = c(ins!(Bit, Op::B3(6), Op::RegMem(Reg::HL)), 12);
    a[0x77] = c(ins!(Bit, Op::B3(6), Op::Reg(Reg::A)), 8);
    a[0x78] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::B)), 8);
    a[0x79] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::C)), 8);
    a[0x7A] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::D)), 8);
    a[0x7B] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::E)), 8);
    a[0x7C] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::H)), 8);
    a[0x7D] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::L)), 8);
    a[0x7E] = c(ins!(Bit, Op::B3(7), Op::RegMem(Reg::HL)), 12);
    a[0x7F] = c(ins!(Bit, Op::B3(7), Op::Reg(Reg::A)), 8);
    a[0x80] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::B)), 8);
    a[0x81] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::C)), 8);
    a[0x82] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::D)), 8);
    a[0x83] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::E)), 8);
    a[0x84] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::H)), 8);
    a[0x85] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::L)), 8);
    a[0x86] = c(ins!(Res, Op::B3(0), Op::RegMem(Reg::HL)), 16);
    a[0x87] = c(ins!(Res, Op::B3(0), Op::Reg(Reg::A)), 8);
    a[0x88] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::B)), 8);
    a[0x89] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::C)), 8);
    a[0x8A] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::D)), 8);
    a[0x8B] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::E)), 8);
    a[0x8C] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::H)), 8);
    a[0x8D] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::L)), 8);
    a[0x8E] = c(ins!(Res, Op::B3(1), Op::RegMem(Reg::HL)), 16);
    a[0x8F] = c(ins!(Res, Op::B3(1), Op::Reg(Reg::A)), 8);
    a[0x90] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::B)), 8);
    a[0x91] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::C)), 8);
    a[0x92] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::D)), 8);
    a[0x93] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::E)), 8);
    a[0x94] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::H)), 8);
    a[0x95] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::L)), 8);
    a[0x96] = c(ins!(Res, Op::B3(2), Op::RegMem(Reg::HL)), 16);
    a[0x97] = c(ins!(Res, Op::B3(2), Op::Reg(Reg::A)), 8);
    a[0x98] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::B)), 8);
    a[0x99] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::C)), 8);
    a[0x9A] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::D)), 8);
    a[0x9B] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::E)), 8);
    a[0x9C] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::H)), 8);
    a[0x9D] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::L)), 8);
    a[0x9E] = c(ins!(Res, Op::B3(3), Op::RegMem(Reg::HL)), 16);
    a[0x9F] = c(ins!(Res, Op::B3(3), Op::Reg(Reg::A)), 8);
    a[0xA0] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::B)), 8);
    a[0xA1] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::C)), 8);
    a[0xA2] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::D)), 8);
    a[0xA3] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::E)), 8);
    a[0xA4] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::H)), 8);
    a[0xA5] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::L)), 8);
    a[0xA6] = c(ins!(Res, Op::B3(4), Op::RegMem(Reg::HL)), 16);
    a[0xA7] = c(ins!(Res, Op::B3(4), Op::Reg(Reg::A)), 8);
    a[0xA8] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::B)), 8);
    a[0xA9] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::C)), 8);
    a[0xAA] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::D)), 8);
    a[0xAB] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::E)), 8);
    a[0xAC] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::H)), 8);
    a[0xAD] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::L)), 8);
    a[0xAE] = c(ins!(Res, Op::B3(5), Op::RegMem(Reg::HL)), 16);
    a[0xAF] = c(ins!(Res, Op::B3(5), Op::Reg(Reg::A)), 8);
    a[0xB0] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::B)), 8);
    a[0xB1] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::C)), 8);
    a[0xB2] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::D)), 8);
    a[0xB3] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::E)), 8);
    a[0xB4] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::H)), 8);
    a[0xB5] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::L)), 8);
    a[0xB6] = c(ins!(Res, Op::B3(6), Op::RegMem(Reg::HL)), 16);
    a[0xB7] = c(ins!(Res, Op::B3(6), Op::Reg(Reg::A)), 8);
    a[0xB8] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::B)), 8);
    a[0xB9] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::C)), 8);
    a[0xBA] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::D)), 8);
    a[0xBB] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::E)), 8);
    a[0xBC] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::H)), 8);
    a[0xBD] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::L)), 8);
    a[0xBE] = c(ins!(Res, Op::B3(7), Op::RegMem(Reg::HL)), 16);
    a[0xBF] = c(ins!(Res, Op::B3(7), Op::Reg(Reg::A)), 8);
    a[0xC0] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::B)), 8);
    a[0xC1] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::C)), 8);
    a[0xC2] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::D)), 8);
    a[0xC3] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::E)), 8);
    a[0xC4] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::H)), 8);
    a[0xC5] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::L)), 8);
    a[0xC6] = c(ins!(Set, Op::B3(0), Op::RegMem(Reg::HL)), 16);
    a[0xC7] = c(ins!(Set, Op::B3(0), Op::Reg(Reg::A)), 8);
    a[0xC8] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::B)), 8);
    a[0xC9] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::C)), 8);
    a[0xCA] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::D)), 8);
    a[0xCB] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::E)), 8);
    a[0xCC] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::H)), 8);
    a[0xCD] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::L)), 8);
    a[0xCE] = c(ins!(Set, Op::B3(1), Op::RegMem(Reg::HL)), 16);
    a[0xCF] = c(ins!(Set, Op::B3(1), Op::Reg(Reg::A)), 8);
    a[0xD0] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::B)), 8);
    a[0xD1] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::C)), 8);
    a[0xD2] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::D)), 8);
    a[0xD3] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::E)), 8);
    a[0xD4] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::H)), 8);
    a[0xD5] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::L)), 8);
    a[0xD6] = c(ins!(Set, Op::B3(2), Op::RegMem(Reg::HL)), 16);
    a[0xD7] = c(ins!(Set, Op::B3(2), Op::Reg(Reg::A)), 8);
    a[0xD8] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::B)), 8);
    a[0xD9] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::C)), 8);
    a[0xDA] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::D)), 8);
    a[0xDB] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::E)), 8);
    a[0xDC] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::H)), 8);
    a[0xDD] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::L)), 8);
    a[0xDE] = c(ins!(Set, Op::B3(3), Op::RegMem(Reg::HL)), 16);
    a[0xDF] = c(ins!(Set, Op::B3(3), Op::Reg(Reg::A)), 8);
    a[0xE0] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::B)), 8);
    a[0xE1] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::C)), 8);
    a[0xE2] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::D)), 8);
    a[0xE3] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::E)), 8);
    a[0xE4] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::H)), 8);
    a[0xE5] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::L)), 8);
    a[0xE6] = c(ins!(Set, Op::B3(4), Op::RegMem(Reg::HL)), 16);
    a[0xE7] = c(ins!(Set, Op::B3(4), Op::Reg(Reg::A)), 8);
    a[0xE8] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::B)), 8);
    a[0xE9] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::C)), 8);
    a[0xEA] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::D)), 8);
    a[0xEB] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::E)), 8);
    a[0xEC] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::H)), 8);
    a[0xED] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::L)), 8);
    a[0xEE] = c(ins!(Set, Op::B3(5), Op::RegMem(Reg::HL)), 16);
    a[0xEF] = c(ins!(Set, Op::B3(5), Op::Reg(Reg::A)), 8);
    a[0xF0] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::B)), 8);
    a[0xF1] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::C)), 8);
    a[0xF2] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::D)), 8);
    a[0xF3] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::E)), 8);
    a[0xF4] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::H)), 8);
    a[0xF5] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::L)), 8);
    a[0xF6] = c(ins!(Set, Op::B3(6), Op::RegMem(Reg::HL)), 16);
    a[0xF7] = c(ins!(Set, Op::B3(6), Op::Reg(Reg::A)), 8);
    a[0xF8] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::B)), 8);
    a[0xF9] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::C)), 8);
    a[0xFA] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::D)), 8);
    a[0xFB] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::E)), 8);
    a[0xFC] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::H)), 8);
    a[0xFD] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::L)), 8);
    a[0xFE] = c(ins!(Set, Op::B3(7), Op::RegMem(Reg::HL)), 16);
    a[0xFF] = c(ins!(Set, Op::B3(7), Op::Reg(Reg::A)), 8);

    a
};