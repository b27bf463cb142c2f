pub(crate) mod decoder;
mod isa;
mod table;

use bincode::{Decode, Encode};
use log::{error, trace};
use std::num::Wrapping;

use crate::bus::Bus;
use crate::error::EmulatorError;
use crate::macros::bit_fields;
use crate::mmu;
use isa::{Cond, Instr, Opcode, Operand, Reg};

/// Sharp LR35902 register file and interrupt-latch state. Instruction
/// semantics follow https://rgbds.gbdev.io/docs/v0.8.0/gbz80.7
///
/// The CPU holds no reference to memory between calls — every byte an
/// opcode needs beyond its own encoding is read by the caller's
/// `Bus`, passed in for the duration of one `execute_instruction` or
/// `service_interrupts` call.
///
/// Supports saving/restoring state via `bincode`; fields that hold
/// only transient presentation state live elsewhere and are not part
/// of this struct.
#[derive(Clone, Encode, Decode)]
pub struct Cpu {
    pub(crate) state: CpuState,
    pub(crate) trace_execution: bool,
    /// Set when HALT executes with IME clear and an interrupt already
    /// pending: the CPU does not actually halt, but the next opcode
    /// fetch fails to advance PC, so the following instruction runs
    /// twice.
    halt_bug: bool,

    // Machine registers
    #[bincode(with_serde)]
    pub(crate) pc: Wrapping<u16>,
    #[bincode(with_serde)]
    pub(crate) sp: Wrapping<u16>,
    #[bincode(with_serde)]
    flags: Flags,
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,

    /// Interrupt master enable
    ime: bool,
    /// Set ime after next instruction completes.
    set_ime_later: bool,
}

#[derive(Default, Clone, PartialEq, Eq, Encode, Decode)]
pub(crate) enum CpuState {
    #[default]
    Running,
    /// Halted from executing instructions until an interrupt occurs.
    Halted,
    /// Treated as HALT-equivalent: DMG STOP semantics are poorly
    /// documented and games rarely rely on more than this.
    Stopped,
}

bit_fields! {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Flags<u8> {
        _0: 4,
        c:1,
        h:1,
        n:1,
        z:1,
    }
}

/// LDH adds 0xFF00 to its memory address operands before using
/// them for accessing memory, it is for HRAM.
/// Only LDH has such operands, they are: `[C]` and `[imm8]`.
const LDH_OFFSET: u16 = 0xFF00;

impl Cpu {
    /// Post-boot register state (no boot ROM is executed).
    pub(crate) fn new() -> Self {
        Self {
            state: CpuState::Running,
            trace_execution: false,
            halt_bug: false,

            pc: Wrapping(0x0100),
            sp: Wrapping(0xFFFE),
            flags: Flags::new(0xB0),
            a: 0x01,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,

            ime: true,
            set_ime_later: false,
        }
    }

    pub(crate) fn is_halted(&self) -> bool {
        self.state == CpuState::Halted
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.state == CpuState::Stopped
    }

    pub(crate) fn pc(&self) -> u16 {
        self.pc.0
    }

    pub(crate) fn set_pc(&mut self, pc: u16) {
        self.pc.0 = pc;
    }

    /// Consumes a pending halt-bug flag. The orchestrator calls this
    /// right after decoding the instruction following a buggy HALT,
    /// and re-reads the same PC again next step if it was set.
    pub(crate) fn take_halt_bug(&mut self) -> bool {
        std::mem::take(&mut self.halt_bug)
    }

    /// Services the highest-priority pending, enabled interrupt if
    /// IME is set, returning the cycles consumed (always 20 T-cycles,
    /// 5 M-cycles) or `None` if there is nothing to service. Also
    /// wakes the CPU from HALT/STOP regardless of IME.
    pub(crate) fn service_interrupts(&mut self, bus: &mut Bus) -> Option<u32> {
        let pending = bus.ic.pending();

        if pending.is_some() && (self.state == CpuState::Halted || self.state == CpuState::Stopped) {
            self.state = CpuState::Running;
        }

        if !self.ime {
            return None;
        }
        let interrupt = pending?;

        bus.ic.ack(interrupt);
        self.ime = false;
        self.do_push(bus, self.pc.0);
        self.pc.0 = interrupt.vector();
        Some(20)
    }

    /// Executes `ins` (already decoded and PC-advanced by the
    /// caller) and returns the T-cycles consumed. EI's one-instruction
    /// delay before IME actually takes effect is resolved by the
    /// caller via [`Cpu::ime_pending`]/[`Cpu::finish_step`], mirroring
    /// how the same delay must also survive a step that serviced an
    /// interrupt instead of executing one.
    ///
    /// Fails if `ins` decoded to an unimplemented opcode; the CPU has
    /// no trap semantics for this, so it's surfaced as an error rather
    /// than silently skipped.
    pub(crate) fn execute_instruction(
        &mut self,
        bus: &mut Bus,
        ins: Instr,
    ) -> Result<u32, EmulatorError> {
        Ok(self.exec(bus, ins)? as u32 * 4)
    }

    /// Whether EI is waiting to take effect after the instruction
    /// about to run.
    pub(crate) fn ime_pending(&self) -> bool {
        self.set_ime_later
    }

    /// Completes the delayed-IME bookkeeping for a step; call with the
    /// value `ime_pending` returned *before* that step's
    /// `execute_instruction`/`service_interrupts` call.
    pub(crate) fn finish_step(&mut self, was_pending_before: bool) {
        if self.set_ime_later && was_pending_before == self.set_ime_later {
            self.ime = true;
            self.set_ime_later = false;
        }
    }

    fn exec(&mut self, bus: &mut Bus, ins: Instr) -> Result<u8, EmulatorError> {
        let mut mcycles = ins.mcycles;

        let (oa, ob) = (ins.op1, ins.op2);
        let a = self.get_op_val(bus, oa);
        let b = self.get_op_val(bus, ob);

        use Opcode::*;
        match ins.op {
            Ld | Ldh => {
                // `LD [a16], SP` loads two bytes.
                if let (Operand::A16(addr), Operand::Reg(Reg::SP)) = (oa, ob) {
                    let [h, l] = self.sp.0.to_be_bytes();
                    mmu::write(bus, addr, l);
                    mmu::write(bus, addr.wrapping_add(1), h);
                } else {
                    self.set_op_val(bus, oa, b);
                }

                // Only LD has [HL+] and [HL-] operands.
                // Increment/Decrement the register as present.
                let d = get_hl_reg_delta(oa) + get_hl_reg_delta(ob);
                let hl = self.get_reg(Reg::HL).wrapping_add_signed(d);
                self.set_reg(Reg::HL, hl);

                // In `LD HL, SP + e8` flags needs to be set.
                if let Operand::SPplusI8(e) = ob {
                    let v = (e as i16) as u16;
                    self.flags.write(0);
                    self.flags.h = is_carry(self.sp.0, v, 4);
                    self.flags.c = is_carry(self.sp.0, v, 8);
                }
            }

            Push => self.do_push(bus, a),
            Pop => {
                let r = self.do_pop(bus);
                self.set_op_val(bus, oa, r);
            }

            Inc | Dec => {
                let r = self.do_inc_dec(matches!(ins.op, Inc), oa, a);
                self.set_op_val(bus, oa, r);
            }

            // For "ADD HL, r16" and "ADD SP, e8".
            Add if is_reg16(oa) => {
                let r = self.do_add_r16(ob, a, b);
                self.set_op_val(bus, oa, r);
            }

            Add | Adc | Sub | Sbc | Cp | And | Xor | Or => {
                let r = self.do_8bit_arith(ins.op, a as u8, b as u8);
                self.set_op_val(bus, oa, r as u16);
            }

            Rlca | Rlc | Rrca | Rrc | Rla | Rl | Rra | Rr | Sla | Sra | Srl => {
                // These have Reg::A as their first operand implicitly.
                let (oa, a) = if matches!(ins.op, Rlca | Rrca | Rla | Rra) {
                    (Operand::Reg(Reg::A), self.a as u16)
                } else {
                    (oa, a)
                };
                let r = self.do_shift_or_rotate(ins.op, a as u8);
                self.set_op_val(bus, oa, r as u16);
            }

            // Swap nibbles.
            Swap => {
                let r = ((a >> 4) & 0xF) | ((a & 0xF) << 4);
                self.set_cz00(0, r as u8);
                self.set_op_val(bus, oa, r);
            }

            // Test bit if 0.
            Bit => {
                self.flags.z = is_zero((b >> a) & 1);
                self.flags.n = 0;
                self.flags.h = 1;
            }
            // Set bit to 0.
            Res => self.set_op_val(bus, ob, b & !(1 << a)),
            // Set bit to 1.
            Set => self.set_op_val(bus, ob, b | (1 << a)),

            // Branch
            Jr | Jp | Call | Ret | Reti | Rst => {
                if self.do_branch(bus, ins.op, oa, a, b) {
                    mcycles = ins.branch_mcycles
                }
            }

            // Interrupt and system control
            Di => self.ime = false,
            // Setting IME=1 by EI is delayed by one cycle.
            Ei => self.set_ime_later = true,
            // Halt CPU until an interrupt is recieved, subject to the
            // well-known halt bug when IME is clear.
            Halt => {
                if !self.ime && bus.ic.any_requested_and_enabled() {
                    self.halt_bug = true;
                } else {
                    self.state = CpuState::Halted;
                }
            }

            Stop => {
                self.state = CpuState::Stopped;
                bus.timer.set_div(0);
            }

            // Misc
            Cpl => {
                self.a = !self.a;
                self.flags.n = 1;
                self.flags.h = 1;
            }
            Ccf => {
                self.flags.c = !self.flags.c & 1;
                self.flags.n = 0;
                self.flags.h = 0;
            }
            Scf => {
                self.flags.c = 1;
                self.flags.n = 0;
                self.flags.h = 0;
            }
            Nop => (),
            Daa => self.do_daa(),

            Illegal | Prefix => {
                let opcode = mmu::read(bus, self.pc.0.wrapping_sub(1));
                error!("cpu: illegal opcode 0x{opcode:02X} at PC=0x{:04X}", self.pc.0);
                return Err(EmulatorError::IllegalOpcode { opcode, pc: self.pc.0 });
            }
        }

        if self.trace_execution {
            let newa = self.get_op_val(bus, oa);
            trace!(
                "[{oa}={a}|{newa} {ob}={b}] [Z{} N{} C{}] [PC:${:04X}] {}",
                self.flags.z,
                self.flags.n,
                self.flags.c,
                self.pc.0,
                ins,
            );
        }

        Ok(mcycles)
    }

    /// Get numerical value for the operand.
    /// For Cond 0 is returned as it has no numeric meaning.
    fn get_op_val(&self, bus: &mut Bus, op: Operand) -> u16 {
        match op {
            Operand::Absent => 0,
            Operand::Reg(r) => self.get_reg(r),
            Operand::RegMem(r) => mmu::read(bus, self.get_mem_addr(r)) as u16,

            // Cond is seperately inspected whenever needed, so just return 0.
            Operand::Cond(_) => 0,
            Operand::B3(b) => b as u16,
            Operand::Tgt(t) => t as u16,

            // 2's complement numbers can be added as unsigned numbers
            // giving the same result, ignoring any overflows.
            Operand::I8(i) => (i as i16) as u16,
            Operand::U8(u) => u as u16,
            Operand::U16(u) => u,
            // Flags should be set when `SP + e8` is used as a operand.
            Operand::SPplusI8(i) => (self.sp.0 as i32 + i as i32) as u16,

            // [imm8] is a memory operand for LDH, see `LDH_OFFSET`.
            Operand::A8(u) => mmu::read(bus, u as u16 + LDH_OFFSET) as u16,
            Operand::A16(u) => mmu::read(bus, u) as u16,
        }
    }

    /// Set value for the given operand. Panics if the operand is not a
    /// destination, that is, either a register(direct or indirect) or
    /// a memory address.
    fn set_op_val(&mut self, bus: &mut Bus, op: Operand, val: u16) {
        match op {
            Operand::Reg(r) => self.set_reg(r, val),
            Operand::RegMem(r) => mmu::write(bus, self.get_mem_addr(r), val as u8),

            // [imm8] is a memory operand for LDH, see `LDH_OFFSET`.
            Operand::A8(u) => mmu::write(bus, u as u16 + LDH_OFFSET, val as u8),
            Operand::A16(u) => mmu::write(bus, u, val as u8),

            _ => panic!("Operand is not a destination, it has no location"),
        }
    }

    /// Get address from register value for indirect addressing.
    /// Panics if register does not support indirect mode.
    fn get_mem_addr(&self, r: Reg) -> u16 {
        match r {
            // [C] is a memory operand for LDH, see `LDH_OFFSET`.
            Reg::C => self.get_reg(Reg::C) + LDH_OFFSET,
            Reg::BC | Reg::DE => self.get_reg(r),
            Reg::HL | Reg::HLinc | Reg::HLdec => self.get_reg(Reg::HL),

            _ => panic!("given register does not support indirect-addressing"),
        }
    }

    /// Get value stored in register.
    fn get_reg(&self, r: Reg) -> u16 {
        let bytes = match r {
            Reg::A => [0, self.a],
            Reg::B => [0, self.b],
            Reg::C => [0, self.c],
            Reg::D => [0, self.d],
            Reg::E => [0, self.e],
            Reg::H => [0, self.h],
            Reg::L => [0, self.l],
            Reg::AF => [self.a, self.flags.read()],
            Reg::BC => [self.b, self.c],
            Reg::DE => [self.d, self.e],
            Reg::HL => [self.h, self.l],
            Reg::SP => self.sp.0.to_be_bytes(),
            _ => unreachable!(),
        };

        u16::from_be_bytes(bytes)
    }

    /// Set register value.
    fn set_reg(&mut self, r: Reg, v: u16) {
        let [h, l] = v.to_be_bytes();

        match r {
            Reg::A => self.a = l,
            Reg::B => self.b = l,
            Reg::C => self.c = l,
            Reg::D => self.d = l,
            Reg::E => self.e = l,
            Reg::H => self.h = l,
            Reg::L => self.l = l,
            Reg::AF => {
                self.a = h;
                self.flags.write(l & 0xF0) // Lower 4-bits must be always zero.
            }
            Reg::BC => (self.b, self.c) = (h, l),
            Reg::DE => (self.d, self.e) = (h, l),
            Reg::HL => (self.h, self.l) = (h, l),
            Reg::SP => self.sp = Wrapping(v),
            _ => unreachable!(),
        }
    }

    // Utility methods, these help evaluate a specific class if instructions.
    //-----------------------------------------------------------------------

    /// Push 2-bytes
    fn do_push(&mut self, bus: &mut Bus, v: u16) {
        let [h, l] = v.to_be_bytes();

        self.sp -= 1;
        mmu::write(bus, self.sp.0, h);
        self.sp -= 1;
        mmu::write(bus, self.sp.0, l);
    }

    /// Pop 2-bytes
    fn do_pop(&mut self, bus: &mut Bus) -> u16 {
        let l = mmu::read(bus, self.sp.0);
        self.sp += 1;
        let h = mmu::read(bus, self.sp.0);
        self.sp += 1;

        u16::from_be_bytes([h, l])
    }

    /// Executes INC and DEC for their both: 16-bit and 8-bit variants.
    fn do_inc_dec(&mut self, is_inc: bool, oa: Operand, a: u16) -> u16 {
        if is_reg16(oa) {
            // No flags are affected for "INC|DEC r16".
            if is_inc {
                a.wrapping_add(1)
            } else {
                a.wrapping_sub(1)
            }
        } else {
            let r = if is_inc {
                self.flags.n = 0;
                self.flags.h = is_carry(a, 1, 4);
                (a as u8).wrapping_add(1) as u16
            } else {
                self.flags.n = 1;
                self.flags.h = is_borrow(a, 1, 4);
                (a as u8).wrapping_sub(1) as u16
            };

            self.flags.z = is_zero(r);
            r
        }
    }

    /// Executes instruction "ADD SP, e8" or "ADD HL, r16" depending upon
    /// the type second argument, which is passed as `ob`.
    fn do_add_r16(&mut self, ob: Operand, a: u16, b: u16) -> u16 {
        let r = a.wrapping_add(b);

        // Overflow if r < [a or b], for on bit-x take only lower x+1 bits.
        let is_ovf = |bits: u32| is_carry(a, b, bits);

        if matches!(ob, Operand::I8(_)) {
            // For "ADD SP, e8"
            self.flags.z = 0;
            self.flags.h = is_ovf(4);
            self.flags.c = is_ovf(8);
        } else {
            // For "ADD HL, r16"
            self.flags.h = is_ovf(12);
            self.flags.c = is_ovf(16);
        }
        self.flags.n = 0;

        r
    }

    /// Does arithmetic and returns result and sets flags as required.
    fn do_8bit_arith(&mut self, op: Opcode, a: u8, b: u8) -> u8 {
        let cb = self.flags.c;

        use Opcode::*;
        let r = match op {
            Add => a.wrapping_add(b),
            Adc => a.wrapping_add(b).wrapping_add(cb),

            Sub | Cp => a.wrapping_sub(b),
            Sbc => a.wrapping_sub(b).wrapping_sub(cb),

            And => a & b,
            Xor => a ^ b,
            Or => a | b,

            _ => unreachable!(),
        };

        self.flags.write(0);
        self.flags.z = is_zero(r as u16);

        let (ax, bx, cx) = (a as u16, b as u16, cb as u16);
        match op {
            Add => {
                self.flags.h = is_carry(ax, bx, 4);
                self.flags.c = is_carry(ax, bx, 8);
            }
            Adc => {
                self.flags.h = is_carry3(ax, bx, cx, 4);
                self.flags.c = is_carry3(ax, bx, cx, 8);
            }
            Sub | Cp => {
                self.flags.h = is_borrow(ax, bx, 4);
                self.flags.c = is_borrow(ax, bx, 8);
                self.flags.n = 1;
            }
            Sbc => {
                self.flags.h = is_borrow3(ax, bx, cx, 4);
                self.flags.c = is_borrow3(ax, bx, cx, 8);
                self.flags.n = 1;
            }
            And => self.flags.h = 1,
            _ => (),
        }

        if matches!(op, Opcode::Cp) {
            a
        } else {
            r
        }
    }

    /// Does all kinds of shifts and rotations and sets flags as specified.
    fn do_shift_or_rotate(&mut self, op: Opcode, a: u8) -> u8 {
        // Bit Shift and Rotations, all done on 8-bit operands only.
        // For left shift MSB and for right shift LSB determines the carry flag.

        use Opcode::*;
        let r = match op {
            // Rotate left.
            Rlca | Rlc => a.rotate_left(1),
            // Rotate right.
            Rrca | Rrc => a.rotate_right(1),
            // Rotate left via carry flag.
            Rla | Rl => a << 1 | self.flags.c,
            // Rotate right via carry flag.
            Rra | Rr => a >> 1 | self.flags.c << 7,
            // Arithmetic shift left.
            Sla => a << 1,
            // Arithmetic shift right.
            Sra => ((a as i8) >> 1) as u8,
            // Logical shift right.
            Srl => a >> 1,

            _ => unreachable!(),
        };

        match op {
            // For left shifts/rotates, MSB will go into carry.
            Rlca | Rlc | Rla | Rl | Sla => self.set_cz00(a >> 7, r),
            // For right shifts/rotates, LSB will go into carry.
            Rrca | Rrc | Rra | Rr | Sra | Srl => self.set_cz00(a & 1, r),

            _ => unreachable!(),
        }

        // These set flag.Z to 0.
        if matches!(op, Rla | Rlca | Rrca | Rra) {
            self.flags.z = 0;
        }

        r
    }

    /// Execute branch instructions: JR, JP, RET, RETI, CALL and RST,
    /// set PC and return true if the branch was taken.
    fn do_branch(&mut self, bus: &mut Bus, op: Opcode, oa: Operand, a: u16, b: u16) -> bool {
        let taken = match oa {
            Operand::Cond(cc) => match cc {
                Cond::NC => self.flags.c == 0,
                Cond::NZ => self.flags.z == 0,
                Cond::C => self.flags.c == 1,
                Cond::Z => self.flags.z == 1,
            },
            _ => true,
        };

        if !taken {
            return false;
        }

        let pc = if let Operand::Cond(_) = oa { b } else { a };

        use Opcode::*;
        let pc = match op {
            Jr => self.pc.0.wrapping_add(pc),
            Jp => pc,

            Call => {
                self.do_push(bus, self.pc.0);
                pc
            }

            Ret => self.do_pop(bus),

            Reti => {
                self.ime = true;
                self.do_pop(bus)
            }

            Rst => {
                self.do_push(bus, self.pc.0);
                pc
            }

            _ => unreachable!(),
        };

        self.pc.0 = pc;
        true
    }

    fn do_daa(&mut self) {
        let mut a = self.a;

        // Decimal accumulator adjust, that is, adjust the result in A as if
        // the last addition/subtraction performed on A was assumed that A was
        // a two digit BCD(binary coded decimal) number.
        if self.flags.n == 0 {
            // On addition
            if self.flags.c == 1 || a > 0x99 {
                a = a.wrapping_add(0x60);
                self.flags.c = 1;
            }
            if self.flags.h == 1 || (a & 0x0f) > 0x09 {
                a = a.wrapping_add(0x6);
            }
        } else {
            // On subtraction
            if self.flags.c == 1 {
                a = a.wrapping_sub(0x60);
            }
            if self.flags.h == 1 {
                a = a.wrapping_sub(0x6);
            }
        }

        self.a = a;
        self.flags.z = is_zero(a as u16);
        self.flags.h = 0;
    }

    /// Set carry(to carry.LSB==1) and zero(to zero==0) flags.
    /// Set rest of the flags to 0.
    fn set_cz00(&mut self, carry: u8, zero: u8) {
        self.flags.write(0);
        self.flags.c = carry & 1;
        self.flags.z = is_zero(zero as u16);
    }
}

/// Returns true is `op` is a reg16 operand.
fn is_reg16(op: Operand) -> bool {
    match op {
        Operand::Reg(r) => matches!(r, Reg::BC | Reg::DE | Reg::HL | Reg::SP),
        _ => false,
    }
}

// Functions for determining flag values, since flags is a bit_fields! struct,
// it has all its fields are u8 as opposed to being booleans.
fn is_carry3(a: u16, b: u16, c: u16, bits: u32) -> u8 {
    if is_carry(a, b, bits) == 1 {
        1
    } else {
        is_carry(a.wrapping_add(b), c, bits)
    }
}

fn is_borrow3(a: u16, b: u16, c: u16, bits: u32) -> u8 {
    if is_borrow(a, b, bits) == 1 {
        1
    } else {
        is_borrow(a.wrapping_sub(b), c, bits)
    }
}

#[inline]
fn is_carry(a: u16, b: u16, bits: u32) -> u8 {
    // Overflow for r=a+b: if r < [a or b]
    let m = mask_u16(bits);
    let (a, b) = (a & m, b & m);
    (a.wrapping_add(b) & m < a) as u8
}

#[inline]
fn is_borrow(a: u16, b: u16, bits: u32) -> u8 {
    // Underflow for r=a-b: if b > a
    let m = mask_u16(bits);
    let (a, b) = (a & m, b & m);
    (b > a) as u8
}

#[inline]
fn is_zero(a: u16) -> u8 {
    (a == 0) as u8
}

/// Returns +1 for [HL+], -1 for [HL-] and otherwise 0.
#[inline]
fn get_hl_reg_delta(op: Operand) -> i16 {
    match op {
        Operand::RegMem(r) => match r {
            Reg::HLinc => 1,
            Reg::HLdec => -1,
            _ => 0,
        },
        _ => 0,
    }
}

#[inline(always)]
const fn mask_u16(bits: u32) -> u16 {
    if bits == u16::BITS {
        !0
    } else {
        !(!0 << bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apu::Apu;
    use crate::cartridge::Cartridge;
    use crate::dma::Dma;
    use crate::info::{SIZE_HRAM, SIZE_ROM_BANK, SIZE_WRAM_BANK};
    use crate::interrupts::{Interrupt, InterruptController};
    use crate::joypad::Joypad;
    use crate::ppu::Ppu;
    use crate::serial::Serial;
    use crate::timer::Timer;

    struct Harness {
        cart: Cartridge,
        ppu: Ppu,
        apu: Apu,
        timer: Timer,
        ic: InterruptController,
        joypad: Joypad,
        dma: Dma,
        serial: Serial,
        wram: [u8; SIZE_WRAM_BANK * 2],
        hram: [u8; SIZE_HRAM],
    }

    impl Harness {
        fn new() -> Self {
            let rom = vec![0u8; SIZE_ROM_BANK * 2];
            Self {
                cart: Cartridge::new(&rom).unwrap(),
                ppu: Ppu::new(),
                apu: Apu::new(),
                timer: Timer::new(),
                ic: InterruptController::new(),
                joypad: Joypad::new(),
                dma: Dma::new(),
                serial: Serial::new(),
                wram: [0; SIZE_WRAM_BANK * 2],
                hram: [0; SIZE_HRAM],
            }
        }

        fn bus(&mut self) -> Bus<'_> {
            Bus {
                cart: &mut self.cart,
                ppu: &mut self.ppu,
                apu: &mut self.apu,
                timer: &mut self.timer,
                ic: &mut self.ic,
                joypad: &mut self.joypad,
                dma: &mut self.dma,
                serial: &mut self.serial,
                wram: &mut self.wram,
                hram: &mut self.hram,
            }
        }
    }

    fn run(cpu: &mut Cpu, bus: &mut Bus, ins: Instr) -> u32 {
        let was_pending = cpu.ime_pending();
        let cycles = cpu.execute_instruction(bus, ins).unwrap();
        cpu.finish_step(was_pending);
        cycles
    }

    #[test]
    fn post_boot_register_state_matches_dmg() {
        let cpu = Cpu::new();
        assert_eq!(cpu.get_reg(Reg::AF), 0x0100 | 0xB0 as u16);
        assert_eq!(cpu.get_reg(Reg::BC), 0x0013);
        assert_eq!(cpu.get_reg(Reg::DE), 0x00D8);
        assert_eq!(cpu.get_reg(Reg::HL), 0x014D);
        assert_eq!(cpu.sp.0, 0xFFFE);
        assert_eq!(cpu.pc.0, 0x0100);
        assert!(cpu.ime);
    }

    #[test]
    fn add_sets_zero_and_half_carry() {
        let mut h = Harness::new();
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.a = 0x0F;
        cpu.b = 0x01;

        let ins = Instr { op: Opcode::Add, op1: Operand::Reg(Reg::A), op2: Operand::Reg(Reg::B), ..Default::default() };
        run(&mut cpu, &mut bus, ins);

        assert_eq!(cpu.a, 0x10);
        assert_eq!(cpu.flags.z, 0);
        assert_eq!(cpu.flags.h, 1);
        assert_eq!(cpu.flags.n, 0);
    }

    #[test]
    fn dec_to_zero_sets_zero_flag_and_keeps_carry() {
        let mut h = Harness::new();
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.a = 1;
        cpu.flags.c = 1;

        let ins = Instr { op: Opcode::Dec, op1: Operand::Reg(Reg::A), op2: Operand::Absent, ..Default::default() };
        run(&mut cpu, &mut bus, ins);

        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.flags.z, 1);
        assert_eq!(cpu.flags.n, 1);
        assert_eq!(cpu.flags.c, 1);
    }

    #[test]
    fn ei_enables_ime_only_after_the_following_instruction() {
        let mut h = Harness::new();
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.ime = false;

        run(&mut cpu, &mut bus, Instr { op: Opcode::Ei, op1: Operand::Absent, op2: Operand::Absent, ..Default::default() });
        assert!(!cpu.ime);

        run(&mut cpu, &mut bus, Instr { op: Opcode::Nop, op1: Operand::Absent, op2: Operand::Absent, ..Default::default() });
        assert!(cpu.ime);
    }

    #[test]
    fn halt_with_pending_interrupt_and_ime_clear_sets_halt_bug() {
        let mut h = Harness::new();
        h.ic.write_ie(0x1F);
        h.ic.request(Interrupt::VBlank);
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.ime = false;

        run(&mut cpu, &mut bus, Instr { op: Opcode::Halt, op1: Operand::Absent, op2: Operand::Absent, ..Default::default() });

        assert!(!cpu.is_halted());
        assert!(cpu.take_halt_bug());
    }

    #[test]
    fn service_interrupts_pushes_pc_and_jumps_to_vector() {
        let mut h = Harness::new();
        h.ic.write_ie(0x1F);
        h.ic.request(Interrupt::Timer);
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.pc.0 = 0x1234;
        cpu.sp.0 = 0xFFFE;

        let cycles = cpu.service_interrupts(&mut bus).unwrap();

        assert_eq!(cycles, 20);
        assert_eq!(cpu.pc.0, 0x50);
        assert!(!cpu.ime);
        assert_eq!(mmu::read(&mut bus, 0xFFFC), 0x34);
        assert_eq!(mmu::read(&mut bus, 0xFFFD), 0x12);
    }

    #[test]
    fn daa_adjusts_after_bcd_addition() {
        let mut h = Harness::new();
        let mut bus = h.bus();
        let mut cpu = Cpu::new();
        cpu.a = 0x0A;
        cpu.flags.n = 0;
        cpu.flags.h = 1;
        cpu.flags.c = 0;

        run(&mut cpu, &mut bus, Instr { op: Opcode::Daa, op1: Operand::Absent, op2: Operand::Absent, ..Default::default() });
        assert_eq!(cpu.a, 0x10);
    }
}
