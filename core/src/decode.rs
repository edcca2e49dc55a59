//! Instruction decode (spec §4.3).
//!
//! A program word is a 64-bit instruction:
//!
//! ```text
//! 63:56  opcode (8)
//! 55:48  type flags (8, low 2 bits significant)
//! 47:40  register argument 1 (8)
//! 39:32  register argument 2 (8)
//! 31:0   third operand (32) — interpreted per type flag
//! ```
//!
//! Decode is opcode-agnostic: the third operand's shape depends only on the type-flag
//! bits, never on which opcode is being decoded. That uniformity is expressed here as a
//! sum type (`Operand`) rather than four separate scratch fields, which is what the
//! original C decoder (`examples/original_source/src/graphX.c`) used when it wrote into
//! fixed `vm->A0`/`A1`/`A2` slots — the same information, in an idiomatic Rust shape.

use crate::error::ErrorKind;

/// Dense opcode space (spec §4.3, §6). Unrecognised byte values decode to
/// `ErrorKind::Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Halt = 0,
    Jmp = 1,
    Bz = 2,
    Bnz = 3,
    Blt = 4,
    Bge = 5,
    Niter = 6,
    Nnext = 7,
    Eiter = 8,
    Enext = 9,
    Hase = 10,
    Deg = 11,
    Add = 12,
    Sub = 13,
    Mul = 14,
    Div = 15,
    Cmp = 16,
    Mov = 17,
    Movc = 18,
    Ld = 19,
    St = 20,
    Vadd = 21,
    Vsub = 22,
    Vmul = 23,
    Vdiv = 24,
    Vld = 25,
    Vst = 26,
    Vset = 27,
    Vsum = 28,
    Fpush = 29,
    Fpop = 30,
    Fempty = 31,
    Fswap = 32,
    Ffill = 33,
    Parallel = 34,
    Barrier = 35,
    Lock = 36,
    Unlock = 37,
}

impl Opcode {
    /// Human-readable mnemonic, used only by host-side trace/diagnostic rendering
    /// (spec §6 debug hooks); never consulted by execution semantics.
    pub fn name(self) -> &'static str {
        use Opcode::*;
        match self {
            Halt => "HALT",
            Jmp => "JMP",
            Bz => "BZ",
            Bnz => "BNZ",
            Blt => "BLT",
            Bge => "BGE",
            Niter => "NITER",
            Nnext => "NNEXT",
            Eiter => "EITER",
            Enext => "ENEXT",
            Hase => "HASE",
            Deg => "DEG",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Cmp => "CMP",
            Mov => "MOV",
            Movc => "MOVC",
            Ld => "LD",
            St => "ST",
            Vadd => "VADD",
            Vsub => "VSUB",
            Vmul => "VMUL",
            Vdiv => "VDIV",
            Vld => "VLD",
            Vst => "VST",
            Vset => "VSET",
            Vsum => "VSUM",
            Fpush => "FPUSH",
            Fpop => "FPOP",
            Fempty => "FEMPTY",
            Fswap => "FSWAP",
            Ffill => "FFILL",
            Parallel => "PARALLEL",
            Barrier => "BARRIER",
            Lock => "LOCK",
            Unlock => "UNLOCK",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ErrorKind;

    fn try_from(byte: u8) -> Result<Self, ErrorKind> {
        use Opcode::*;
        Ok(match byte {
            0 => Halt,
            1 => Jmp,
            2 => Bz,
            3 => Bnz,
            4 => Blt,
            5 => Bge,
            6 => Niter,
            7 => Nnext,
            8 => Eiter,
            9 => Enext,
            10 => Hase,
            11 => Deg,
            12 => Add,
            13 => Sub,
            14 => Mul,
            15 => Div,
            16 => Cmp,
            17 => Mov,
            18 => Movc,
            19 => Ld,
            20 => St,
            21 => Vadd,
            22 => Vsub,
            23 => Vmul,
            24 => Vdiv,
            25 => Vld,
            26 => Vst,
            27 => Vset,
            28 => Vsum,
            29 => Fpush,
            30 => Fpop,
            31 => Fempty,
            32 => Fswap,
            33 => Ffill,
            34 => Parallel,
            35 => Barrier,
            36 => Lock,
            37 => Unlock,
            _ => return Err(ErrorKind::Unsupported),
        })
    }
}

/// The third operand, shaped by the low two bits of the type-flags byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// `00` — R-type, integer: an 8-bit integer register id.
    IntReg(u8),
    /// `01` — I-type, integer: a signed 32-bit immediate.
    IntImm(i32),
    /// `10` — R-type, float: an 8-bit float register id.
    FloatReg(u8),
    /// `11` — I-type, float: a 32-bit IEEE-754 bit pattern.
    FloatImm(f32),
}

impl Operand {
    /// The operand's raw 32 bits, regardless of variant. Used by memory opcodes, whose
    /// I-type immediate address is carried in the same bits the generic decode step
    /// already classified as `IntImm`/`FloatImm` — `to_bits` round-trips a `FloatImm`
    /// back to the address the assembler encoded.
    pub fn raw_bits(self) -> u32 {
        match self {
            Operand::IntImm(v) => v as u32,
            Operand::FloatImm(v) => v.to_bits(),
            Operand::IntReg(r) | Operand::FloatReg(r) => r as u32,
        }
    }

    /// `true` for the two float-typed variants (flag bit 1 set).
    pub fn is_float(self) -> bool {
        matches!(self, Operand::FloatReg(_) | Operand::FloatImm(_))
    }

    /// `true` for the two register-typed variants (flag bit 0 clear).
    pub fn is_register_form(self) -> bool {
        matches!(self, Operand::IntReg(_) | Operand::FloatReg(_))
    }
}

/// A fully decoded instruction, ready for dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Decoded {
    pub opcode: Opcode,
    pub arg1: u8,
    pub arg2: u8,
    pub third: Operand,
}

/// Decode one 64-bit program word. Returns `Unsupported` for an unrecognised opcode
/// byte; the low two bits of the type-flags byte always select a valid `Operand`
/// variant (all four combinations are defined), so only the opcode lookup can fail.
pub fn decode(word: u64) -> Result<Decoded, ErrorKind> {
    let opcode_byte = (word >> 56) as u8;
    let flags = (word >> 48) as u8;
    let arg1 = (word >> 40) as u8;
    let arg2 = (word >> 32) as u8;
    let raw = word as u32;

    let opcode = Opcode::try_from(opcode_byte)?;
    let third = match flags & 0b11 {
        0b00 => Operand::IntReg((raw >> 24) as u8),
        0b01 => Operand::IntImm(raw as i32),
        0b10 => Operand::FloatReg((raw >> 24) as u8),
        0b11 => Operand::FloatImm(f32::from_bits(raw)),
        _ => unreachable!("two bits cannot exceed 0b11"),
    };

    Ok(Decoded {
        opcode,
        arg1,
        arg2,
        third,
    })
}

/// Pack an instruction word — the mirror image of `decode`. Used by tests to build
/// programs without hand-assembling bit patterns. For the register-typed forms
/// (`00`/`10`), `third` is the small register id (decode places it at bits 31:24); for
/// the immediate-typed forms it is the raw 32-bit immediate/bit-pattern, unshifted.
pub fn encode(opcode: Opcode, flags: u8, arg1: u8, arg2: u8, third: u32) -> u64 {
    let third_field = match flags & 0b11 {
        0b00 | 0b10 => (third & 0xFF) << 24,
        _ => third,
    };
    ((opcode as u64) << 56)
        | ((flags as u64) << 48)
        | ((arg1 as u64) << 40)
        | ((arg2 as u64) << 32)
        | (third_field as u64)
}
