//! Memory opcodes: `LD`, `ST` (spec §4.3).
//!
//! Addressing is selected by the same two flag bits as every other polymorphic opcode,
//! but LD/ST interpret them differently: the *register-typed* forms (`IntReg`/
//! `FloatReg`) take their address from `R[arg2]` rather than from the third operand's
//! register id (that field goes unused for LD/ST — there's no third register needed,
//! just a data register and an address register). The *immediate-typed* forms
//! (`IntImm`/`FloatImm`) take the address directly from the third operand's raw bits:
//! for the float-immediate form that means un-reinterpreting the bit pattern decode
//! already classified as an `f32` back into the address it started life as.

use crate::decode::{Decoded, Operand};
use crate::error::ErrorKind;
use crate::state::VmState;

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let (addr, is_float) = match d.third {
        Operand::IntImm(v) => (v as i64, false),
        Operand::FloatImm(v) => (v.to_bits() as i32 as i64, true),
        Operand::IntReg(_) => (vm.read_r(d.arg2)? as i64, false),
        Operand::FloatReg(_) => (vm.read_r(d.arg2)? as i64, true),
    };

    match (d.opcode, is_float) {
        (crate::decode::Opcode::Ld, false) => {
            let value = vm.read_mem(addr)?;
            vm.write_r(d.arg1, value)
        }
        (crate::decode::Opcode::Ld, true) => {
            let bits = vm.read_mem(addr)? as u32;
            vm.write_f(d.arg1, f32::from_bits(bits))
        }
        (crate::decode::Opcode::St, false) => {
            let value = vm.read_r(d.arg1)?;
            vm.write_mem(addr, value)
        }
        (crate::decode::Opcode::St, true) => {
            let value = vm.read_f(d.arg1)?;
            vm.write_mem(addr, value.to_bits() as i32)
        }
        _ => unreachable!("dispatcher only routes LD/ST here"),
    }
}
