//! Arithmetic/logic opcodes: `ADD`, `SUB`, `MUL`, `DIV`, `CMP`, `MOV`, `MOVC`
//! (spec §4.3). All are polymorphic over the type flag: the `IntReg`/`IntImm` forms
//! operate on the integer register file, `FloatReg`/`FloatImm` on the float file.

use crate::decode::{Decoded, Opcode, Operand};
use crate::error::ErrorKind;
use crate::state::VmState;

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.opcode {
        Opcode::Add => binop_int_or_float(vm, d, i32::wrapping_add, |a, b| a + b),
        Opcode::Sub => binop_int_or_float(vm, d, i32::wrapping_sub, |a, b| a - b),
        Opcode::Mul => binop_int_or_float(vm, d, i32::wrapping_mul, |a, b| a * b),
        Opcode::Div => div(vm, d),
        Opcode::Cmp => cmp(vm, d),
        Opcode::Mov => mov(vm, d),
        Opcode::Movc => movc(vm, d),
        _ => unreachable!("dispatcher only routes ALU opcodes here"),
    }
}

/// `R[arg1] = R[arg2] <op> <third>` (or the float equivalent). The third operand's own
/// embedded register id, if any, names the second source register directly — unlike
/// `MOV`, there's no redundant operand to ignore here.
fn binop_int_or_float(
    vm: &mut VmState,
    d: &Decoded,
    int_op: fn(i32, i32) -> i32,
    float_op: fn(f32, f32) -> f32,
) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(r3) => {
            let a = vm.read_r(d.arg2)?;
            let b = vm.read_r(r3)?;
            vm.write_r(d.arg1, int_op(a, b))
        }
        Operand::IntImm(imm) => {
            let a = vm.read_r(d.arg2)?;
            vm.write_r(d.arg1, int_op(a, imm))
        }
        Operand::FloatReg(r3) => {
            let a = vm.read_f(d.arg2)?;
            let b = vm.read_f(r3)?;
            vm.write_f(d.arg1, float_op(a, b))
        }
        Operand::FloatImm(imm) => {
            let a = vm.read_f(d.arg2)?;
            vm.write_f(d.arg1, float_op(a, imm))
        }
    }
}

/// `DIV` gets its own path: integer division by zero is a VM fault, float division
/// follows ordinary IEEE 754 semantics (producing `inf`/`NaN`, never erroring).
fn div(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(r3) => {
            let a = vm.read_r(d.arg2)?;
            let b = vm.read_r(r3)?;
            if b == 0 {
                return Err(ErrorKind::DivideByZero);
            }
            vm.write_r(d.arg1, a / b)
        }
        Operand::IntImm(imm) => {
            let a = vm.read_r(d.arg2)?;
            if imm == 0 {
                return Err(ErrorKind::DivideByZero);
            }
            vm.write_r(d.arg1, a / imm)
        }
        Operand::FloatReg(r3) => {
            let a = vm.read_f(d.arg2)?;
            let b = vm.read_f(r3)?;
            vm.write_f(d.arg1, a / b)
        }
        Operand::FloatImm(imm) => {
            let a = vm.read_f(d.arg2)?;
            vm.write_f(d.arg1, a / imm)
        }
    }
}

/// `CMP` has no destination register — `arg1` stands in as the first source, `arg2`
/// goes unused, and the type flag's second operand is drawn from `third` as usual.
/// Sets exactly one of `Z`/`N`/`P`, or clears all three for an unordered (`NaN`) float
/// comparison.
fn cmp(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let ordering = match d.third {
        Operand::IntReg(r3) => {
            let a = vm.read_r(d.arg1)?;
            let b = vm.read_r(r3)?;
            Some(a.cmp(&b))
        }
        Operand::IntImm(imm) => {
            let a = vm.read_r(d.arg1)?;
            Some(a.cmp(&imm))
        }
        Operand::FloatReg(r3) => {
            let a = vm.read_f(d.arg1)?;
            let b = vm.read_f(r3)?;
            a.partial_cmp(&b)
        }
        Operand::FloatImm(imm) => {
            let a = vm.read_f(d.arg1)?;
            a.partial_cmp(&imm)
        }
    };
    vm.set_compare_flags(ordering);
    Ok(())
}

/// Register-typed forms copy `R[arg2]`/`F[arg2]` into the destination, ignoring the
/// third operand's embedded register id entirely; immediate-typed forms copy the
/// immediate straight in, ignoring `arg2`.
fn mov(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(_) => {
            let v = vm.read_r(d.arg2)?;
            vm.write_r(d.arg1, v)
        }
        Operand::IntImm(v) => vm.write_r(d.arg1, v),
        Operand::FloatReg(_) => {
            let v = vm.read_f(d.arg2)?;
            vm.write_f(d.arg1, v)
        }
        Operand::FloatImm(v) => vm.write_f(d.arg1, v),
    }
}

/// Cross-file-typed move with a value cast, not a bit reinterpretation (distinct from
/// `LD`/`ST`'s bit-preserving float transfers). An integer-typed flag (`IntReg`/
/// `IntImm`) casts `R[arg2]` to `f32` into `F[arg1]`; a float-typed flag casts
/// `F[arg2]` to `i32` (truncating toward zero) into `R[arg1]`.
fn movc(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(_) | Operand::IntImm(_) => {
            let v = vm.read_r(d.arg2)?;
            vm.write_f(d.arg1, v as f32)
        }
        Operand::FloatReg(_) | Operand::FloatImm(_) => {
            let v = vm.read_f(d.arg2)?;
            vm.write_r(d.arg1, v as i32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode, encode};
    use crate::graph::Graph;
    use crate::state::Flag;

    fn vm() -> VmState<'static> {
        let g: &'static Graph = Box::leak(Box::new(Graph::new(vec![0], vec![], vec![])));
        VmState::new(g)
    }

    #[test]
    fn add_register_form() {
        let mut vm = vm();
        vm.write_r(1, 10).unwrap();
        vm.write_r(2, 32).unwrap();
        let d = decode(encode(Opcode::Add, 0b00, 0, 1, 2)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_r(0).unwrap(), 42);
    }

    #[test]
    fn sub_immediate_form() {
        let mut vm = vm();
        vm.write_r(1, 10).unwrap();
        let d = decode(encode(Opcode::Sub, 0b01, 0, 1, (-5i32) as u32)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_r(0).unwrap(), 15);
    }

    #[test]
    fn int_div_by_zero_errors() {
        let mut vm = vm();
        vm.write_r(1, 10).unwrap();
        let d = decode(encode(Opcode::Div, 0b01, 0, 1, 0)).unwrap();
        assert_eq!(exec(&mut vm, &d), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn float_div_by_zero_produces_infinity_not_error() {
        let mut vm = vm();
        vm.write_f(1, 1.0).unwrap();
        let d = decode(encode(Opcode::Div, 0b11, 0, 1, 0.0f32.to_bits())).unwrap();
        exec(&mut vm, &d).unwrap();
        assert!(vm.read_f(0).unwrap().is_infinite());
    }

    #[test]
    fn cmp_sets_exactly_one_flag() {
        let mut vm = vm();
        vm.write_r(1, 5).unwrap();
        let d = decode(encode(Opcode::Cmp, 0b01, 1, 0, 9)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert!(vm.flag(Flag::N));
        assert!(!vm.flag(Flag::Z));
        assert!(!vm.flag(Flag::P));
    }

    #[test]
    fn cmp_nan_clears_all_flags() {
        let mut vm = vm();
        vm.write_f(1, f32::NAN).unwrap();
        let d = decode(encode(Opcode::Cmp, 0b11, 1, 0, 1.0f32.to_bits())).unwrap();
        exec(&mut vm, &d).unwrap();
        assert!(!vm.flag(Flag::Z) && !vm.flag(Flag::N) && !vm.flag(Flag::P));
    }

    #[test]
    fn mov_register_form_ignores_third_reg_id() {
        let mut vm = vm();
        vm.write_r(2, 77).unwrap();
        let d = decode(encode(Opcode::Mov, 0b00, 0, 2, 99)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_r(0).unwrap(), 77);
    }

    #[test]
    fn movc_int_to_float_casts_value() {
        let mut vm = vm();
        vm.write_r(2, 7).unwrap();
        let d = decode(encode(Opcode::Movc, 0b00, 0, 2, 0)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_f(0).unwrap(), 7.0);
    }

    #[test]
    fn movc_float_to_int_truncates_toward_zero() {
        let mut vm = vm();
        vm.write_f(2, 7.9).unwrap();
        let d = decode(encode(Opcode::Movc, 0b10, 0, 2, 0)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_r(0).unwrap(), 7);
    }
}
