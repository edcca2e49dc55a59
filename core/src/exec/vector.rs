//! Vector opcodes: `VADD`, `VSUB`, `VMUL`, `VDIV`, `VLD`, `VST`, `VSET`, `VSUM`
//! (spec §4.3). Each vector register has `LANES` (4) lanes; all lane-wise ops are
//! plain `for` loops over that fixed width, matching the original's flat fixed-size
//! arrays rather than reaching for a SIMD crate the teacher never needed at this scale.

use crate::decode::{Decoded, Opcode, Operand};
use crate::error::ErrorKind;
use crate::state::VmState;
use crate::LANES;

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.opcode {
        Opcode::Vadd => lanewise_int_or_float(vm, d, i32::wrapping_add, |a, b| a + b),
        Opcode::Vsub => lanewise_int_or_float(vm, d, i32::wrapping_sub, |a, b| a - b),
        Opcode::Vmul => lanewise_int_or_float(vm, d, i32::wrapping_mul, |a, b| a * b),
        Opcode::Vdiv => lanewise_div(vm, d),
        Opcode::Vld => vld(vm, d),
        Opcode::Vst => vst(vm, d),
        Opcode::Vset => vset(vm, d),
        Opcode::Vsum => vsum(vm, d),
        _ => unreachable!("dispatcher only routes vector opcodes here"),
    }
}

fn lanewise_int_or_float(
    vm: &mut VmState,
    d: &Decoded,
    int_op: fn(i32, i32) -> i32,
    float_op: fn(f32, f32) -> f32,
) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(r3) => {
            let a = vm.read_vr(d.arg2)?;
            let b = vm.read_vr(r3)?;
            let mut out = [0i32; LANES];
            for i in 0..LANES {
                out[i] = int_op(a[i], b[i]);
            }
            vm.write_vr(d.arg1, out)
        }
        Operand::FloatReg(r3) => {
            let a = vm.read_vf(d.arg2)?;
            let b = vm.read_vf(r3)?;
            let mut out = [0.0f32; LANES];
            for i in 0..LANES {
                out[i] = float_op(a[i], b[i]);
            }
            vm.write_vf(d.arg1, out)
        }
        _ => Err(ErrorKind::Unsupported),
    }
}

/// `VDIV` gets its own path because the integer lane division can divide by zero.
fn lanewise_div(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(r3) => {
            let a = vm.read_vr(d.arg2)?;
            let b = vm.read_vr(r3)?;
            let mut out = [0i32; LANES];
            for i in 0..LANES {
                if b[i] == 0 {
                    return Err(ErrorKind::DivideByZero);
                }
                out[i] = a[i] / b[i];
            }
            vm.write_vr(d.arg1, out)
        }
        Operand::FloatReg(r3) => {
            let a = vm.read_vf(d.arg2)?;
            let b = vm.read_vf(r3)?;
            let mut out = [0.0f32; LANES];
            for i in 0..LANES {
                out[i] = a[i] / b[i];
            }
            vm.write_vf(d.arg1, out)
        }
        _ => Err(ErrorKind::Unsupported),
    }
}

fn vector_addr(vm: &VmState, d: &Decoded) -> Result<(usize, bool), ErrorKind> {
    let (raw, is_float) = match d.third {
        Operand::IntImm(v) => (v as i64, false),
        Operand::FloatImm(v) => (v.to_bits() as i32 as i64, true),
        Operand::IntReg(_) => (vm.read_r(d.arg2)? as i64, false),
        Operand::FloatReg(_) => (vm.read_r(d.arg2)? as i64, true),
    };
    Ok((vm.check_vector_addr(raw)?, is_float))
}

fn vld(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let (addr, is_float) = vector_addr(vm, d)?;
    if is_float {
        let mut lanes = [0.0f32; LANES];
        for i in 0..LANES {
            lanes[i] = f32::from_bits(vm.memory[addr + i] as u32);
        }
        vm.write_vf(d.arg1, lanes)
    } else {
        let mut lanes = [0i32; LANES];
        lanes.copy_from_slice(&vm.memory[addr..addr + LANES]);
        vm.write_vr(d.arg1, lanes)
    }
}

fn vst(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let (addr, is_float) = vector_addr(vm, d)?;
    if is_float {
        let lanes = vm.read_vf(d.arg1)?;
        for i in 0..LANES {
            vm.memory[addr + i] = lanes[i].to_bits() as i32;
        }
    } else {
        let lanes = vm.read_vr(d.arg1)?;
        vm.memory[addr..addr + LANES].copy_from_slice(&lanes);
    }
    Ok(())
}

/// Broadcast a scalar (immediate or register-held) into every lane of the destination
/// vector register.
fn vset(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntImm(v) => vm.write_vr(d.arg1, [v; LANES]),
        Operand::IntReg(r) => {
            let v = vm.read_r(r)?;
            vm.write_vr(d.arg1, [v; LANES])
        }
        Operand::FloatImm(v) => vm.write_vf(d.arg1, [v; LANES]),
        Operand::FloatReg(r) => {
            let v = vm.read_f(r)?;
            vm.write_vf(d.arg1, [v; LANES])
        }
    }
}

/// `R[arg1] += Σ VR[arg2][i]` (or the float equivalent). Deliberately accumulates
/// rather than assigns (spec §4.3, §9) — callers wanting a pure reduction must zero
/// the destination first.
fn vsum(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.third {
        Operand::IntReg(_) | Operand::IntImm(_) => {
            let lanes = vm.read_vr(d.arg2)?;
            let sum: i32 = lanes.iter().fold(0, |acc, &x| acc.wrapping_add(x));
            let prev = vm.read_r(d.arg1)?;
            vm.write_r(d.arg1, prev.wrapping_add(sum))
        }
        Operand::FloatReg(_) | Operand::FloatImm(_) => {
            let lanes = vm.read_vf(d.arg2)?;
            let sum: f32 = lanes.iter().sum();
            let prev = vm.read_f(d.arg1)?;
            vm.write_f(d.arg1, prev + sum)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode, encode};
    use crate::graph::Graph;

    fn vm() -> VmState<'static> {
        let g: &'static Graph = Box::leak(Box::new(Graph::new(vec![0], vec![], vec![])));
        VmState::new(g)
    }

    #[test]
    fn vadd_is_lanewise() {
        let mut vm = vm();
        vm.write_vr(1, [1, 2, 3, 4]).unwrap();
        vm.write_vr(2, [10, 20, 30, 40]).unwrap();
        let d = decode(encode(Opcode::Vadd, 0b00, 0, 1, 2)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_vr(0).unwrap(), [11, 22, 33, 44]);
    }

    #[test]
    fn vdiv_int_by_zero_errors() {
        let mut vm = vm();
        vm.write_vr(1, [10, 10, 10, 10]).unwrap();
        vm.write_vr(2, [5, 0, 1, 2]).unwrap();
        let d = decode(encode(Opcode::Vdiv, 0b00, 0, 1, 2)).unwrap();
        assert_eq!(exec(&mut vm, &d), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn vset_broadcasts_immediate() {
        let mut vm = vm();
        let d = decode(encode(Opcode::Vset, 0b01, 3, 0, 7)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_vr(3).unwrap(), [7, 7, 7, 7]);
    }

    #[test]
    fn vsum_accumulates_into_destination() {
        let mut vm = vm();
        vm.write_f(crate::F_ACC, 0.0).unwrap();
        vm.write_vf(0, [1.0, 2.0, 3.0, 4.0]).unwrap();
        let d = decode(encode(Opcode::Vsum, 0b10, crate::F_ACC, 0, 0)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_f(crate::F_ACC).unwrap(), 10.0);
        // A second VSUM on an already-populated accumulator adds, not replaces.
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.read_f(crate::F_ACC).unwrap(), 20.0);
    }

    #[test]
    fn vld_vst_round_trip_without_overlap() {
        let mut vm = vm();
        vm.write_vr(1, [9, 8, 7, 6]).unwrap();
        let st = decode(encode(Opcode::Vst, 0b01, 1, 0, 0)).unwrap();
        exec(&mut vm, &st).unwrap();
        let ld = decode(encode(Opcode::Vld, 0b01, 2, 0, 0)).unwrap();
        exec(&mut vm, &ld).unwrap();
        assert_eq!(vm.read_vr(2).unwrap(), [9, 8, 7, 6]);
    }

    #[test]
    fn vld_bounds_check_requires_full_width() {
        let mut vm = vm();
        let ld = decode(encode(
            Opcode::Vld,
            0b01,
            0,
            0,
            (crate::MEM_SIZE - 2) as u32,
        ))
        .unwrap();
        assert!(matches!(
            exec(&mut vm, &ld),
            Err(ErrorKind::MemoryOutOfRange(_))
        ));
    }
}
