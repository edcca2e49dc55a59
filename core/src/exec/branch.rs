//! Control flow: `JMP`, `BZ`, `BNZ`, `BLT`, `BGE` (spec §4.3). `HALT` is handled by the
//! dispatcher directly and never reaches this module.

use crate::decode::{Decoded, Opcode, Operand};
use crate::error::ErrorKind;
use crate::state::{Flag, VmState};

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let Operand::IntImm(imm) = d.third else {
        return Err(ErrorKind::Unsupported);
    };

    let taken = match d.opcode {
        Opcode::Jmp => true,
        Opcode::Bz => vm.flag(Flag::Z),
        Opcode::Bnz => !vm.flag(Flag::Z),
        Opcode::Blt => vm.flag(Flag::N),
        Opcode::Bge => vm.flag(Flag::P) || vm.flag(Flag::Z),
        _ => unreachable!("dispatcher only routes branch opcodes here"),
    };

    if taken {
        // Only a taken branch's target is validated — an untaken conditional branch
        // with an out-of-range encoded target never attempts to use it.
        vm.pc = vm.check_branch_target(imm)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::encode;
    use crate::graph::Graph;

    fn vm_with<'g>(graph: &'g Graph) -> VmState<'g> {
        VmState::new(graph)
    }

    #[test]
    fn jmp_sets_pc() {
        let g = Graph::new(vec![0], vec![], vec![]);
        let mut vm = vm_with(&g);
        let d = crate::decode::decode(encode(Opcode::Jmp, 0b01, 0, 0, 42)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.pc, 42);
    }

    #[test]
    fn bz_branches_only_when_zero_flag_set() {
        let g = Graph::new(vec![0], vec![], vec![]);
        let mut vm = vm_with(&g);
        let d = crate::decode::decode(encode(Opcode::Bz, 0b01, 0, 0, 10)).unwrap();
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.pc, 0);
        vm.set_flag(Flag::Z);
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.pc, 10);
    }

    #[test]
    fn bge_branches_on_positive_or_zero() {
        let g = Graph::new(vec![0], vec![], vec![]);
        let mut vm = vm_with(&g);
        let d = crate::decode::decode(encode(Opcode::Bge, 0b01, 0, 0, 5)).unwrap();
        vm.set_flag(Flag::P);
        exec(&mut vm, &d).unwrap();
        assert_eq!(vm.pc, 5);
    }

    #[test]
    fn untaken_branch_with_bad_target_does_not_fault() {
        let g = Graph::new(vec![0], vec![], vec![]);
        let mut vm = vm_with(&g);
        let d = crate::decode::decode(encode(Opcode::Bz, 0b01, 0, 0, 999_999)).unwrap();
        assert!(exec(&mut vm, &d).is_ok());
        assert_eq!(vm.pc, 0);
    }

    #[test]
    fn taken_branch_with_out_of_range_target_errors() {
        let g = Graph::new(vec![0], vec![], vec![]);
        let mut vm = vm_with(&g);
        let d = crate::decode::decode(encode(Opcode::Jmp, 0b01, 0, 0, 999_999)).unwrap();
        assert_eq!(
            exec(&mut vm, &d),
            Err(ErrorKind::BranchOutOfRange(999_999))
        );
    }
}
