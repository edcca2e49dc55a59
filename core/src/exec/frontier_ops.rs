//! Frontier opcodes: `FPUSH`, `FPOP`, `FEMPTY`, `FSWAP`, `FFILL` (spec §4.2, §4.3). These
//! drive the level-synchronous dual-frontier traversal model — the working frontier is
//! drained while the next level is built up, then the two are swapped between levels.

use crate::decode::Decoded;
use crate::error::ErrorKind;
use crate::frontier::Frontier;
use crate::state::{Flag, VmState};

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    use crate::decode::Opcode::*;
    match d.opcode {
        Fpush => fpush(vm, d),
        Fpop => fpop(vm, d),
        Fempty => fempty(vm),
        Fswap => fswap(vm),
        Ffill => ffill(vm),
        _ => unreachable!("dispatcher only routes frontier opcodes here"),
    }
}

fn fpush(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let node = vm.read_r(d.arg1)?;
    vm.next_frontier.push(node)
}

fn fpop(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let node = vm.frontier.pop()?;
    vm.write_r(d.arg1, node)
}

/// Sets `Z` iff the *current* (not next) frontier is empty — the usual `FEMPTY` + `BZ`
/// idiom for "drain until empty, then move to the next level."
fn fempty(vm: &mut VmState) -> Result<(), ErrorKind> {
    vm.clear_flags();
    if vm.frontier.is_empty() {
        vm.set_flag(Flag::Z);
    }
    Ok(())
}

/// Swap the working and next-level frontiers, then reset what is now `next_frontier`
/// to empty (spec §9 open question: the swapped-out buffer does not retain stale
/// entries from two levels back).
fn fswap(vm: &mut VmState) -> Result<(), ErrorKind> {
    std::mem::swap(&mut vm.frontier, &mut vm.next_frontier);
    vm.next_frontier = Frontier::new();
    Ok(())
}

/// Push every node `0..node_count` onto the working frontier, in ascending order.
fn ffill(vm: &mut VmState) -> Result<(), ErrorKind> {
    for u in 0..vm.graph.node_count() {
        vm.frontier.push(u as i32)?;
    }
    Ok(())
}
