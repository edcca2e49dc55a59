//! Graph-iteration opcodes: `NITER`, `NNEXT`, `EITER`, `ENEXT`, `HASE`, `DEG`
//! (spec §4.3). These are GX-VM's distinguishing affordance over a generic ALU — direct
//! hardware support for walking CSR rows without materialising an edge list in RAM.

use crate::decode::{Decoded, Opcode};
use crate::error::ErrorKind;
use crate::state::{Flag, VmState};
use crate::{NITER_SLOTS, R_NBR, R_NODE, R_VAL};

pub(crate) fn exec(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    match d.opcode {
        Opcode::Niter => niter(vm, d),
        Opcode::Nnext => nnext(vm, d),
        Opcode::Eiter => eiter(vm),
        Opcode::Enext => enext(vm),
        Opcode::Hase => hase(vm),
        Opcode::Deg => deg(vm, d),
        _ => unreachable!("dispatcher only routes graph-iteration opcodes here"),
    }
}

fn niter_slot(d: &Decoded) -> Result<usize, ErrorKind> {
    let k = d.arg1 as usize;
    if k >= NITER_SLOTS {
        return Err(ErrorKind::IteratorOutOfRange(d.arg1));
    }
    Ok(k)
}

fn niter(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let k = niter_slot(d)?;
    vm.niter[k] = 0;
    Ok(())
}

/// Advance `niter[k]` through `R_NODE`'s neighbours. On success, loads `R_NBR`/`R_VAL`
/// and clears flags; on exhaustion, sets `Z` and leaves the cursor unchanged so a
/// caller can re-poll after seeding more work without losing its place.
fn nnext(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let k = niter_slot(d)?;
    let u = vm.read_r(R_NODE)?;
    match vm.graph.edge_at(u, vm.niter[k]) {
        Some((nbr, weight)) => {
            vm.write_r(R_NBR, nbr)?;
            vm.write_r(R_VAL, weight)?;
            vm.niter[k] += 1;
            vm.clear_flags();
        }
        None => {
            vm.clear_flags();
            vm.set_flag(Flag::Z);
        }
    }
    Ok(())
}

fn eiter(vm: &mut VmState) -> Result<(), ErrorKind> {
    vm.eiter = 0;
    vm.write_r(R_NODE, 0)
}

/// Advance the global edge scan by one edge. Skips at most one exhausted row per call
/// (spec §9 open question, resolved per the source's behavior) — a sparse graph with
/// several consecutive empty rows needs one `ENEXT` per empty row to skip past them.
fn enext(vm: &mut VmState) -> Result<(), ErrorKind> {
    let mut u = vm.read_r(R_NODE)?;
    if vm.graph.edge_at(u, vm.eiter).is_none() {
        u += 1;
        vm.eiter = 0;
        vm.write_r(R_NODE, u)?;
    }
    match vm.graph.edge_at(u, vm.eiter) {
        Some((nbr, weight)) => {
            vm.write_r(R_NBR, nbr)?;
            vm.write_r(R_VAL, weight)?;
            vm.eiter += 1;
            vm.clear_flags();
        }
        None => {
            vm.clear_flags();
            vm.set_flag(Flag::Z);
        }
    }
    Ok(())
}

/// Binary-search for edge `(R_NODE, R_NBR)`. Polarity is inverted from the usual
/// "found" convention: `Z` means *no* edge, so callers follow `HASE` with `BZ` to
/// branch on absence (spec §4.3, §9).
fn hase(vm: &mut VmState) -> Result<(), ErrorKind> {
    let u = vm.read_r(R_NODE)?;
    let v = vm.read_r(R_NBR)?;
    vm.clear_flags();
    vm.set_flag(Flag::Z);
    if vm.graph.has_edge(u, v) {
        vm.clear_flag(Flag::Z);
    }
    Ok(())
}

fn deg(vm: &mut VmState, d: &Decoded) -> Result<(), ErrorKind> {
    let u = vm.read_r(d.arg1)?;
    let degree = vm.graph.degree(u).ok_or(ErrorKind::Unsupported)?;
    vm.write_r(R_VAL, degree)
}
