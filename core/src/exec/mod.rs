//! Opcode execution, grouped the way spec §4.3 groups them: control flow, graph
//! iteration, arithmetic/logic, memory, vector, frontier, and synchronisation
//! (no-ops). Each group lives in its own module, following the teacher's per-family
//! split (`cpu/z80/{alu,branch,load_store,...}.rs`).

mod alu;
mod branch;
mod frontier_ops;
mod graph_iter;
mod memory;
mod sync;
mod vector;

use crate::decode::{Decoded, Opcode};
use crate::pipeline::Status;
use crate::state::VmState;

/// Dispatch one decoded instruction against VM state, producing the resulting status.
/// `HALT` is handled here directly; every other opcode delegates to a per-family
/// module and is folded from `Result<(), ErrorKind>` into `Status`.
pub(crate) fn execute(vm: &mut VmState, d: Decoded) -> Status {
    use Opcode::*;

    if d.opcode == Halt {
        return Status::Halt;
    }

    let result = match d.opcode {
        Halt => unreachable!("handled above"),
        Jmp | Bz | Bnz | Blt | Bge => branch::exec(vm, &d),
        Niter | Nnext | Eiter | Enext | Hase | Deg => graph_iter::exec(vm, &d),
        Add | Sub | Mul | Div | Cmp | Mov | Movc => alu::exec(vm, &d),
        Ld | St => memory::exec(vm, &d),
        Vadd | Vsub | Vmul | Vdiv | Vld | Vst | Vset | Vsum => vector::exec(vm, &d),
        Fpush | Fpop | Fempty | Fswap | Ffill => frontier_ops::exec(vm, &d),
        Parallel | Barrier | Lock | Unlock => sync::exec(vm, &d),
    };

    match result {
        Ok(()) => Status::Continue,
        Err(e) => Status::Error(e),
    }
}
