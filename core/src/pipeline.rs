//! Fetch/decode/execute pipeline (spec §4.3).
//!
//! Owns a [`VmState`] plus the two host hooks (spec §6): `debug_hook`, called after
//! every executed instruction, and `exit_hook`, called once when the loop exits. The
//! loop itself is a direct translation of the pseudocode in spec §4.3, including its
//! particular order of operations — natural PC-overflow halt and decode failure both
//! skip the debug hook and the clock increment for that attempt, while a failing
//! `execute()` still runs the hook and increments the clock (this is why spec scenario
//! 6, a branch-target fault, reports `clock == 1`).

use crate::decode::decode;
use crate::error::ErrorKind;
use crate::exec;
use crate::graph::Graph;
use crate::state::VmState;

/// Outcome of one instruction, and of a full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Halt,
    Error(ErrorKind),
}

pub struct Pipeline<'g> {
    pub vm: VmState<'g>,
    pub debug_hook: Option<Box<dyn FnMut(&VmState<'g>) + 'g>>,
    pub exit_hook: Option<Box<dyn FnMut(&VmState<'g>, Status) + 'g>>,
}

impl<'g> Pipeline<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Pipeline {
            vm: VmState::new(graph),
            debug_hook: None,
            exit_hook: None,
        }
    }

    /// Fetch, decode, and execute exactly one instruction.
    pub fn step(&mut self) -> Status {
        let Some(word) = self.vm.fetch() else {
            return Status::Halt;
        };
        let decoded = match decode(word) {
            Ok(d) => d,
            Err(e) => return Status::Error(e),
        };
        let status = exec::execute(&mut self.vm, decoded);
        if let Some(hook) = self.debug_hook.as_mut() {
            hook(&self.vm);
        }
        self.vm.clock += 1;
        status
    }

    /// Run until `Halt`, `Error`, or (if `max_instructions` is set) the instruction
    /// cap is reached. Calls `exit_hook` exactly once, with the final status.
    pub fn run(&mut self, max_instructions: Option<u64>) -> Status {
        let mut status = Status::Continue;
        while status == Status::Continue {
            if let Some(max) = max_instructions
                && self.vm.clock >= max
            {
                status = Status::Error(ErrorKind::InstructionLimitExceeded);
                break;
            }
            status = self.step();
        }
        if let Some(hook) = self.exit_hook.as_mut() {
            hook(&self.vm, status);
        }
        status
    }
}
