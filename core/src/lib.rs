//! GX-VM core: the instruction-set simulator for the graph-accelerator VM.
//!
//! This crate is the "hard part" of the system — the binary instruction format, the
//! fetch/decode/execute pipeline, and the state transitions opcodes produce on the
//! register files, memory, and the two frontier buffers. It performs no file I/O and no
//! printing; those are the host wrapper's job (see the `gxvm-cli` crate).

pub mod decode;
pub mod error;
pub mod exec;
pub mod frontier;
pub mod graph;
pub mod loader;
pub mod pipeline;
pub mod state;

pub mod prelude {
    pub use crate::decode::{Decoded, Opcode, Operand};
    pub use crate::error::ErrorKind;
    pub use crate::frontier::{Frontier, FrontierBackend};
    pub use crate::graph::Graph;
    pub use crate::pipeline::{Pipeline, Status};
    pub use crate::state::VmState;
}

/// Node count upper bound is not fixed; capacities below are for the fixed-size VM
/// resources (program store, RAM, frontier ring, register files, vector lanes).
pub const PROG_SIZE: usize = 8192;
pub const MEM_SIZE: usize = 65536;
pub const NUM_INT_REGS: usize = 23;
pub const NUM_FLOAT_REGS: usize = 18;
pub const NUM_VECTOR_REGS: usize = 16;
pub const LANES: usize = 4;
pub const NITER_SLOTS: usize = 4;

/// Named integer register slots (spec §3).
pub const R_NODE: u8 = 0;
pub const R_NBR: u8 = 1;
pub const R_VAL: u8 = 2;
pub const R_ACC: u8 = 3;
pub const R_TMP1: u8 = 4;
// R_TMP1..R_TMP16 occupy indices 4..=19.
pub const R_ZERO: u8 = 20;
pub const R_CORE: u8 = 21;
// Index 22 is reserved (unnamed) to round the file out to spec's inclusive R[0..=22].

/// Named float register slots.
pub const F_ACC: u8 = 0;
pub const F_TMP1: u8 = 1;
// F_TMP1..F_TMP16 occupy indices 1..=16.
pub const F_ZERO: u8 = 17;
