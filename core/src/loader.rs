//! Binary program loader (spec §6). Not part of the core's normal operation boundary —
//! the pipeline never calls this itself — but it is the one place outside `cli` that
//! understands the on-disk format, so it lives in `core` alongside the types it
//! populates rather than duplicated in the host wrapper.
//!
//! Layout (little-endian throughout):
//!
//! ```text
//! offset 0  : code_len        (u32, in 64-bit words)
//! offset 4  : row_index_len   (u32, in 32-bit words; node count = row_index_len - 1)
//! offset 8  : col_index_len   (u32, in 32-bit words)
//! offset 12 : values_len      (u32, in 32-bit words)
//! offset 16 : mem_len         (u32, in 32-bit words)
//! offset 20 : code section    (u64 x code_len)
//! then      : row_index       (i32 x row_index_len)
//! then      : col_index       (i32 x col_index_len)
//! then      : values          (i32 x values_len)
//! then      : memory image    (i32 x mem_len)
//! ```

use thiserror::Error;

use crate::graph::Graph;
use crate::state::VmState;
use crate::{MEM_SIZE, PROG_SIZE};

/// Failure to parse or validate a program binary. Distinct from `ErrorKind` — these are
/// load-time format errors, never states the running VM itself can reach.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("truncated header: need at least 20 bytes, got {0}")]
    TruncatedHeader(usize),
    #[error("truncated body: need {need} more bytes for {what}, got {have}")]
    TruncatedBody {
        what: &'static str,
        need: usize,
        have: usize,
    },
    #[error("code_len {0} exceeds PROG_SIZE ({PROG_SIZE})")]
    CodeTooLarge(u32),
    #[error("mem_len {0} exceeds MEM_SIZE ({MEM_SIZE})")]
    MemoryTooLarge(u32),
    #[error("row_index must have at least one entry")]
    EmptyRowIndex,
    #[error("row {node} is not sorted ascending at column {index}")]
    UnsortedRow { node: usize, index: usize },
}

struct Header {
    code_len: u32,
    row_index_len: u32,
    col_index_len: u32,
    values_len: u32,
    mem_len: u32,
}

fn read_header(bytes: &[u8]) -> Result<Header, LoadError> {
    if bytes.len() < 20 {
        return Err(LoadError::TruncatedHeader(bytes.len()));
    }
    let word = |off: usize| u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap());
    Ok(Header {
        code_len: word(0),
        row_index_len: word(4),
        col_index_len: word(8),
        values_len: word(12),
        mem_len: word(16),
    })
}

fn read_u64s(bytes: &[u8], offset: &mut usize, count: u32, what: &'static str) -> Result<Vec<u64>, LoadError> {
    let need = count as usize * 8;
    if bytes.len() < *offset + need {
        return Err(LoadError::TruncatedBody {
            what,
            need,
            have: bytes.len().saturating_sub(*offset),
        });
    }
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let start = *offset + i * 8;
        out.push(u64::from_le_bytes(bytes[start..start + 8].try_into().unwrap()));
    }
    *offset += need;
    Ok(out)
}

fn read_i32s(bytes: &[u8], offset: &mut usize, count: u32, what: &'static str) -> Result<Vec<i32>, LoadError> {
    let need = count as usize * 4;
    if bytes.len() < *offset + need {
        return Err(LoadError::TruncatedBody {
            what,
            need,
            have: bytes.len().saturating_sub(*offset),
        });
    }
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let start = *offset + i * 4;
        out.push(i32::from_le_bytes(bytes[start..start + 4].try_into().unwrap()));
    }
    *offset += need;
    Ok(out)
}

/// Parse a program binary into a graph and a freshly reset `VmState` with `program`
/// and `memory` populated. Mirrors the original loader's "reset before populate"
/// ordering — any stale register/frontier state from a prior run is discarded first.
pub fn load<'g>(bytes: &[u8], graph_storage: &'g mut Option<Graph>) -> Result<VmState<'g>, LoadError> {
    let header = read_header(bytes)?;

    if header.code_len as usize > PROG_SIZE {
        return Err(LoadError::CodeTooLarge(header.code_len));
    }
    if header.mem_len as usize > MEM_SIZE {
        return Err(LoadError::MemoryTooLarge(header.mem_len));
    }
    if header.row_index_len == 0 {
        return Err(LoadError::EmptyRowIndex);
    }

    let mut offset = 20;
    let code = read_u64s(bytes, &mut offset, header.code_len, "code")?;
    let row_index = read_i32s(bytes, &mut offset, header.row_index_len, "row_index")?;
    let col_index = read_i32s(bytes, &mut offset, header.col_index_len, "col_index")?;
    let values = read_i32s(bytes, &mut offset, header.values_len, "values")?;
    let memory = read_i32s(bytes, &mut offset, header.mem_len, "memory image")?;

    let node_count = row_index.len() - 1;
    for u in 0..node_count {
        let start = row_index[u] as usize;
        let end = row_index[u + 1] as usize;
        let row = &col_index[start..end];
        for w in row.windows(2) {
            if w[0] >= w[1] {
                return Err(LoadError::UnsortedRow {
                    node: u,
                    index: start,
                });
            }
        }
    }

    let graph = Graph::new(row_index, col_index, values);
    let graph_ref: &'g Graph = graph_storage.insert(graph);

    let mut vm = VmState::new(graph_ref);
    vm.reset();
    for (i, word) in code.into_iter().enumerate() {
        vm.program[i] = word;
    }
    for (i, word) in memory.into_iter().enumerate() {
        vm.memory[i] = word;
    }
    Ok(vm)
}
