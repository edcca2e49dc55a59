//! Error kinds the VM core can produce (spec §7).

use thiserror::Error;

/// A fatal condition that terminates the pipeline with `Status::Error`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unsupported opcode, frontier backend, or register index")]
    Unsupported,

    #[error("branch target {0} is out of range")]
    BranchOutOfRange(u32),

    #[error("memory address {0} is out of range")]
    MemoryOutOfRange(i64),

    #[error("neighbour-iterator slot {0} is out of range")]
    IteratorOutOfRange(u8),

    #[error("frontier is full")]
    FrontierFull,

    #[error("frontier is empty")]
    FrontierEmpty,

    #[error("integer division by zero")]
    DivideByZero,

    /// Not part of the ISA's error table — an external instruction cap (spec §5) was
    /// exceeded. Raised by `Pipeline::run`, never by opcode execution itself.
    #[error("instruction limit exceeded")]
    InstructionLimitExceeded,
}
