//! Synchronisation opcodes: `PARALLEL`, `BARRIER`, `LOCK`, `UNLOCK` (spec §4.3, §5).
//! This VM models a single core; these exist only so that programs written for a
//! future multi-core target decode and execute without modification. They are no-ops
//! here and cannot fail.

use crate::decode::Decoded;
use crate::error::ErrorKind;
use crate::state::VmState;

pub(crate) fn exec(_vm: &mut VmState, _d: &Decoded) -> Result<(), ErrorKind> {
    Ok(())
}
