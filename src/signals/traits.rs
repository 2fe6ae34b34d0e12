/*!
 * Signal Traits
 * Process control abstraction used by eviction, shutdown, and reconciliation
 */

use super::types::{Liveness, SignalResult};
use crate::core::types::Pid;

/// Sends control signals to universe processes
pub trait ProcessSignaller {
    /// Ask `pid` to continue; does not wait for acknowledgment
    fn resume(&self, pid: Pid) -> SignalResult<()>;

    /// Best-effort termination; a missing target is not an error
    fn terminate(&self, pid: Pid);

    /// Check whether `pid` is still alive, reaping it if it is our exited child
    fn probe(&self, pid: Pid) -> Liveness;
}
